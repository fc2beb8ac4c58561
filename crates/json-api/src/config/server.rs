//! Server Config

use std::time::Duration;

use clap::Args;

/// Listener settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,

    /// Seconds in-flight requests get to finish after a stop signal
    #[arg(long, env = "SHUTDOWN_GRACE_SECS", default_value = "30")]
    pub shutdown_grace_secs: u64,
}

impl ServerRuntimeConfig {
    /// `host:port` for the listener.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}
