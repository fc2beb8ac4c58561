//! Server configuration module

use clap::Parser;

use crate::config::{
    cart::CartCookieConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod cart;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Platter JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "platter-json", about = "Platter JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request metrics and slow request settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Anonymous cart cookie settings.
    #[command(flatten)]
    pub cart: CartCookieConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::config::observability::LogFormat;

    use super::*;

    #[test]
    fn defaults_apply_when_only_the_database_is_given() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "platter-json",
            "--database-url",
            "postgres://localhost/platter",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.server.shutdown_grace().as_secs(), 30);
        assert!(matches!(config.logging.log_format, LogFormat::Compact));
        assert!(config.database.run_migrations, "migrations run by default");
        assert_eq!(config.cart.cart_cookie_name, "cart_id");
        assert!(!config.cart.cart_cookie_secure, "cookie is not secure by default");
        assert_eq!(config.observability.slow_request_threshold_ms, 1_000);

        Ok(())
    }

    #[test]
    fn migrations_can_be_disabled() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "platter-json",
            "--database-url",
            "postgres://localhost/platter",
            "--run-migrations",
            "false",
        ])?;

        assert!(!config.database.run_migrations, "expected migrations to be skipped");

        Ok(())
    }
}
