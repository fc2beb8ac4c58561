//! Healthcheck Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Healthcheck Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    /// Always `ok` while the process answers
    pub status: String,

    /// Running build of the API
    pub version: String,
}

/// Healthcheck Handler
///
/// Liveness probe. Does not touch the database.
#[endpoint(tags("health"), summary = "Health Check")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
