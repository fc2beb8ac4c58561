//! Get Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    users::{UserResponse, errors::into_status_error},
};

/// Get Profile Handler
///
/// The signed-in caller's own user record.
#[endpoint(
    tags("profile"),
    summary = "Get Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .get_user(principal.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
