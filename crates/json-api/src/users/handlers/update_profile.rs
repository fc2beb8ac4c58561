//! Update Profile Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};

use platter_app::domain::users::data::ProfileUpdate;

use crate::{
    extensions::*,
    state::State,
    users::{UserResponse, errors::into_status_error},
};

/// Profile Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileRequest {
    pub display_name: String,
    pub email: String,

    /// Blank or missing clears the stored value
    #[serde(default)]
    pub phone: Option<String>,

    /// Blank or missing clears the stored value
    #[serde(default)]
    pub delivery_address: Option<String>,
}

impl From<ProfileRequest> for ProfileUpdate {
    fn from(request: ProfileRequest) -> Self {
        Self {
            display_name: request.display_name,
            email: request.email,
            phone: request.phone,
            delivery_address: request.delivery_address,
        }
    }
}

/// Update Profile Handler
///
/// Replaces the caller's name, email, phone and delivery address. Checkout defaults
/// follow the new values.
#[endpoint(
    tags("profile"),
    summary = "Update Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Blank name or invalid email"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::CONFLICT, description = "Email already in use"),
    ),
)]
#[tracing::instrument(name = "users.update_profile", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<ProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let updated = state
        .app
        .users
        .update_profile(principal.user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
