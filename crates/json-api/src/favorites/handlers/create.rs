//! Add Favorite Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, favorites::errors::into_status_error, state::State};

/// Add Favorite Handler
///
/// Adding an album twice is a no-op.
#[endpoint(
    tags("favorites"),
    summary = "Add Favorite",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Album is a favorite"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::NOT_FOUND, description = "Album not found"),
    ),
)]
pub(crate) async fn handler(
    album: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let added = state
        .app
        .favorites
        .add(principal.user, album.into_inner().into())
        .await
        .map_err(into_status_error)?;

    if !added {
        return Err(StatusError::not_found().brief("Album not found"));
    }

    Ok(StatusCode::OK)
}
