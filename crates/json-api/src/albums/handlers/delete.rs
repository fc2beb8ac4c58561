//! Delete Album Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{albums::errors::into_status_error, extensions::*, state::State};

/// Delete Album Handler
///
/// Order history keeps the sold lines; they lose their catalog link.
#[endpoint(
    tags("albums"),
    summary = "Delete Album",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Album deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Album not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
pub(crate) async fn handler(
    album: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .albums
        .delete_album(album.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
