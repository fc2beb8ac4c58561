//! Create Album Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use platter_app::domain::albums::{data::NewAlbum, records::AlbumUuid};

use crate::{
    albums::{AlbumRequest, errors::into_status_error, get::AlbumResponse},
    extensions::*,
    state::State,
};

/// Create Album Handler
#[endpoint(
    tags("albums"),
    summary = "Create Album",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Album created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AlbumRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AlbumResponse>, StatusError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let album = state
        .app
        .albums
        .create_album(NewAlbum {
            uuid: AlbumUuid::new(),
            details: json.into_inner().try_into()?,
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/albums/{}", album.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(album_uuid = %album.uuid, title = %album.title, "created album");

    Ok(Json(album.into()))
}
