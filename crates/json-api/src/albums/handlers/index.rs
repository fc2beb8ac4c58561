//! Album Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::albums::data::{AlbumFilter, AlbumSort, Availability};

use crate::{
    albums::{errors::into_status_error, get::AlbumResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AlbumsResponse {
    /// The matching albums
    pub albums: Vec<AlbumResponse>,
}

/// Album Index Handler
///
/// Lists albums, optionally narrowed to a category or by availability.
#[endpoint(
    tags("albums"),
    summary = "List Albums",
    responses(
        (status_code = StatusCode::OK, description = "Albums"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown filter or sort order"),
    ),
)]
pub(crate) async fn handler(
    category: QueryParam<Uuid, false>,
    availability: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<AlbumsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = AlbumFilter {
        category: category.into_inner().map(Into::into),
        availability: availability
            .into_inner()
            .as_deref()
            .map(str::parse::<Availability>)
            .transpose()
            .map_err(into_status_error)?
            .unwrap_or_default(),
    };

    let sort = sort
        .into_inner()
        .as_deref()
        .map(str::parse::<AlbumSort>)
        .transpose()
        .map_err(into_status_error)?
        .unwrap_or_default();

    let albums = state
        .app
        .albums
        .list_albums(filter, sort)
        .await
        .map_err(into_status_error)?;

    Ok(Json(AlbumsResponse {
        albums: albums.into_iter().map(Into::into).collect(),
    }))
}
