//! Get Album Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::albums::records::AlbumRecord;

use crate::{albums::errors::into_status_error, extensions::*, state::State};

/// Album Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AlbumResponse {
    /// The unique identifier of the album
    pub uuid: Uuid,

    pub title: String,
    pub artist: String,

    /// Current unit price as a decimal string
    pub price: String,

    pub cover_url: Option<String>,

    /// Units available
    pub stock: u32,

    /// Whether at least one unit is available
    pub in_stock: bool,

    pub description: Option<String>,
    pub category_uuid: Option<Uuid>,

    /// The date and time the album was created
    pub created_at: String,

    /// The date and time the album was last updated
    pub updated_at: String,
}

impl From<AlbumRecord> for AlbumResponse {
    fn from(album: AlbumRecord) -> Self {
        Self {
            uuid: album.uuid.into_uuid(),
            in_stock: album.is_in_stock(),
            price: album.price.to_string(),
            title: album.title,
            artist: album.artist,
            cover_url: album.cover_url,
            stock: album.stock,
            description: album.description,
            category_uuid: album.category_uuid.map(Into::into),
            created_at: album.created_at.to_string(),
            updated_at: album.updated_at.to_string(),
        }
    }
}

/// Get Album Handler
///
/// Returns a single album.
#[endpoint(
    tags("albums"),
    summary = "Get Album",
    responses(
        (status_code = StatusCode::OK, description = "Album found"),
        (status_code = StatusCode::NOT_FOUND, description = "Album not found"),
    ),
)]
pub(crate) async fn handler(
    album: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<AlbumResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let album = state
        .app
        .albums
        .get_album(album.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(album.into()))
}
