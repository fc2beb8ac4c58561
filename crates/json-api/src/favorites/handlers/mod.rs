//! Favorite Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::albums::records::AlbumUuid;

/// Favorites Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FavoritesResponse {
    pub album_uuids: Vec<Uuid>,
}

impl From<Vec<AlbumUuid>> for FavoritesResponse {
    fn from(albums: Vec<AlbumUuid>) -> Self {
        Self {
            album_uuids: albums.into_iter().map(AlbumUuid::into_uuid).collect(),
        }
    }
}
