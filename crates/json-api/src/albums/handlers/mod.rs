//! Album Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

use std::str::FromStr;

use rust_decimal::Decimal;
use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::albums::data::AlbumDetails;

use crate::extensions::*;

/// Album Request
///
/// Body of album create and update requests.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AlbumRequest {
    pub title: String,
    pub artist: String,

    /// Decimal price, e.g. `"39.99"`
    pub price: String,

    #[serde(default)]
    pub cover_url: Option<String>,

    pub stock: u32,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category_uuid: Option<Uuid>,
}

impl TryFrom<AlbumRequest> for AlbumDetails {
    type Error = StatusError;

    fn try_from(request: AlbumRequest) -> Result<Self, Self::Error> {
        Ok(AlbumDetails {
            price: Decimal::from_str(request.price.trim()).or_400("invalid price")?,
            title: request.title,
            artist: request.artist,
            cover_url: request.cover_url,
            stock: request.stock,
            description: request.description,
            category_uuid: request.category_uuid.map(Into::into),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use serde_json::{Value, json};

    pub(crate) fn album_body(price: &str) -> Value {
        json!({
            "title": "Blue Train",
            "artist": "John Coltrane",
            "price": price,
            "stock": 4,
        })
    }
}
