//! Album Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::categories::records::CategoryUuid, uuids::TypedUuid};

/// Album UUID
pub type AlbumUuid = TypedUuid<AlbumRecord>;

/// Album Record
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumRecord {
    pub uuid: AlbumUuid,
    pub title: String,
    pub artist: String,
    pub price: Decimal,
    pub cover_url: Option<String>,
    pub stock: u32,
    pub description: Option<String>,
    pub category_uuid: Option<CategoryUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AlbumRecord {
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}
