//! Album Data

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::{
    albums::{errors::AlbumsServiceError, records::AlbumUuid},
    categories::records::CategoryUuid,
};

/// New Album Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlbum {
    pub uuid: AlbumUuid,
    pub details: AlbumDetails,
}

/// Album fields written by catalog administration.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumDetails {
    pub title: String,
    pub artist: String,
    pub price: Decimal,
    pub cover_url: Option<String>,
    pub stock: u32,
    pub description: Option<String>,
    pub category_uuid: Option<CategoryUuid>,
}

impl AlbumDetails {
    /// Check the rules the storage constraints would otherwise reject with a less useful error.
    pub(crate) fn validate(&self) -> Result<(), AlbumsServiceError> {
        if self.title.trim().is_empty() {
            return Err(AlbumsServiceError::Validation("title is required"));
        }

        if self.artist.trim().is_empty() {
            return Err(AlbumsServiceError::Validation("artist is required"));
        }

        if self.price.is_sign_negative() {
            return Err(AlbumsServiceError::Validation("price cannot be negative"));
        }

        Ok(())
    }
}

/// Stock-based listing filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Availability {
    #[default]
    All,
    InStock,
    OutOfStock,
}

impl Availability {
    pub(crate) const fn as_sql(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::InStock => "in",
            Self::OutOfStock => "out",
        }
    }
}

impl FromStr for Availability {
    type Err = AlbumsServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "in" | "in-stock" | "in_stock" => Ok(Self::InStock),
            "out" | "out-of-stock" | "out_of_stock" => Ok(Self::OutOfStock),
            _ => Err(AlbumsServiceError::Validation("unknown availability filter")),
        }
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlbumSort {
    #[default]
    TitleAsc,
    TitleDesc,
    PriceAsc,
    PriceDesc,
}

impl AlbumSort {
    pub(crate) const fn as_sql(self) -> &'static str {
        match self {
            Self::TitleAsc => "title_asc",
            Self::TitleDesc => "title_desc",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
        }
    }
}

impl FromStr for AlbumSort {
    type Err = AlbumsServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "title_asc" | "name_asc" => Ok(Self::TitleAsc),
            "title_desc" | "name_desc" => Ok(Self::TitleDesc),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            _ => Err(AlbumsServiceError::Validation("unknown sort order")),
        }
    }
}

/// Album listing criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlbumFilter {
    pub category: Option<CategoryUuid>,
    pub availability: Availability,
}
