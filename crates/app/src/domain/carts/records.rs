//! Cart Records

use rust_decimal::Decimal;

use crate::domain::albums::records::AlbumUuid;

/// A quantified line in a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub album_uuid: AlbumUuid,
    pub quantity: u32,
}

/// A cart line joined with the album it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineView {
    pub album_uuid: AlbumUuid,
    pub title: String,
    pub artist: String,
    pub unit_price: Decimal,
    pub stock: u32,
    pub quantity: u32,
}

impl CartLineView {
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Cart contents priced at current catalog prices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
}

impl CartView {
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLineView::subtotal).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
