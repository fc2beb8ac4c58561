//! Cart Handlers

pub(crate) mod clear;
pub(crate) mod get;

#[cfg(test)]
pub(crate) mod tests {
    use rust_decimal::Decimal;

    use platter_app::domain::{
        albums::records::AlbumUuid,
        carts::records::{CartLineView, CartView},
    };

    pub(crate) fn make_view(album: AlbumUuid, quantity: u32) -> CartView {
        CartView {
            lines: vec![CartLineView {
                album_uuid: album,
                title: "Blue Train".to_string(),
                artist: "John Coltrane".to_string(),
                unit_price: Decimal::new(12_50, 2),
                stock: 5,
                quantity,
            }],
        }
    }
}
