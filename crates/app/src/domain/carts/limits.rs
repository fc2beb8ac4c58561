//! Per-item quantity rules.

/// Most units of a single album one cart line may hold, whatever the stock.
pub const MAX_QUANTITY_PER_ITEM: u32 = 5;

/// The largest quantity a cart line may reach for an album with `stock` units.
#[must_use]
pub const fn item_cap(stock: u32) -> u32 {
    if stock < MAX_QUANTITY_PER_ITEM {
        stock
    } else {
        MAX_QUANTITY_PER_ITEM
    }
}

/// Quantity stored when a line is explicitly set to a positive `requested` value.
#[must_use]
pub fn quantity_after_set(requested: u32, cap: u32) -> u32 {
    requested.clamp(1, cap.max(1))
}
