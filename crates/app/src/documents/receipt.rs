//! Receipt document data.

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::orders::records::{
    OrderItemRecord, OrderRecord, PaymentMethod, ReceiptRecord,
};

const REMOVED_ALBUM: &str = "(removed from catalog)";

/// One purchased line as printed on a receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    pub title: String,
    pub artist: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl ReceiptLine {
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Everything a renderer needs to lay out a receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptDocument {
    pub receipt_number: String,
    pub issued_at: Timestamp,
    pub payment_method: PaymentMethod,
    pub order_number: i64,
    pub customer: String,
    pub address: String,
    pub email: String,
    pub lines: Vec<ReceiptLine>,

    /// Always the stored order total, never recomputed from the lines.
    pub total: Decimal,
}

impl ReceiptDocument {
    #[must_use]
    pub fn new(order: &OrderRecord, items: &[OrderItemRecord], receipt: &ReceiptRecord) -> Self {
        let lines = items
            .iter()
            .map(|item| ReceiptLine {
                title: item
                    .title
                    .clone()
                    .unwrap_or_else(|| REMOVED_ALBUM.to_string()),
                artist: item.artist.clone().unwrap_or_default(),
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect();

        Self {
            receipt_number: receipt.number.clone(),
            issued_at: receipt.issued_at,
            payment_method: receipt.payment_method,
            order_number: order.number,
            customer: format!(
                "{} {}",
                order.shipping.first_name, order.shipping.last_name
            ),
            address: order.shipping.address.clone(),
            email: order.shipping.email.clone(),
            lines,
            total: order.total,
        }
    }
}
