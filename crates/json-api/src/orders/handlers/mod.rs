//! Order Handlers

pub(crate) mod admin_index;
pub(crate) mod checkout;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod pay;
pub(crate) mod receipt;
pub(crate) mod status;

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::orders::records::{
    OrderDetails, OrderItemRecord, OrderRecord, ReceiptRecord,
};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// Sequential human-readable order number
    pub number: i64,

    pub user_uuid: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,

    /// Sum of the order lines at checkout prices
    pub total: String,

    /// `pending`, `shipped` or `delivered`
    pub status: String,

    pub is_paid: bool,
    pub delivered_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            number: order.number,
            user_uuid: order.user_uuid.into_uuid(),
            first_name: order.shipping.first_name,
            last_name: order.shipping.last_name,
            address: order.shipping.address,
            phone: order.shipping.phone,
            email: order.shipping.email,
            total: order.total.to_string(),
            status: order.status.as_str().to_string(),
            is_paid: order.is_paid,
            delivered_at: order.delivered_at.as_ref().map(ToString::to_string),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,

    /// Missing once the album has been removed from the catalog
    pub album_uuid: Option<Uuid>,
    pub title: Option<String>,
    pub artist: Option<String>,

    pub quantity: u32,

    /// Unit price captured at checkout
    pub unit_price: String,

    pub subtotal: String,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            subtotal: item.subtotal().to_string(),
            album_uuid: item.album_uuid.map(Into::into),
            title: item.title,
            artist: item.artist,
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
        }
    }
}

/// Receipt Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReceiptResponse {
    pub uuid: Uuid,
    pub order_uuid: Uuid,

    /// `R-{order number}-{yyyyMMddHHmmss}`
    pub number: String,

    pub payment_method: String,
    pub issued_at: String,
}

impl From<ReceiptRecord> for ReceiptResponse {
    fn from(receipt: ReceiptRecord) -> Self {
        Self {
            uuid: receipt.uuid.into_uuid(),
            order_uuid: receipt.order_uuid.into_uuid(),
            number: receipt.number,
            payment_method: receipt.payment_method.as_str().to_string(),
            issued_at: receipt.issued_at.to_string(),
        }
    }
}

/// Order Details Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderDetailsResponse {
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
    pub receipt: Option<ReceiptResponse>,
}

impl From<OrderDetails> for OrderDetailsResponse {
    fn from(details: OrderDetails) -> Self {
        Self {
            order: details.order.into(),
            items: details.items.into_iter().map(Into::into).collect(),
            receipt: details.receipt.map(Into::into),
        }
    }
}

/// Orders Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Orders, newest first
    pub orders: Vec<OrderResponse>,
}

impl From<Vec<OrderRecord>> for OrdersResponse {
    fn from(orders: Vec<OrderRecord>) -> Self {
        Self {
            orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use platter_app::domain::{
        albums::records::AlbumUuid,
        orders::records::{
            OrderDetails, OrderItemRecord, OrderItemUuid, OrderUuid, PaymentMethod,
            ReceiptRecord, ReceiptUuid,
        },
        users::records::UserUuid,
    };

    use crate::test_helpers::make_order;

    pub(crate) fn make_details(order: OrderUuid, user: UserUuid) -> OrderDetails {
        OrderDetails {
            order: make_order(order, user, Decimal::new(25_00, 2)),
            items: vec![OrderItemRecord {
                uuid: OrderItemUuid::new(),
                order_uuid: order,
                album_uuid: Some(AlbumUuid::new()),
                title: Some("Blue Train".to_string()),
                artist: Some("John Coltrane".to_string()),
                quantity: 2,
                unit_price: Decimal::new(12_50, 2),
            }],
            receipt: None,
        }
    }

    pub(crate) fn make_receipt(order: OrderUuid, method: PaymentMethod) -> ReceiptRecord {
        ReceiptRecord {
            uuid: ReceiptUuid::new(),
            order_uuid: order,
            number: "R-7-20260101120000".to_string(),
            payment_method: method,
            issued_at: Timestamp::UNIX_EPOCH,
        }
    }
}
