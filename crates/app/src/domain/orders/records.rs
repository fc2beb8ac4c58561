//! Order Records

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    domain::{albums::records::AlbumUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Receipt UUID
pub type ReceiptUuid = TypedUuid<ReceiptRecord>;

/// Fulfilment state of an order. Payment is tracked separately by `is_paid`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status `{0}`")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    /// Accepts the English names and the Polish storefront labels, with or without
    /// diacritics, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "oczekujace" | "oczekujące" => Ok(Self::Pending),
            "shipped" | "wyslane" | "wysłane" => Ok(Self::Shipped),
            "delivered" | "dostarczone" => Ok(Self::Delivered),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// How a receipt was paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    #[default]
    Card,
    BankTransfer,
    PayPal,
    Blik,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::BankTransfer => "bank_transfer",
            Self::PayPal => "paypal",
            Self::Blik => "blik",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::BankTransfer => "Bank transfer",
            Self::PayPal => "PayPal",
            Self::Blik => "BLIK",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment method `{0}`")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "bank_transfer" | "banktransfer" => Ok(Self::BankTransfer),
            "paypal" => Ok(Self::PayPal),
            "blik" => Ok(Self::Blik),
            _ => Err(UnknownPaymentMethod(s.to_string())),
        }
    }
}

/// Contact details captured at checkout, independent of the user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,

    /// Sequential number shown to people and used in receipt numbers.
    pub number: i64,

    pub user_uuid: UserUuid,
    pub shipping: ShippingInfo,
    pub total: Decimal,
    pub status: OrderStatus,
    pub is_paid: bool,
    pub delivered_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Record
///
/// `album_uuid`, `title` and `artist` are `None` once the album has been removed from
/// the catalog; quantity and unit price never change after checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub album_uuid: Option<AlbumUuid>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderItemRecord {
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Receipt Record
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptRecord {
    pub uuid: ReceiptUuid,
    pub order_uuid: OrderUuid,
    pub number: String,
    pub payment_method: PaymentMethod,
    pub issued_at: Timestamp,
}

/// An order with its items and, once paid, its receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
    pub receipt: Option<ReceiptRecord>,
}
