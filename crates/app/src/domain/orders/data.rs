//! Order Data
//!
//! Pure checkout rules: shipping validation, line validation against live stock,
//! totals and receipt numbering.

use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{
    albums::records::{AlbumRecord, AlbumUuid},
    carts::limits::MAX_QUANTITY_PER_ITEM,
    orders::records::ShippingInfo,
    users::records::UserRecord,
};

impl ShippingInfo {
    /// Every field is required and the email must look like one.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        let required = [
            (&self.first_name, "first name is required"),
            (&self.last_name, "last name is required"),
            (&self.address, "address is required"),
            (&self.phone, "phone is required"),
            (&self.email, "email is required"),
        ];

        for (value, message) in required {
            if value.trim().is_empty() {
                return Err(message);
            }
        }

        if !self.email.contains('@') {
            return Err("email is invalid");
        }

        Ok(())
    }

    /// Checkout form defaults taken from the user's profile.
    #[must_use]
    pub fn from_profile(user: &UserRecord) -> Self {
        let name = user.display_name.trim();
        let (first_name, last_name) = name.split_once(char::is_whitespace).unwrap_or((name, ""));

        Self {
            first_name: first_name.to_string(),
            last_name: last_name.trim().to_string(),
            address: user.delivery_address.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            email: user.email.clone(),
        }
    }
}

/// Why a single cart line cannot be checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineProblem {
    AlbumMissing {
        album: AlbumUuid,
    },
    QuantityBelowOne {
        title: String,
        quantity: i32,
    },
    QuantityAboveCap {
        title: String,
        quantity: u32,
    },
    QuantityExceedsStock {
        title: String,
        quantity: u32,
        stock: u32,
    },
}

impl Display for LineProblem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlbumMissing { album } => write!(f, "album {album} is no longer available"),
            Self::QuantityBelowOne { title, quantity } => {
                write!(f, "\"{title}\": quantity {quantity} must be at least 1")
            }
            Self::QuantityAboveCap { title, quantity } => write!(
                f,
                "\"{title}\": quantity {quantity} exceeds the limit of {MAX_QUANTITY_PER_ITEM} per order"
            ),
            Self::QuantityExceedsStock {
                title,
                quantity,
                stock,
            } => write!(
                f,
                "\"{title}\": quantity {quantity} exceeds available stock of {stock}"
            ),
        }
    }
}

/// Every reason a checkout was refused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutRejection {
    pub problems: Vec<LineProblem>,
}

impl Display for CheckoutRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, problem) in self.problems.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }

            write!(f, "{problem}")?;
        }

        Ok(())
    }
}

/// A validated line priced at the album's current price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub album_uuid: AlbumUuid,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl PricedLine {
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Validate cart lines against the albums as they are now.
///
/// Every line is checked and all problems are collected, so the caller can report
/// them together. On success the lines are priced at the current album prices.
pub fn validate_lines(
    lines: &[(AlbumUuid, i32)],
    albums: &BTreeMap<AlbumUuid, AlbumRecord>,
) -> Result<Vec<PricedLine>, CheckoutRejection> {
    let mut priced = Vec::with_capacity(lines.len());
    let mut problems = Vec::new();

    for &(album_uuid, quantity) in lines {
        let Some(album) = albums.get(&album_uuid) else {
            problems.push(LineProblem::AlbumMissing { album: album_uuid });
            continue;
        };

        let Some(quantity) = u32::try_from(quantity).ok().filter(|q| *q >= 1) else {
            problems.push(LineProblem::QuantityBelowOne {
                title: album.title.clone(),
                quantity,
            });
            continue;
        };

        let before = problems.len();

        if quantity > MAX_QUANTITY_PER_ITEM {
            problems.push(LineProblem::QuantityAboveCap {
                title: album.title.clone(),
                quantity,
            });
        }

        if quantity > album.stock {
            problems.push(LineProblem::QuantityExceedsStock {
                title: album.title.clone(),
                quantity,
                stock: album.stock,
            });
        }

        if problems.len() == before {
            priced.push(PricedLine {
                album_uuid,
                quantity,
                unit_price: album.price,
            });
        }
    }

    if problems.is_empty() {
        Ok(priced)
    } else {
        Err(CheckoutRejection { problems })
    }
}

#[must_use]
pub fn order_total(lines: &[PricedLine]) -> Decimal {
    lines.iter().map(PricedLine::subtotal).sum()
}

/// Human-readable receipt number: `R-<order number>-<UTC yyyymmddHHMMSS>`.
///
/// Receipts are one-to-one with orders, so the order number alone makes it unique.
#[must_use]
pub fn receipt_number(order_number: i64, issued_at: Timestamp) -> String {
    format!("R-{order_number}-{}", issued_at.strftime("%Y%m%d%H%M%S"))
}
