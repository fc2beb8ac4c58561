//! Orders service errors.

use std::fmt::{self, Display, Formatter};

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{
    documents::RenderError,
    domain::orders::{data::CheckoutRejection, records::UnknownStatus},
    errors::ErrorClass,
};

/// Whose account blocked the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockedActor {
    /// The shopper checking out.
    Customer,

    /// The user who placed the order being paid.
    OrderOwner,

    /// The user asking to pay.
    Requester,
}

impl Display for BlockedActor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Customer => "your account is blocked; orders cannot be placed",
            Self::OrderOwner => "the account that placed this order is blocked",
            Self::Requester => "your account is blocked; payments are not allowed",
        })
    }
}

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("order belongs to another user")]
    Forbidden,

    #[error("the cart is empty")]
    EmptyCart,

    #[error("invalid shipping details: {0}")]
    InvalidShipping(&'static str),

    #[error(transparent)]
    InvalidStatus(#[from] UnknownStatus),

    #[error("order is already paid")]
    AlreadyPaid,

    #[error("checkout rejected: {0}")]
    Rejected(CheckoutRejection),

    #[error("{0}")]
    Blocked(BlockedActor),

    #[error("order has no receipt yet")]
    MissingReceipt,

    #[error("checkout could not be completed; nothing was ordered")]
    CheckoutAborted(#[source] Error),

    #[error("receipt could not be rendered")]
    Render(#[from] RenderError),

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl OrdersServiceError {
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound | Self::MissingReceipt => ErrorClass::NotFound,
            Self::Forbidden => ErrorClass::Forbidden,
            Self::EmptyCart | Self::InvalidShipping(_) | Self::InvalidStatus(_) | Self::InvalidData => {
                ErrorClass::ValidationFailed
            }
            Self::AlreadyPaid | Self::Rejected(_) | Self::CheckoutAborted(_) => {
                ErrorClass::Conflict
            }
            Self::Blocked(_) => ErrorClass::BlockedAccount,
            Self::Render(_) | Self::Sql(_) => ErrorClass::Internal,
        }
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyPaid,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(_) | None => Self::Sql(error),
        }
    }
}
