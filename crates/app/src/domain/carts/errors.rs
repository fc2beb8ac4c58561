//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::errors::ErrorClass;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("your account is blocked; the cart cannot be changed")]
    BlockedAccount,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl CartsServiceError {
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::BlockedAccount => ErrorClass::BlockedAccount,
            Self::InvalidData => ErrorClass::ValidationFailed,
            Self::Sql(_) => ErrorClass::Internal,
        }
    }
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(_) | None => Self::Sql(error),
        }
    }
}
