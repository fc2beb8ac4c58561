//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::errors::ErrorClass;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// The token is malformed, unknown or revoked.
    #[error("token not found")]
    NotFound,

    #[error("user does not exist")]
    InvalidReference,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl AuthServiceError {
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound | Self::InvalidReference => ErrorClass::NotFound,
            Self::Sql(_) => ErrorClass::Internal,
        }
    }
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(_) | None => Self::Sql(error),
        }
    }
}
