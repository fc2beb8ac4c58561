//! Users service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::errors::ErrorClass;

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("user already exists")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl UsersServiceError {
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound => ErrorClass::NotFound,
            Self::AlreadyExists => ErrorClass::Conflict,
            Self::InvalidData => ErrorClass::ValidationFailed,
            Self::Sql(_) => ErrorClass::Internal,
        }
    }
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => {
                Self::Sql(error)
            }
        }
    }
}
