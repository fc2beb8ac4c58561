//! Albums service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::errors::ErrorClass;

#[derive(Debug, Error)]
pub enum AlbumsServiceError {
    #[error("album already exists")]
    AlreadyExists,

    #[error("album not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("{0}")]
    Validation(&'static str),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl AlbumsServiceError {
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound => ErrorClass::NotFound,
            Self::AlreadyExists => ErrorClass::Conflict,
            Self::InvalidReference
            | Self::MissingRequiredData
            | Self::InvalidData
            | Self::Validation(_) => ErrorClass::ValidationFailed,
            Self::Sql(_) => ErrorClass::Internal,
        }
    }
}

impl From<Error> for AlbumsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
