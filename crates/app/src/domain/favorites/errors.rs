//! Favorites service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::errors::ErrorClass;

#[derive(Debug, Error)]
pub enum FavoritesServiceError {
    #[error("user or album does not exist")]
    InvalidReference,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl FavoritesServiceError {
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidReference => ErrorClass::NotFound,
            Self::Sql(_) => ErrorClass::Internal,
        }
    }
}

impl From<Error> for FavoritesServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(_) | None => Self::Sql(error),
        }
    }
}
