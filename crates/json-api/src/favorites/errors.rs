//! Favorite Errors

use salvo::http::StatusError;
use tracing::error;

use platter_app::domain::favorites::FavoritesServiceError;

use crate::errors::status_for;

pub(crate) fn into_status_error(error: FavoritesServiceError) -> StatusError {
    match error {
        FavoritesServiceError::Sql(source) => {
            error!("favorite storage failed: {source}");

            StatusError::internal_server_error()
        }
        other => status_for(other.class(), &other),
    }
}
