//! Album Errors

use salvo::http::StatusError;
use tracing::error;

use platter_app::domain::albums::AlbumsServiceError;

use crate::errors::status_for;

pub(crate) fn into_status_error(error: AlbumsServiceError) -> StatusError {
    match error {
        AlbumsServiceError::Sql(source) => {
            error!("album storage failed: {source}");

            StatusError::internal_server_error()
        }
        AlbumsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Category does not exist")
        }
        other => status_for(other.class(), &other),
    }
}
