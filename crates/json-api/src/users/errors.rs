//! User Errors

use salvo::http::StatusError;
use tracing::error;

use platter_app::domain::users::UsersServiceError;

use crate::errors::status_for;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::Sql(source) => {
            error!("user storage failed: {source}");

            StatusError::internal_server_error()
        }
        other => status_for(other.class(), &other),
    }
}
