//! Category Errors

use salvo::http::StatusError;
use tracing::error;

use platter_app::domain::categories::CategoriesServiceError;

use crate::errors::status_for;

pub(crate) fn into_status_error(error: CategoriesServiceError) -> StatusError {
    match error {
        CategoriesServiceError::Sql(source) => {
            error!("category storage failed: {source}");

            StatusError::internal_server_error()
        }
        other => status_for(other.class(), &other),
    }
}
