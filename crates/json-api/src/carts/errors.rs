//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use platter_app::domain::carts::CartsServiceError;

use crate::errors::status_for;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::Sql(source) => {
            error!("cart storage failed: {source}");

            StatusError::internal_server_error()
        }
        other => status_for(other.class(), &other),
    }
}
