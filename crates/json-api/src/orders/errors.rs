//! Order Errors

use salvo::http::StatusError;
use tracing::{debug, error, warn};

use platter_app::domain::orders::OrdersServiceError;

use crate::errors::status_for;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Sql(source) => {
            error!("order storage failed: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Render(source) => {
            error!("failed to render receipt: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Forbidden => {
            debug!("order requested by a non-owner");

            status_for(
                OrdersServiceError::NotFound.class(),
                &OrdersServiceError::NotFound,
            )
        }
        OrdersServiceError::CheckoutAborted(ref source) => {
            warn!("checkout rolled back: {source}");

            status_for(error.class(), &error)
        }
        other => status_for(other.class(), &other),
    }
}
