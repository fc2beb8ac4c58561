//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{OrderDetailsResponse, errors::into_status_error},
    state::State,
};

/// Get Order Handler
///
/// An order with its items and receipt. Customers only see their own orders.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderDetailsResponse>, StatusError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let details = state
        .app
        .orders
        .get_order(order.into_inner().into(), principal.user, principal.is_admin)
        .await
        .map_err(into_status_error)?;

    Ok(Json(details.into()))
}
