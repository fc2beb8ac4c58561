//! List Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{OrdersResponse, errors::into_status_error},
    state::State,
};

/// List Orders Handler
///
/// The caller's own orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_orders_for_user(principal.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}
