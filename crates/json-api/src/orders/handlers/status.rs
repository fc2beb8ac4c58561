//! Change Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderStatusRequest {
    /// `pending`, `shipped` or `delivered`
    pub status: String,
}

/// Change Order Status Handler
///
/// Moving an order to `delivered` stamps its delivery time.
#[endpoint(
    tags("admin"),
    summary = "Change Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
#[tracing::instrument(
    name = "orders.change_status",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<OrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = order.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(order));

    let order = state
        .app
        .orders
        .change_status(order.into(), &json.into_inner().status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
