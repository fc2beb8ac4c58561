//! Pay Order Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::orders::records::PaymentMethod;

use crate::{
    extensions::*,
    orders::{ReceiptResponse, errors::into_status_error},
    state::State,
};

/// Payment Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentRequest {
    /// `cash`, `card`, `bank_transfer`, `paypal` or `blik`; defaults to `card`
    #[serde(default)]
    pub method: Option<String>,
}

impl PaymentRequest {
    fn method(&self) -> Result<PaymentMethod, StatusError> {
        match &self.method {
            Some(method) => method.parse().or_400("invalid payment method"),
            None => Ok(PaymentMethod::default()),
        }
    }
}

/// Pay Order Handler
///
/// Marks the order paid and issues its receipt. An order is paid at most once.
#[endpoint(
    tags("orders"),
    summary = "Pay Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order paid, receipt issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown payment method"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order already paid"),
        (status_code = StatusCode::LOCKED, description = "Account blocked"),
    ),
)]
#[tracing::instrument(
    name = "orders.pay",
    skip(order, json, depot, res),
    fields(order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<PaymentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReceiptResponse>, StatusError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = order.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(order));

    let method = json.into_inner().method()?;

    let receipt = state
        .app
        .orders
        .pay(order.into(), method, principal.user, principal.is_admin)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(receipt.into()))
}
