//! Checkout Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};

use platter_app::domain::{carts::CartIdentity, orders::records::ShippingInfo};

use crate::{
    extensions::*,
    orders::{OrderDetailsResponse, errors::into_status_error},
    state::State,
};

/// Checkout Request
///
/// Omitted fields are filled in from the caller's profile.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

impl CheckoutRequest {
    fn is_complete(&self) -> bool {
        self.first_name.is_some()
            && self.last_name.is_some()
            && self.address.is_some()
            && self.phone.is_some()
            && self.email.is_some()
    }

    fn into_shipping(self, defaults: ShippingInfo) -> ShippingInfo {
        ShippingInfo {
            first_name: self.first_name.unwrap_or(defaults.first_name),
            last_name: self.last_name.unwrap_or(defaults.last_name),
            address: self.address.unwrap_or(defaults.address),
            phone: self.phone.unwrap_or(defaults.phone),
            email: self.email.unwrap_or(defaults.email),
        }
    }
}

/// Checkout Handler
///
/// Turns the caller's cart into an order. Every line is checked against current stock
/// and all problems are reported together; nothing is ordered unless every line passes.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or missing shipping details"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::CONFLICT, description = "Stock or quantity problems"),
        (status_code = StatusCode::LOCKED, description = "Account blocked"),
    ),
)]
#[tracing::instrument(
    name = "orders.checkout",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderDetailsResponse>, StatusError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    tracing::Span::current().record("user_uuid", tracing::field::display(principal.user));

    let shipping = if request.is_complete() {
        request.into_shipping(ShippingInfo::default())
    } else {
        let defaults = state
            .app
            .orders
            .checkout_defaults(principal.user)
            .await
            .map_err(into_status_error)?;

        request.into_shipping(defaults)
    };

    let details = state
        .app
        .orders
        .checkout(&CartIdentity::User(principal.user), principal.user, shipping)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", details.order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(details.into()))
}
