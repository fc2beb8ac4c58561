//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{
        errors::into_status_error,
        get::{CartResponse, current_cart},
        identity,
    },
    extensions::*,
    state::State,
};

const fn default_quantity() -> i32 {
    1
}

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub album_uuid: Uuid,

    /// Units to add; defaults to one. The line never grows past the per-item cap.
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

/// Add Cart Item Handler
///
/// Adds units of an album, growing an existing line up to the smaller of five and the
/// album's stock.
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    responses(
        (status_code = StatusCode::OK, description = "Item added; the updated cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Quantity below one"),
        (status_code = StatusCode::CONFLICT, description = "Album missing or sold out"),
        (status_code = StatusCode::LOCKED, description = "Account blocked"),
    ),
)]
#[tracing::instrument(
    name = "cart.add",
    skip(json, req, depot, res),
    fields(album_uuid = tracing::field::Empty, quantity = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("album_uuid", tracing::field::display(request.album_uuid));
    span.record("quantity", request.quantity);

    if request.quantity < 1 {
        return Err(StatusError::bad_request().brief("Quantity must be at least 1"));
    }

    let identity = identity::resolve(req, depot, res)?;

    let added = state
        .app
        .carts
        .add(&identity, request.album_uuid.into(), request.quantity)
        .await
        .map_err(into_status_error)?;

    if !added {
        return Err(StatusError::conflict().brief("Album is unavailable"));
    }

    Ok(Json(current_cart(req, depot, res).await?))
}
