//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::carts::records::{CartLineView, CartView};

use crate::{
    carts::{errors::into_status_error, identity},
    extensions::*,
    state::State,
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The lines in the cart
    pub items: Vec<CartItemResponse>,

    /// Sum of every line subtotal at current prices
    pub total: String,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        Self {
            total: view.total().to_string(),
            items: view.lines.into_iter().map(CartItemResponse::from).collect(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub album_uuid: Uuid,
    pub title: String,
    pub artist: String,

    /// Current catalog price of one unit
    pub unit_price: String,

    /// Units the catalog has left
    pub stock: u32,

    pub quantity: u32,
    pub subtotal: String,
}

impl From<CartLineView> for CartItemResponse {
    fn from(line: CartLineView) -> Self {
        Self {
            album_uuid: line.album_uuid.into_uuid(),
            subtotal: line.subtotal().to_string(),
            unit_price: line.unit_price.to_string(),
            title: line.title,
            artist: line.artist,
            stock: line.stock,
            quantity: line.quantity,
        }
    }
}

/// The caller's cart, priced.
pub(crate) async fn current_cart(
    req: &Request,
    depot: &Depot,
    res: &mut Response,
) -> Result<CartResponse, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = identity::resolve(req, depot, res)?;

    let view = state
        .app
        .carts
        .view(&identity)
        .await
        .map_err(into_status_error)?;

    Ok(view.into())
}

/// Get Cart Handler
///
/// Returns the caller's cart with current prices and stock.
#[endpoint(tags("cart"), summary = "Get Cart")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, StatusError> {
    Ok(Json(current_cart(req, depot, res).await?))
}
