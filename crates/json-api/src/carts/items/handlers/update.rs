//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
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

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity, clamped to the per-item cap. Zero or less removes the line.
    pub quantity: i32,
}

/// Update Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Set Cart Item Quantity",
    responses(
        (status_code = StatusCode::OK, description = "The updated cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Album not in the cart"),
        (status_code = StatusCode::LOCKED, description = "Account blocked"),
    ),
)]
pub(crate) async fn handler(
    album: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = identity::resolve(req, depot, res)?;

    let changed = state
        .app
        .carts
        .set_quantity(&identity, album.into_inner().into(), json.into_inner().quantity)
        .await
        .map_err(into_status_error)?;

    if !changed {
        return Err(StatusError::not_found().brief("Album is not in the cart"));
    }

    Ok(Json(current_cart(req, depot, res).await?))
}
