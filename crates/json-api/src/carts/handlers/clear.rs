//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, identity},
    extensions::*,
    state::State,
};

/// Clear Cart Handler
///
/// Removes every line from the caller's cart.
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    responses((status_code = StatusCode::OK, description = "Cart cleared")),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = identity::resolve(req, depot, res)?;

    state
        .app
        .carts
        .clear(&identity)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
