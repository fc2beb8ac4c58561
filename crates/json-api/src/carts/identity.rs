//! Cart identity for a request.

use std::sync::Arc;

use salvo::prelude::{Depot, Request, Response, StatusError};

use platter_app::domain::carts::CartIdentity;

use crate::{extensions::*, state::State};

/// The caller's user id when signed in, otherwise the anonymous cookie token (minted
/// and set on `res` if the client sent none).
pub(crate) fn resolve(
    req: &Request,
    depot: &Depot,
    res: &mut Response,
) -> Result<CartIdentity, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    Ok(CartIdentity::resolve(
        depot.principal().map(|principal| principal.user),
        || state.cart_cookie.get_or_create(req, res),
    ))
}
