//! State

use std::sync::Arc;

use platter_app::context::AppContext;

use crate::cart_cookie::CartCookie;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) cart_cookie: CartCookie,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, cart_cookie: CartCookie) -> Self {
        Self { app, cart_cookie }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, cart_cookie: CartCookie) -> Arc<Self> {
        Arc::new(Self::new(app, cart_cookie))
    }
}
