//! Carts
//!
//! Signed-in shoppers use their own cart; everyone else is tracked by the anonymous
//! cart cookie, created by the first request that touches a cart.

mod errors;
mod handlers;
mod identity;
pub(crate) mod items;

pub(crate) use handlers::*;
