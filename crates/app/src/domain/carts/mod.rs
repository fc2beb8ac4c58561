//! Carts
//!
//! A cart is the set of line items stored under one [`CartIdentity`]. Quantities are
//! capped per album by [`limits::item_cap`] whenever they grow.

pub mod errors;
pub mod identity;
pub mod limits;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::CartsServiceError;
pub use identity::CartIdentity;
pub use service::*;
