//! Storefront Domain Concerns

pub mod albums;
pub mod carts;
pub mod categories;
pub mod favorites;
pub mod identity;
pub mod orders;
pub mod users;
