//! Record storefront domain: catalog, carts, orders and the services around them.

pub mod auth;
pub mod context;
pub mod database;
pub mod documents;
pub mod domain;
pub mod errors;

#[cfg(test)]
mod test;

pub mod uuids;
