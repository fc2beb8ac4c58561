//! Orders
//!
//! Checkout turns a cart into an order in one transaction; payment later flips
//! `is_paid` and issues the order's only receipt.

pub mod data;
pub mod errors;
pub mod records;
mod repositories;
pub mod service;

pub use errors::{BlockedActor, OrdersServiceError};
pub use service::*;
