//! Identity Merge
//!
//! Moves an anonymous cart into the user's cart when the shopper signs in.

pub mod service;

pub use service::*;
