//! Error classification shared by every service.

use std::fmt::{self, Display, Formatter};

/// The coarse category of a service failure, used by callers to choose a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The input was malformed or violated a business rule about its shape.
    ValidationFailed,

    /// A referenced entity does not exist.
    NotFound,

    /// The caller may not act on an entity that exists.
    Forbidden,

    /// The request collides with current state (already paid, insufficient stock).
    Conflict,

    /// The acting account is not allowed to mutate commerce state.
    BlockedAccount,

    /// Storage or rendering failure.
    Internal,
}

impl Display for ErrorClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ValidationFailed => "validation_failed",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Conflict => "conflict",
            Self::BlockedAccount => "blocked_account",
            Self::Internal => "internal",
        })
    }
}
