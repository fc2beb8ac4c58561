//! Cart identity resolution.

use std::fmt::{self, Display, Formatter};

use crate::domain::users::records::UserUuid;

const USER_PREFIX: &str = "user:";
const ANONYMOUS_PREFIX: &str = "anon:";

/// The key that partitions cart line items.
///
/// Authenticated shoppers always use their user id so the cart follows them across
/// devices; everyone else uses an opaque token carried by the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CartIdentity {
    User(UserUuid),
    Anonymous(String),
}

impl CartIdentity {
    /// Pick the identity for a request: the user when authenticated, otherwise the
    /// anonymous token produced by `anonymous_token` (which may mint a new one).
    pub fn resolve(user: Option<UserUuid>, anonymous_token: impl FnOnce() -> String) -> Self {
        match user {
            Some(user) => Self::User(user),
            None => Self::Anonymous(anonymous_token()),
        }
    }

    #[must_use]
    pub fn anonymous(token: impl Into<String>) -> Self {
        Self::Anonymous(token.into())
    }

    /// An anonymous identity with a blank token addresses no cart at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::User(_) => false,
            Self::Anonymous(token) => token.trim().is_empty(),
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<UserUuid> {
        match self {
            Self::User(user) => Some(*user),
            Self::Anonymous(_) => None,
        }
    }

    /// The persisted partition key. The kind prefix keeps a client-chosen anonymous
    /// token from ever addressing a user's cart.
    #[must_use]
    pub fn storage_key(&self) -> String {
        match self {
            Self::User(user) => format!("{USER_PREFIX}{user}"),
            Self::Anonymous(token) => format!("{ANONYMOUS_PREFIX}{}", token.trim()),
        }
    }
}

impl Display for CartIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(user) => write!(f, "user {user}"),
            Self::Anonymous(_) => f.write_str("anonymous cart"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_requests_resolve_to_the_user() {
        let user = UserUuid::new();

        let identity = CartIdentity::resolve(Some(user), || "ignored".to_string());

        assert_eq!(identity, CartIdentity::User(user));
    }

    #[test]
    fn anonymous_requests_use_the_token() {
        let identity = CartIdentity::resolve(None, || "abc".to_string());

        assert_eq!(identity, CartIdentity::anonymous("abc"));
        assert_eq!(identity.user(), None);
    }

    #[test]
    fn storage_keys_never_collide_across_kinds() {
        let user = UserUuid::new();

        let as_user = CartIdentity::User(user).storage_key();
        let spoofed = CartIdentity::anonymous(user.to_string()).storage_key();

        assert_ne!(as_user, spoofed);
    }

    #[test]
    fn blank_anonymous_token_is_empty() {
        assert!(CartIdentity::anonymous("").is_empty());
        assert!(CartIdentity::anonymous("  ").is_empty());
        assert!(!CartIdentity::anonymous("t").is_empty());
        assert!(!CartIdentity::User(UserUuid::new()).is_empty());
    }
}
