//! Auth records.

use jiff::Timestamp;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// User Token UUID
pub type UserTokenUuid = TypedUuid<UserTokenRecord>;

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user: UserUuid,
    pub is_admin: bool,
}

/// Token metadata persisted in storage. The token itself is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTokenRecord {
    pub uuid: UserTokenUuid,
    pub user_uuid: UserUuid,
    pub created_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}

/// Token issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub record: UserTokenRecord,
}
