//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub display_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub delivery_address: Option<String>,
    pub is_admin: bool,

    /// Blocked accounts may browse but cannot place, pay for or grow orders.
    pub is_blocked: bool,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
