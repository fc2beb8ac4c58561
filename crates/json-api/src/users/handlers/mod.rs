//! User Handlers

pub(crate) mod blocked;
pub(crate) mod index;
pub(crate) mod profile;
pub(crate) mod update_profile;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::users::records::UserRecord;

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub display_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub delivery_address: Option<String>,
    pub is_admin: bool,

    /// Blocked users keep their data but cannot shop
    pub is_blocked: bool,

    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid.into_uuid(),
            display_name: user.display_name,
            email: user.email,
            phone: user.phone,
            delivery_address: user.delivery_address,
            is_admin: user.is_admin,
            is_blocked: user.is_blocked,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// Users Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    pub users: Vec<UserResponse>,
}
