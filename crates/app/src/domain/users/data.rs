//! User Data

use crate::domain::users::records::UserUuid;

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub display_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub delivery_address: Option<String>,
    pub is_admin: bool,
}

/// Profile fields a user edits for themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub display_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub delivery_address: Option<String>,
}

impl ProfileUpdate {
    /// Trims every field; blank optional fields become `None`.
    #[must_use]
    pub(crate) fn normalized(self) -> Self {
        let optional = |value: Option<String>| {
            value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            display_name: self.display_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(self.phone),
            delivery_address: optional(self.delivery_address),
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        !self.display_name.trim().is_empty() && self.email.contains('@')
    }
}
