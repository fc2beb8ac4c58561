//! Category Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,

    /// Display name. Unique by convention only.
    pub name: String,

    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
