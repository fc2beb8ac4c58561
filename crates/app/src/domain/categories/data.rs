//! Category Data

use crate::domain::categories::{errors::CategoriesServiceError, records::CategoryUuid};

/// New Category Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
    pub description: Option<String>,
}

/// Category Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUpdate {
    pub name: String,
    pub description: Option<String>,
}

pub(crate) fn validate_name(name: &str) -> Result<(), CategoriesServiceError> {
    if name.trim().is_empty() {
        return Err(CategoriesServiceError::Validation("name is required"));
    }

    Ok(())
}
