//! Category Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::categories::{data::CategoryUpdate, records::CategoryRecord};

/// Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryRequest {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl From<CategoryRequest> for CategoryUpdate {
    fn from(request: CategoryRequest) -> Self {
        CategoryUpdate {
            name: request.name,
            description: request.description,
        }
    }
}

/// Category Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        Self {
            uuid: category.uuid.into_uuid(),
            name: category.name,
            description: category.description,
            created_at: category.created_at.to_string(),
            updated_at: category.updated_at.to_string(),
        }
    }
}
