//! Category Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    categories::{CategoryResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    /// Categories ordered by name
    pub categories: Vec<CategoryResponse>,
}

/// Category Index Handler
#[endpoint(tags("categories"), summary = "List Categories")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoriesResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}
