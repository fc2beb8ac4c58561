//! Delete Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{categories::errors::into_status_error, extensions::*, state::State};

/// Delete Category Handler
///
/// Albums in the category stay in the catalog without a category.
#[endpoint(
    tags("categories"),
    summary = "Delete Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .categories
        .delete_category(category.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
