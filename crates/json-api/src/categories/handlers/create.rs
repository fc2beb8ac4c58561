//! Create Category Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use platter_app::domain::categories::{data::NewCategory, records::CategoryUuid};

use crate::{
    categories::{CategoryRequest, CategoryResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Create Category Handler
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryResponse>, StatusError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let category = state
        .app
        .categories
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: request.name,
            description: request.description,
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/categories/{}", category.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(category.into()))
}
