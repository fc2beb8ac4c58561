//! Update Category Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    categories::{CategoryRequest, CategoryResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Update Category Handler
#[endpoint(
    tags("categories"),
    summary = "Update Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .update_category(category.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use platter_app::domain::categories::{CategoriesServiceError, records::CategoryUuid};

    use crate::{
        categories::tests::make_category,
        test_helpers::{ADMIN, CUSTOMER, TestServices},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("categories/{category}").put(handler)
    }

    #[tokio::test]
    async fn test_update_renames_category() -> TestResult {
        let uuid = CategoryUuid::new();
        let mut services = TestServices::default();

        services
            .categories
            .expect_update_category()
            .once()
            .withf(move |category, update| *category == uuid && update.name == "Free Jazz")
            .return_once(move |_, update| Ok(make_category(uuid, &update.name)));

        let response: CategoryResponse =
            TestClient::put(format!("http://example.com/categories/{uuid}"))
                .json(&json!({ "name": "Free Jazz" }))
                .send(&services.serve(Some(ADMIN), route()))
                .await
                .take_json()
                .await?;

        assert_eq!(response.name, "Free Jazz");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_category_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .categories
            .expect_update_category()
            .once()
            .return_once(|_, _| Err(CategoriesServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/categories/{}", Uuid::now_v7()))
            .json(&json!({ "name": "Free Jazz" }))
            .send(&services.serve(Some(ADMIN), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_as_customer_returns_403() -> TestResult {
        let mut services = TestServices::default();

        services.categories.expect_update_category().never();

        let res = TestClient::put(format!("http://example.com/categories/{}", Uuid::now_v7()))
            .json(&json!({ "name": "Free Jazz" }))
            .send(&services.serve(Some(CUSTOMER), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
