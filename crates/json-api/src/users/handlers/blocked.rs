//! Block User Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    users::{UserResponse, errors::into_status_error},
};

/// Block Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct BlockRequest {
    /// Target state; the flag is toggled when omitted
    #[serde(default)]
    pub blocked: Option<bool>,
}

/// Block User Handler
///
/// Blocked users can still sign in and browse, but cannot change carts, check out or pay.
#[endpoint(
    tags("admin"),
    summary = "Block User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Blocked flag updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
#[tracing::instrument(
    name = "users.set_blocked",
    skip(user, json, depot),
    fields(user_uuid = tracing::field::Empty, blocked = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<BlockRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = user.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));

    let updated = match json.into_inner().blocked {
        Some(blocked) => state.app.users.set_blocked(user.into(), blocked).await,
        None => state.app.users.toggle_blocked(user.into()).await,
    }
    .map_err(into_status_error)?;

    span.record("blocked", updated.is_blocked);

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use platter_app::domain::users::UsersServiceError;

    use crate::test_helpers::{ADMIN, CUSTOMER, TEST_USER_UUID, TestServices, make_user};

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/users/{user}/blocked").put(handler)
    }

    fn url() -> String {
        format!("http://example.com/admin/users/{TEST_USER_UUID}/blocked")
    }

    #[tokio::test]
    async fn test_explicit_flag_sets_blocked() -> TestResult {
        let mut services = TestServices::default();

        services.users.expect_toggle_blocked().never();

        services
            .users
            .expect_set_blocked()
            .once()
            .withf(|user, blocked| *user == TEST_USER_UUID && *blocked)
            .return_once(|user, blocked| Ok(make_user(user, blocked)));

        let mut res = TestClient::put(url())
            .json(&json!({ "blocked": true }))
            .send(&services.serve(Some(ADMIN), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let response: UserResponse = res.take_json().await?;

        assert!(response.is_blocked, "expected the user to be blocked");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_flag_toggles() -> TestResult {
        let mut services = TestServices::default();

        services.users.expect_set_blocked().never();

        services
            .users
            .expect_toggle_blocked()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|user| Ok(make_user(user, false)));

        let mut res = TestClient::put(url())
            .json(&json!({}))
            .send(&services.serve(Some(ADMIN), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let response: UserResponse = res.take_json().await?;

        assert!(!response.is_blocked, "expected the user to be unblocked");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_user_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .users
            .expect_set_blocked()
            .once()
            .return_once(|_, _| Err(UsersServiceError::NotFound));

        let res = TestClient::put(url())
            .json(&json!({ "blocked": false }))
            .send(&services.serve(Some(ADMIN), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_cannot_block_users() -> TestResult {
        let mut services = TestServices::default();

        services.users.expect_set_blocked().never();
        services.users.expect_toggle_blocked().never();

        let res = TestClient::put(url())
            .json(&json!({ "blocked": true }))
            .send(&services.serve(Some(CUSTOMER), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
