//! List Users Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    users::{UsersResponse, errors::into_status_error},
};

/// List Users Handler
///
/// Every registered user, oldest first.
#[endpoint(
    tags("admin"),
    summary = "List Users",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Users"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UsersResponse>, StatusError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let users = state
        .app
        .users
        .list_users()
        .await
        .map_err(into_status_error)?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{ADMIN, CUSTOMER, TEST_USER_UUID, TestServices, make_user};

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/users").get(handler)
    }

    #[tokio::test]
    async fn test_admin_lists_users() -> TestResult {
        let mut services = TestServices::default();

        services
            .users
            .expect_list_users()
            .once()
            .return_once(|| Ok(vec![make_user(TEST_USER_UUID, true)]));

        let mut res = TestClient::get("http://example.com/admin/users")
            .send(&services.serve(Some(ADMIN), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let response: UsersResponse = res.take_json().await?;

        assert_eq!(response.users.len(), 1, "expected one user");
        assert!(response.users[0].is_blocked, "expected a blocked user");

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_cannot_list_users() -> TestResult {
        let mut services = TestServices::default();

        services.users.expect_list_users().never();

        let res = TestClient::get("http://example.com/admin/users")
            .send(&services.serve(Some(CUSTOMER), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
