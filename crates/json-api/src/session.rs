//! Session Handler
//!
//! Called by clients right after signing in: the anonymous cart collected before
//! sign-in moves into the user's cart and the anonymous cookie is dropped.

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use platter_app::domain::{
    carts::{CartIdentity, CartsServiceError},
    identity::MergeOutcome,
};

use crate::{errors::status_for, extensions::*, state::State};

/// Session Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    pub user_uuid: Uuid,
    pub is_admin: bool,

    /// Albums moved from the anonymous cart
    pub merged: Vec<Uuid>,

    /// Albums dropped because they are gone or sold out
    pub skipped: Vec<Uuid>,
}

/// Start Session Handler
#[endpoint(
    tags("session"),
    summary = "Start Session",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Anonymous cart merged"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::LOCKED, description = "Account blocked; anonymous cart kept"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let outcome = match state.cart_cookie.token(req) {
        Some(token) => {
            let outcome = state
                .app
                .identity
                .merge_anonymous_cart(&CartIdentity::anonymous(token), principal.user)
                .await
                .map_err(|merge_error| match merge_error {
                    CartsServiceError::Sql(source) => {
                        error!("failed to merge anonymous cart: {source}");

                        StatusError::internal_server_error()
                    }
                    other => status_for(other.class(), &other),
                })?;

            state.cart_cookie.discard(res);

            outcome
        }
        None => MergeOutcome::default(),
    };

    Ok(Json(SessionResponse {
        user_uuid: principal.user.into_uuid(),
        is_admin: principal.is_admin,
        merged: outcome.merged.into_iter().map(Into::into).collect(),
        skipped: outcome.skipped.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::{cookie::Cookie, header::COOKIE},
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use platter_app::domain::albums::records::AlbumUuid;

    use crate::test_helpers::{CUSTOMER, TEST_USER_UUID, TestServices};

    use super::*;

    fn route() -> Router {
        Router::with_path("session").post(handler)
    }

    #[tokio::test]
    async fn test_session_merges_and_discards_the_cookie() -> TestResult {
        let kept = AlbumUuid::new();
        let dropped = AlbumUuid::new();
        let mut services = TestServices::default();

        services
            .identity
            .expect_merge_anonymous_cart()
            .once()
            .withf(|anonymous, user| {
                *anonymous == CartIdentity::anonymous("abc123") && *user == TEST_USER_UUID
            })
            .return_once(move |_, _| {
                Ok(MergeOutcome {
                    merged: vec![kept],
                    skipped: vec![dropped],
                })
            });

        let mut res = TestClient::post("http://example.com/session")
            .add_header(COOKIE, "cart_id=abc123", true)
            .send(&services.serve(Some(CUSTOMER), route()))
            .await;

        let response: SessionResponse = res.take_json().await?;

        assert_eq!(response.merged, vec![kept.into_uuid()]);
        assert_eq!(response.skipped, vec![dropped.into_uuid()]);
        assert_eq!(res.cookie("cart_id").map(Cookie::value), Some(""));

        Ok(())
    }

    #[tokio::test]
    async fn test_session_without_cookie_skips_the_merge() -> TestResult {
        let mut services = TestServices::default();

        services.identity.expect_merge_anonymous_cart().never();

        let response: SessionResponse = TestClient::post("http://example.com/session")
            .send(&services.serve(Some(CUSTOMER), route()))
            .await
            .take_json()
            .await?;

        assert_eq!(response.user_uuid, TEST_USER_UUID.into_uuid());
        assert!(response.merged.is_empty(), "nothing to merge");

        Ok(())
    }

    #[tokio::test]
    async fn test_session_for_blocked_user_keeps_the_cookie() -> TestResult {
        let mut services = TestServices::default();

        services
            .identity
            .expect_merge_anonymous_cart()
            .once()
            .return_once(|_, _| Err(CartsServiceError::BlockedAccount));

        let res = TestClient::post("http://example.com/session")
            .add_header(COOKIE, "cart_id=abc123", true)
            .send(&services.serve(Some(CUSTOMER), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::LOCKED));
        assert!(res.cookie("cart_id").is_none(), "cookie must survive");

        Ok(())
    }

    #[tokio::test]
    async fn test_session_anonymous_returns_401() -> TestResult {
        let mut services = TestServices::default();

        services.identity.expect_merge_anonymous_cart().never();

        let res = TestClient::post("http://example.com/session")
            .add_header(COOKIE, "cart_id=abc123", true)
            .send(&services.serve(None, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
