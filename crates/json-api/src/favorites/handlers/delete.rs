//! Remove Favorite Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, favorites::errors::into_status_error, state::State};

/// Remove Favorite Handler
#[endpoint(
    tags("favorites"),
    summary = "Remove Favorite",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Album is no longer a favorite"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
    ),
)]
pub(crate) async fn handler(
    album: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .favorites
        .remove(principal.user, album.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use platter_app::domain::albums::records::AlbumUuid;

    use crate::test_helpers::{CUSTOMER, TEST_USER_UUID, TestServices};

    use super::*;

    #[tokio::test]
    async fn test_remove_favorite_success() -> TestResult {
        let album = AlbumUuid::new();
        let mut services = TestServices::default();

        services
            .favorites
            .expect_remove()
            .once()
            .withf(move |user, a| *user == TEST_USER_UUID && *a == album)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/favorites/{album}"))
            .send(&services.serve(
                Some(CUSTOMER),
                Router::with_path("favorites/{album}").delete(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
