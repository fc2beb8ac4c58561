//! List Favorites Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    favorites::{FavoritesResponse, errors::into_status_error},
    state::State,
};

/// List Favorites Handler
#[endpoint(
    tags("favorites"),
    summary = "List Favorites",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Favorite album ids"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<FavoritesResponse>, StatusError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let albums = state
        .app
        .favorites
        .list_album_ids(principal.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(albums.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use platter_app::domain::albums::records::AlbumUuid;

    use crate::test_helpers::{CUSTOMER, TEST_USER_UUID, TestServices};

    use super::*;

    #[tokio::test]
    async fn test_list_favorites_returns_album_ids() -> TestResult {
        let album = AlbumUuid::new();
        let mut services = TestServices::default();

        services
            .favorites
            .expect_list_album_ids()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(vec![album]));

        let mut res = TestClient::get("http://example.com/favorites")
            .send(&services.serve(Some(CUSTOMER), Router::with_path("favorites").get(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let response: FavoritesResponse = res.take_json().await?;

        assert_eq!(response.album_uuids, vec![album.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_favorites_anonymous_returns_401() -> TestResult {
        let mut services = TestServices::default();

        services.favorites.expect_list_album_ids().never();

        let res = TestClient::get("http://example.com/favorites")
            .send(&services.serve(None, Router::with_path("favorites").get(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
