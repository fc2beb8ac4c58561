//! Update Album Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    albums::{AlbumRequest, errors::into_status_error, get::AlbumResponse},
    extensions::*,
    state::State,
};

/// Update Album Handler
///
/// Replaces every album field, including the stock level.
#[endpoint(
    tags("albums"),
    summary = "Update Album",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Album updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Album not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
#[tracing::instrument(
    name = "albums.update",
    skip(album, json, depot),
    fields(album_uuid = tracing::field::Empty, stock = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    album: PathParam<Uuid>,
    json: JsonBody<AlbumRequest>,
    depot: &mut Depot,
) -> Result<Json<AlbumResponse>, StatusError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let album = album.into_inner();
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("album_uuid", tracing::field::display(album));
    span.record("stock", request.stock);

    let updated = state
        .app
        .albums
        .update_album(album.into(), request.try_into()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use platter_app::domain::albums::{AlbumsServiceError, records::AlbumUuid};

    use crate::{
        albums::tests::album_body,
        test_helpers::{ADMIN, TestServices, make_album},
    };

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.serve(
            Some(ADMIN),
            Router::with_path("albums/{album}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_replaces_stock() -> TestResult {
        let uuid = AlbumUuid::new();
        let mut services = TestServices::default();

        services
            .albums
            .expect_update_album()
            .once()
            .withf(move |album, details| *album == uuid && details.stock == 4)
            .return_once(move |_, details| Ok(make_album(uuid, details.price, details.stock)));

        let response: AlbumResponse = TestClient::put(format!("http://example.com/albums/{uuid}"))
            .json(&album_body("19.99"))
            .send(&make_service(services))
            .await
            .take_json()
            .await?;

        assert_eq!(response.stock, 4);
        assert_eq!(response.price, Decimal::new(19_99, 2).to_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_album_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .albums
            .expect_update_album()
            .once()
            .return_once(|_, _| Err(AlbumsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/albums/{}", Uuid::now_v7()))
            .json(&album_body("19.99"))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_category_returns_400() -> TestResult {
        let mut services = TestServices::default();

        services
            .albums
            .expect_update_album()
            .once()
            .return_once(|_, _| Err(AlbumsServiceError::InvalidReference));

        let res = TestClient::put(format!("http://example.com/albums/{}", Uuid::now_v7()))
            .json(&album_body("19.99"))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
