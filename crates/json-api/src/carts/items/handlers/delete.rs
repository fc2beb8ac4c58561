//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{
        errors::into_status_error,
        get::{CartResponse, current_cart},
        identity,
    },
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
///
/// Removing an album that is not in the cart succeeds.
#[endpoint(tags("cart"), summary = "Remove Item from Cart")]
pub(crate) async fn handler(
    album: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = identity::resolve(req, depot, res)?;

    state
        .app
        .carts
        .remove(&identity, album.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(current_cart(req, depot, res).await?))
}

#[cfg(test)]
mod tests {
    use salvo::{http::header::COOKIE, test::TestClient};
    use testresult::TestResult;

    use platter_app::domain::{
        albums::records::AlbumUuid,
        carts::{CartIdentity, records::CartView},
    };

    use crate::test_helpers::TestServices;

    use super::*;

    #[tokio::test]
    async fn test_remove_from_anonymous_cart() -> TestResult {
        let album = AlbumUuid::new();
        let mut services = TestServices::default();

        services
            .carts
            .expect_remove()
            .once()
            .withf(move |identity, uuid| {
                *identity == CartIdentity::anonymous("abc123") && *uuid == album
            })
            .return_once(|_, _| Ok(()));

        services
            .carts
            .expect_view()
            .once()
            .return_once(|_| Ok(CartView::default()));

        let res = TestClient::delete(format!("http://example.com/cart/items/{album}"))
            .add_header(COOKIE, "cart_id=abc123", true)
            .send(&services.serve(
                None,
                Router::with_path("cart/items/{album}").delete(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
