//! Download Receipt Handler

use std::sync::Arc;

use salvo::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    oapi::extract::PathParam,
    prelude::*,
};
use uuid::Uuid;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Download Receipt Handler
///
/// The rendered receipt of a paid order, as an attachment.
#[endpoint(
    tags("orders"),
    summary = "Download Receipt",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Receipt document"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found or not paid yet"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let document = state
        .app
        .orders
        .generate_receipt_document(order.into_inner().into(), principal.user, principal.is_admin)
        .await
        .map_err(into_status_error)?;

    res.add_header(CONTENT_TYPE, document.content_type, true)
        .or_500("failed to set content type header")?
        .add_header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.file_name),
            true,
        )
        .or_500("failed to set content disposition header")?
        .body(document.bytes);

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use platter_app::{
        documents::RenderedDocument,
        domain::orders::{OrdersServiceError, records::OrderUuid},
    };

    use crate::test_helpers::{CUSTOMER, TEST_USER_UUID, TestServices};

    use super::*;

    fn route() -> Router {
        Router::with_path("orders/{order}/receipt").get(handler)
    }

    #[tokio::test]
    async fn test_receipt_is_served_as_attachment() -> TestResult {
        let order = OrderUuid::new();
        let mut services = TestServices::default();

        services
            .orders
            .expect_generate_receipt_document()
            .once()
            .withf(move |o, requester, is_admin| {
                *o == order && *requester == TEST_USER_UUID && !*is_admin
            })
            .return_once(|_, _, _| {
                Ok(RenderedDocument {
                    file_name: "receipt_R-7-20260101120000.txt".to_string(),
                    content_type: "text/plain; charset=utf-8",
                    bytes: b"RECEIPT R-7-20260101120000".to_vec(),
                })
            });

        let mut res = TestClient::get(format!("http://example.com/orders/{order}/receipt"))
            .send(&services.serve(Some(CUSTOMER), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let disposition = res
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        assert_eq!(
            disposition.as_deref(),
            Some("attachment; filename=\"receipt_R-7-20260101120000.txt\"")
        );
        assert_eq!(res.take_string().await?, "RECEIPT R-7-20260101120000");

        Ok(())
    }

    #[tokio::test]
    async fn test_unpaid_order_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .orders
            .expect_generate_receipt_document()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::MissingReceipt));

        let res = TestClient::get(format!("http://example.com/orders/{}/receipt", Uuid::now_v7()))
            .send(&services.serve(Some(CUSTOMER), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_foreign_receipt_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .orders
            .expect_generate_receipt_document()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::Forbidden));

        let mut res = TestClient::get(format!("http://example.com/orders/{}/receipt", Uuid::now_v7()))
            .send(&services.serve(Some(CUSTOMER), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let body = res.take_string().await?;

        assert!(!body.contains("another user"), "got {body}");

        Ok(())
    }
}
