//! List All Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{OrdersResponse, errors::into_status_error},
    state::State,
};

/// List All Orders Handler
///
/// Every customer's orders, newest first.
#[endpoint(
    tags("admin"),
    summary = "List All Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    depot.admin_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_all_orders()
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use platter_app::domain::orders::records::OrderUuid;

    use crate::test_helpers::{ADMIN, CUSTOMER, TEST_USER_UUID, TestServices, make_order};

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/orders").get(handler)
    }

    #[tokio::test]
    async fn test_admin_lists_every_order() -> TestResult {
        let order = OrderUuid::new();
        let mut services = TestServices::default();

        services
            .orders
            .expect_list_all_orders()
            .once()
            .return_once(move || Ok(vec![make_order(order, TEST_USER_UUID, Decimal::ONE)]));

        let mut res = TestClient::get("http://example.com/admin/orders")
            .send(&services.serve(Some(ADMIN), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let response: OrdersResponse = res.take_json().await?;

        assert_eq!(response.orders.len(), 1, "expected one order");
        assert_eq!(response.orders[0].user_uuid, TEST_USER_UUID.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_cannot_list_every_order() -> TestResult {
        let mut services = TestServices::default();

        services.orders.expect_list_all_orders().never();

        let res = TestClient::get("http://example.com/admin/orders")
            .send(&services.serve(Some(CUSTOMER), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
