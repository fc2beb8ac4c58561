//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    orders::records::{OrderRecord, OrderStatus, OrderUuid, ShippingInfo},
    users::records::UserUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("../sql/lock_order.sql");
const LIST_ORDERS_FOR_USER_SQL: &str = include_str!("../sql/list_orders_for_user.sql");
const LIST_ALL_ORDERS_SQL: &str = include_str!("../sql/list_all_orders.sql");
const MARK_PAID_SQL: &str = include_str!("../sql/mark_paid.sql");
const SET_STATUS_SQL: &str = include_str!("../sql/set_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
        shipping: &ShippingInfo,
        total: Decimal,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .bind(shipping.first_name.trim())
            .bind(shipping.last_name.trim())
            .bind(shipping.address.trim())
            .bind(shipping.phone.trim())
            .bind(shipping.email.trim())
            .bind(total)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch and lock an order row until the transaction ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_all_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ALL_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Flip `is_paid`. Returns `false` when the order was already paid.
    pub(crate) async fn mark_paid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(MARK_PAID_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }

    pub(crate) async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(SET_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            number: row.try_get("number")?,
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            shipping: ShippingInfo {
                first_name: row.try_get("first_name")?,
                last_name: row.try_get("last_name")?,
                address: row.try_get("address")?,
                phone: row.try_get("phone")?,
                email: row.try_get("email")?,
            },
            total: row.try_get("total")?,
            status,
            is_paid: row.try_get("is_paid")?,
            delivered_at: row
                .try_get::<Option<SqlxTimestamp>, _>("delivered_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
