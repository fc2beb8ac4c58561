//! Order Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{count_to_i32, try_get_count},
    domain::{
        albums::records::AlbumUuid,
        orders::{
            data::PricedLine,
            records::{OrderItemRecord, OrderItemUuid, OrderUuid},
        },
    },
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Record one purchased line with its price snapshot.
    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        line: &PricedLine,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(line.album_uuid.into_uuid())
            .bind(count_to_i32(line.quantity, "quantity")?)
            .bind(line.unit_price)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            album_uuid: row
                .try_get::<Option<Uuid>, _>("album_uuid")?
                .map(AlbumUuid::from_uuid),
            title: row.try_get("title")?,
            artist: row.try_get("artist")?,
            quantity: try_get_count(row, "quantity")?,
            unit_price: row.try_get("unit_price")?,
        })
    }
}
