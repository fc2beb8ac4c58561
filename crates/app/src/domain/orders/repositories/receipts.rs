//! Receipts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::orders::records::{OrderUuid, PaymentMethod, ReceiptRecord, ReceiptUuid};

const CREATE_RECEIPT_SQL: &str = include_str!("../sql/create_receipt.sql");
const GET_RECEIPT_SQL: &str = include_str!("../sql/get_receipt.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReceiptsRepository;

impl PgReceiptsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_receipt(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        receipt: &ReceiptRecord,
    ) -> Result<ReceiptRecord, sqlx::Error> {
        query_as::<Postgres, ReceiptRecord>(CREATE_RECEIPT_SQL)
            .bind(receipt.uuid.into_uuid())
            .bind(receipt.order_uuid.into_uuid())
            .bind(&receipt.number)
            .bind(receipt.payment_method.as_str())
            .bind(SqlxTimestamp::from(receipt.issued_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_receipt(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<ReceiptRecord>, sqlx::Error> {
        query_as::<Postgres, ReceiptRecord>(GET_RECEIPT_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ReceiptRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let payment_method: String = row.try_get("payment_method")?;
        let payment_method =
            payment_method
                .parse::<PaymentMethod>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "payment_method".to_string(),
                    source: Box::new(e),
                })?;

        Ok(Self {
            uuid: ReceiptUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            number: row.try_get("number")?,
            payment_method,
            issued_at: row.try_get::<SqlxTimestamp, _>("issued_at")?.to_jiff(),
        })
    }
}
