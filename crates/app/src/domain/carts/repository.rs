//! Carts Repository

use std::collections::BTreeSet;

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{count_to_i32, try_get_count},
    domain::{
        albums::records::AlbumUuid,
        carts::records::{CartLine, CartLineView},
    },
};

const ADD_ITEM_SQL: &str = include_str!("sql/add_item.sql");
const SET_QUANTITY_SQL: &str = include_str!("sql/set_quantity.sql");
const REMOVE_ITEM_SQL: &str = include_str!("sql/remove_item.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");
const DELETE_NON_POSITIVE_SQL: &str = include_str!("sql/delete_non_positive.sql");
const LIST_ITEM_IDS_SQL: &str = include_str!("sql/list_item_ids.sql");
const LIST_LINES_SQL: &str = include_str!("sql/list_lines.sql");
const LOCK_LINES_SQL: &str = include_str!("sql/lock_lines.sql");
const VIEW_CART_SQL: &str = include_str!("sql/view_cart.sql");

/// A raw stored line; quantity may be non-positive until the cart is cleaned.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StoredLine {
    pub(crate) album_uuid: AlbumUuid,
    pub(crate) quantity: i32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a line or grow an existing one, never past `cap`.
    ///
    /// The capped sum is computed by the upsert itself so concurrent adds for the same
    /// line cannot overshoot. Returns the stored quantity.
    pub(crate) async fn add_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &str,
        album: AlbumUuid,
        requested: u32,
        cap: u32,
    ) -> Result<u32, sqlx::Error> {
        let stored: i32 = query_scalar(ADD_ITEM_SQL)
            .bind(cart)
            .bind(album.into_uuid())
            .bind(count_to_i32(requested, "quantity")?)
            .bind(count_to_i32(cap, "quantity")?)
            .fetch_one(&mut **tx)
            .await?;

        u32::try_from(stored).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })
    }

    /// Overwrite the quantity of an existing line. Returns `false` when there is no line.
    pub(crate) async fn set_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &str,
        album: AlbumUuid,
        quantity: u32,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(SET_QUANTITY_SQL)
            .bind(cart)
            .bind(album.into_uuid())
            .bind(count_to_i32(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }

    pub(crate) async fn remove_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &str,
        album: AlbumUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_ITEM_SQL)
            .bind(cart)
            .bind(album.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(cart)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Drop lines whose quantity is zero or negative.
    pub(crate) async fn delete_non_positive(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_NON_POSITIVE_SQL)
            .bind(cart)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_item_ids(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &str,
    ) -> Result<BTreeSet<AlbumUuid>, sqlx::Error> {
        let uuids: Vec<Uuid> = query_scalar(LIST_ITEM_IDS_SQL)
            .bind(cart)
            .fetch_all(&mut **tx)
            .await?;

        Ok(uuids.into_iter().map(AlbumUuid::from_uuid).collect())
    }

    pub(crate) async fn list_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &str,
    ) -> Result<Vec<StoredLine>, sqlx::Error> {
        query_as::<Postgres, StoredLine>(LIST_LINES_SQL)
            .bind(cart)
            .fetch_all(&mut **tx)
            .await
    }

    /// Lock every line of the cart for the rest of the transaction, in album order.
    pub(crate) async fn lock_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &str,
    ) -> Result<Vec<StoredLine>, sqlx::Error> {
        query_as::<Postgres, StoredLine>(LOCK_LINES_SQL)
            .bind(cart)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn view_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &str,
    ) -> Result<Vec<CartLineView>, sqlx::Error> {
        query_as::<Postgres, CartLineView>(VIEW_CART_SQL)
            .bind(cart)
            .fetch_all(&mut **tx)
            .await
    }
}

impl StoredLine {
    /// The line as a positive cart line, or `None` when it should be discarded.
    pub(crate) fn positive(self) -> Option<CartLine> {
        u32::try_from(self.quantity)
            .ok()
            .filter(|quantity| *quantity > 0)
            .map(|quantity| CartLine {
                album_uuid: self.album_uuid,
                quantity,
            })
    }
}

impl<'r> FromRow<'r, PgRow> for StoredLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            album_uuid: AlbumUuid::from_uuid(row.try_get("album_uuid")?),
            quantity: row.try_get("quantity")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineView {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            album_uuid: AlbumUuid::from_uuid(row.try_get("album_uuid")?),
            title: row.try_get("title")?,
            artist: row.try_get("artist")?,
            unit_price: row.try_get("unit_price")?,
            stock: try_get_count(row, "stock")?,
            quantity: try_get_count(row, "quantity")?,
        })
    }
}
