//! Albums Repository
//!
//! Every write to `albums.stock` goes through this repository, including the
//! decrement performed when an order is placed.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{count_to_i32, try_get_count},
    domain::{
        albums::{
            data::{AlbumDetails, AlbumFilter, AlbumSort},
            records::{AlbumRecord, AlbumUuid},
        },
        categories::records::CategoryUuid,
    },
};

const LIST_ALBUMS_SQL: &str = include_str!("sql/list_albums.sql");
const GET_ALBUM_SQL: &str = include_str!("sql/get_album.sql");
const LOCK_ALBUMS_SQL: &str = include_str!("sql/lock_albums.sql");
const CREATE_ALBUM_SQL: &str = include_str!("sql/create_album.sql");
const UPDATE_ALBUM_SQL: &str = include_str!("sql/update_album.sql");
const DELETE_ALBUM_SQL: &str = include_str!("sql/delete_album.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAlbumsRepository;

impl PgAlbumsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_albums(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: AlbumFilter,
        sort: AlbumSort,
    ) -> Result<Vec<AlbumRecord>, sqlx::Error> {
        query_as::<Postgres, AlbumRecord>(LIST_ALBUMS_SQL)
            .bind(filter.category.map(CategoryUuid::into_uuid))
            .bind(filter.availability.as_sql())
            .bind(sort.as_sql())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_album(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        album: AlbumUuid,
    ) -> Result<Option<AlbumRecord>, sqlx::Error> {
        query_as::<Postgres, AlbumRecord>(GET_ALBUM_SQL)
            .bind(album.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Lock the given album rows for the rest of the transaction.
    ///
    /// Rows are locked in uuid order so concurrent checkouts over overlapping albums
    /// cannot deadlock. Unknown uuids are simply absent from the result.
    pub(crate) async fn lock_albums(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        albums: &[AlbumUuid],
    ) -> Result<Vec<AlbumRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = albums.iter().copied().map(AlbumUuid::into_uuid).collect();

        query_as::<Postgres, AlbumRecord>(LOCK_ALBUMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_album(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        album: AlbumUuid,
        details: AlbumDetails,
    ) -> Result<AlbumRecord, sqlx::Error> {
        let stock = count_to_i32(details.stock, "stock")?;

        query_as::<Postgres, AlbumRecord>(CREATE_ALBUM_SQL)
            .bind(album.into_uuid())
            .bind(details.title)
            .bind(details.artist)
            .bind(details.price)
            .bind(details.cover_url)
            .bind(stock)
            .bind(details.description)
            .bind(details.category_uuid.map(CategoryUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_album(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        album: AlbumUuid,
        details: AlbumDetails,
    ) -> Result<AlbumRecord, sqlx::Error> {
        let stock = count_to_i32(details.stock, "stock")?;

        query_as::<Postgres, AlbumRecord>(UPDATE_ALBUM_SQL)
            .bind(album.into_uuid())
            .bind(details.title)
            .bind(details.artist)
            .bind(details.price)
            .bind(details.cover_url)
            .bind(stock)
            .bind(details.description)
            .bind(details.category_uuid.map(CategoryUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_album(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        album: AlbumUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ALBUM_SQL)
            .bind(album.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Take `quantity` units out of stock. Returns `false` when the stock would go negative.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        album: AlbumUuid,
        quantity: u32,
    ) -> Result<bool, sqlx::Error> {
        let quantity = count_to_i32(quantity, "stock")?;

        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(album.into_uuid())
            .bind(quantity)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }
}

impl<'r> FromRow<'r, PgRow> for AlbumRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AlbumUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            artist: row.try_get("artist")?,
            price: row.try_get("price")?,
            cover_url: row.try_get("cover_url")?,
            stock: try_get_count(row, "stock")?,
            description: row.try_get("description")?,
            category_uuid: row
                .try_get::<Option<Uuid>, _>("category_uuid")?
                .map(CategoryUuid::from_uuid),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
