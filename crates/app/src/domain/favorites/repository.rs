//! Favorites Repository

use sqlx::{Postgres, Transaction, query, query_scalar};
use uuid::Uuid;

use crate::domain::{albums::records::AlbumUuid, users::records::UserUuid};

const ADD_FAVORITE_SQL: &str = include_str!("sql/add_favorite.sql");
const FAVORITE_EXISTS_SQL: &str = include_str!("sql/favorite_exists.sql");
const REMOVE_FAVORITE_SQL: &str = include_str!("sql/remove_favorite.sql");
const LIST_FAVORITES_SQL: &str = include_str!("sql/list_favorites.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgFavoritesRepository;

impl PgFavoritesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Bookmark an album. Returns `false` when the album does not exist or is already
    /// a favorite.
    pub(crate) async fn add_favorite(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        album: AlbumUuid,
    ) -> Result<bool, sqlx::Error> {
        let inserted: Option<Uuid> = query_scalar(ADD_FAVORITE_SQL)
            .bind(user.into_uuid())
            .bind(album.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(inserted.is_some())
    }

    pub(crate) async fn favorite_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        album: AlbumUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(FAVORITE_EXISTS_SQL)
            .bind(user.into_uuid())
            .bind(album.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn remove_favorite(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        album: AlbumUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_FAVORITE_SQL)
            .bind(user.into_uuid())
            .bind(album.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_favorites(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<AlbumUuid>, sqlx::Error> {
        let uuids: Vec<Uuid> = query_scalar(LIST_FAVORITES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(uuids.into_iter().map(AlbumUuid::from_uuid).collect())
    }
}
