//! Favorites service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        albums::records::AlbumUuid,
        favorites::{errors::FavoritesServiceError, repository::PgFavoritesRepository},
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgFavoritesService {
    db: Db,
    repository: PgFavoritesRepository,
}

impl PgFavoritesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgFavoritesRepository::new(),
        }
    }
}

#[async_trait]
impl FavoritesService for PgFavoritesService {
    async fn add(&self, user: UserUuid, album: AlbumUuid) -> Result<bool, FavoritesServiceError> {
        let mut tx = self.db.begin().await?;

        let added = self.repository.add_favorite(&mut tx, user, album).await?
            || self.repository.favorite_exists(&mut tx, user, album).await?;

        tx.commit().await?;

        debug!(%user, %album, added, "favorite added");

        Ok(added)
    }

    async fn remove(&self, user: UserUuid, album: AlbumUuid) -> Result<(), FavoritesServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.remove_favorite(&mut tx, user, album).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn list_album_ids(&self, user: UserUuid) -> Result<Vec<AlbumUuid>, FavoritesServiceError> {
        let mut tx = self.db.begin().await?;

        let albums = self.repository.list_favorites(&mut tx, user).await?;

        tx.commit().await?;

        Ok(albums)
    }
}

#[automock]
#[async_trait]
pub trait FavoritesService: Send + Sync {
    /// Bookmark an album. Adding an existing favorite succeeds; returns `false` only
    /// when the album does not exist.
    async fn add(&self, user: UserUuid, album: AlbumUuid) -> Result<bool, FavoritesServiceError>;

    /// Remove a bookmark; absent bookmarks are ignored.
    async fn remove(&self, user: UserUuid, album: AlbumUuid) -> Result<(), FavoritesServiceError>;

    /// The user's favorite albums, most recent first.
    async fn list_album_ids(&self, user: UserUuid) -> Result<Vec<AlbumUuid>, FavoritesServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn add_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("fan@example.com").await?;
        let album = ctx.create_album("Loved", Decimal::TEN, 1).await?;

        assert!(ctx.favorites.add(user.uuid, album.uuid).await?);
        assert!(ctx.favorites.add(user.uuid, album.uuid).await?);
        assert_eq!(ctx.favorites.list_album_ids(user.uuid).await?, vec![album.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn add_missing_album_returns_false() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("fan@example.com").await?;

        assert!(!ctx.favorites.add(user.uuid, AlbumUuid::new()).await?);
        assert!(ctx.favorites.list_album_ids(user.uuid).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn remove_deletes_only_that_favorite() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("fan@example.com").await?;
        let kept = ctx.create_album("Kept", Decimal::TEN, 1).await?;
        let dropped = ctx.create_album("Dropped", Decimal::TEN, 1).await?;

        ctx.favorites.add(user.uuid, kept.uuid).await?;
        ctx.favorites.add(user.uuid, dropped.uuid).await?;
        ctx.favorites.remove(user.uuid, dropped.uuid).await?;
        ctx.favorites.remove(user.uuid, dropped.uuid).await?;

        assert_eq!(ctx.favorites.list_album_ids(user.uuid).await?, vec![kept.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_user_is_an_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;
        let album = ctx.create_album("Orphan", Decimal::TEN, 1).await?;

        let result = ctx.favorites.add(UserUuid::new(), album.uuid).await;

        assert!(
            matches!(result, Err(FavoritesServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }
}
