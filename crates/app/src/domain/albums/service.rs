//! Albums service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::albums::{
        data::{AlbumDetails, AlbumFilter, AlbumSort, NewAlbum},
        errors::AlbumsServiceError,
        records::{AlbumRecord, AlbumUuid},
        repository::PgAlbumsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAlbumsService {
    db: Db,
    repository: PgAlbumsRepository,
}

impl PgAlbumsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAlbumsRepository::new(),
        }
    }
}

#[async_trait]
impl AlbumsService for PgAlbumsService {
    async fn list_albums(
        &self,
        filter: AlbumFilter,
        sort: AlbumSort,
    ) -> Result<Vec<AlbumRecord>, AlbumsServiceError> {
        let mut tx = self.db.begin().await?;

        let albums = self.repository.list_albums(&mut tx, filter, sort).await?;

        tx.commit().await?;

        Ok(albums)
    }

    async fn get_album(&self, album: AlbumUuid) -> Result<AlbumRecord, AlbumsServiceError> {
        let mut tx = self.db.begin().await?;

        let album = self
            .repository
            .find_album(&mut tx, album)
            .await?
            .ok_or(AlbumsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(album)
    }

    async fn create_album(&self, album: NewAlbum) -> Result<AlbumRecord, AlbumsServiceError> {
        album.details.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_album(&mut tx, album.uuid, album.details)
            .await?;

        tx.commit().await?;

        info!(album = %created.uuid, stock = created.stock, "album created");

        Ok(created)
    }

    async fn update_album(
        &self,
        album: AlbumUuid,
        details: AlbumDetails,
    ) -> Result<AlbumRecord, AlbumsServiceError> {
        details.validate()?;

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_album(&mut tx, album, details).await?;

        tx.commit().await?;

        info!(album = %updated.uuid, stock = updated.stock, "album updated");

        Ok(updated)
    }

    async fn delete_album(&self, album: AlbumUuid) -> Result<(), AlbumsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_album(&mut tx, album).await?;

        if rows_affected == 0 {
            return Err(AlbumsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%album, "album deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AlbumsService: Send + Sync {
    /// Retrieves albums matching the filter in the requested order.
    async fn list_albums(
        &self,
        filter: AlbumFilter,
        sort: AlbumSort,
    ) -> Result<Vec<AlbumRecord>, AlbumsServiceError>;

    /// Retrieve a single album.
    async fn get_album(&self, album: AlbumUuid) -> Result<AlbumRecord, AlbumsServiceError>;

    /// Creates a new album.
    async fn create_album(&self, album: NewAlbum) -> Result<AlbumRecord, AlbumsServiceError>;

    /// Replaces an album's details, including its stock level.
    async fn update_album(
        &self,
        album: AlbumUuid,
        details: AlbumDetails,
    ) -> Result<AlbumRecord, AlbumsServiceError>;

    /// Deletes an album.
    async fn delete_album(&self, album: AlbumUuid) -> Result<(), AlbumsServiceError>;
}
