//! Carts service.

use std::collections::BTreeSet;

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        albums::{records::AlbumUuid, repository::PgAlbumsRepository},
        carts::{
            errors::CartsServiceError,
            identity::CartIdentity,
            limits::{item_cap, quantity_after_set},
            records::{CartLine, CartView},
            repository::PgCartsRepository,
        },
        users::access,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    repository: PgCartsRepository,
    albums: PgAlbumsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCartsRepository::new(),
            albums: PgAlbumsRepository::new(),
        }
    }
}

/// Reject cart growth for blocked or unknown users. Anonymous carts are never blocked.
async fn ensure_can_mutate(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    identity: &CartIdentity,
) -> Result<(), CartsServiceError> {
    let Some(user) = identity.user() else {
        return Ok(());
    };

    if access::can_mutate_commerce(tx, user).await? {
        Ok(())
    } else {
        Err(CartsServiceError::BlockedAccount)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn add(
        &self,
        identity: &CartIdentity,
        album: AlbumUuid,
        quantity: i32,
    ) -> Result<bool, CartsServiceError> {
        if identity.is_empty() {
            return Ok(false);
        }

        let Ok(requested) = u32::try_from(quantity) else {
            return Ok(false);
        };

        if requested == 0 {
            return Ok(false);
        }

        let mut tx = self.db.begin().await?;

        ensure_can_mutate(&mut tx, identity).await?;

        let Some(record) = self.albums.find_album(&mut tx, album).await? else {
            return Ok(false);
        };

        let cap = item_cap(record.stock);

        if cap == 0 {
            debug!(%album, "album out of stock, not added");

            return Ok(false);
        }

        // Keeps `prior + requested` inside INTEGER before the upsert caps it.
        let requested = requested.min(cap);

        let key = identity.storage_key();
        let stored = self
            .repository
            .add_item(&mut tx, &key, album, requested, cap)
            .await?;

        tx.commit().await?;

        debug!(%identity, %album, requested, stored, "cart item added");

        Ok(true)
    }

    async fn set_quantity(
        &self,
        identity: &CartIdentity,
        album: AlbumUuid,
        quantity: i32,
    ) -> Result<bool, CartsServiceError> {
        if identity.is_empty() {
            return Ok(false);
        }

        let mut tx = self.db.begin().await?;

        let Ok(requested) = u32::try_from(quantity) else {
            self.repository
                .remove_item(&mut tx, &identity.storage_key(), album)
                .await?;
            tx.commit().await?;

            return Ok(true);
        };

        if requested == 0 {
            self.repository
                .remove_item(&mut tx, &identity.storage_key(), album)
                .await?;
            tx.commit().await?;

            return Ok(true);
        }

        ensure_can_mutate(&mut tx, identity).await?;

        let Some(record) = self.albums.find_album(&mut tx, album).await? else {
            return Ok(false);
        };

        let stored = quantity_after_set(requested, item_cap(record.stock));

        let updated = self
            .repository
            .set_quantity(&mut tx, &identity.storage_key(), album, stored)
            .await?;

        if !updated {
            return Ok(false);
        }

        tx.commit().await?;

        debug!(%identity, %album, requested, stored, "cart item quantity set");

        Ok(true)
    }

    async fn remove(
        &self,
        identity: &CartIdentity,
        album: AlbumUuid,
    ) -> Result<(), CartsServiceError> {
        if identity.is_empty() {
            return Ok(());
        }

        let mut tx = self.db.begin().await?;

        self.repository
            .remove_item(&mut tx, &identity.storage_key(), album)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn clear(&self, identity: &CartIdentity) -> Result<(), CartsServiceError> {
        if identity.is_empty() {
            return Ok(());
        }

        let mut tx = self.db.begin().await?;

        let removed = self
            .repository
            .clear_cart(&mut tx, &identity.storage_key())
            .await?;

        tx.commit().await?;

        info!(%identity, removed, "cart cleared");

        Ok(())
    }

    async fn list_item_ids(
        &self,
        identity: &CartIdentity,
    ) -> Result<BTreeSet<AlbumUuid>, CartsServiceError> {
        if identity.is_empty() {
            return Ok(BTreeSet::new());
        }

        let mut tx = self.db.begin().await?;

        let ids = self
            .repository
            .list_item_ids(&mut tx, &identity.storage_key())
            .await?;

        tx.commit().await?;

        Ok(ids)
    }

    async fn list_items_detailed(
        &self,
        identity: &CartIdentity,
    ) -> Result<Vec<CartLine>, CartsServiceError> {
        if identity.is_empty() {
            return Ok(Vec::new());
        }

        let key = identity.storage_key();
        let mut tx = self.db.begin().await?;

        let healed = self.repository.delete_non_positive(&mut tx, &key).await?;

        if healed > 0 {
            debug!(%identity, healed, "removed non-positive cart lines");
        }

        let lines = self
            .repository
            .list_lines(&mut tx, &key)
            .await?
            .into_iter()
            .filter_map(|line| line.positive())
            .collect();

        tx.commit().await?;

        Ok(lines)
    }

    async fn view(&self, identity: &CartIdentity) -> Result<CartView, CartsServiceError> {
        if identity.is_empty() {
            return Ok(CartView::default());
        }

        let key = identity.storage_key();
        let mut tx = self.db.begin().await?;

        self.repository.delete_non_positive(&mut tx, &key).await?;

        let lines = self.repository.view_cart(&mut tx, &key).await?;

        tx.commit().await?;

        Ok(CartView { lines })
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add `quantity` units of an album, growing an existing line up to its cap.
    ///
    /// Returns `false` without changing anything when the identity is empty, the
    /// quantity is not positive, or the album is missing or out of stock.
    ///
    /// # Errors
    ///
    /// - [`CartsServiceError::BlockedAccount`] when the identity is a blocked user.
    async fn add(
        &self,
        identity: &CartIdentity,
        album: AlbumUuid,
        quantity: i32,
    ) -> Result<bool, CartsServiceError>;

    /// Overwrite a line's quantity, clamped into `1..=cap`. A non-positive quantity
    /// removes the line.
    ///
    /// Returns `false` when the album or the line does not exist.
    ///
    /// # Errors
    ///
    /// - [`CartsServiceError::BlockedAccount`] when the identity is a blocked user and the
    ///   quantity is positive.
    async fn set_quantity(
        &self,
        identity: &CartIdentity,
        album: AlbumUuid,
        quantity: i32,
    ) -> Result<bool, CartsServiceError>;

    /// Remove a line. Removing an absent line is not an error.
    async fn remove(
        &self,
        identity: &CartIdentity,
        album: AlbumUuid,
    ) -> Result<(), CartsServiceError>;

    /// Remove every line of the cart.
    async fn clear(&self, identity: &CartIdentity) -> Result<(), CartsServiceError>;

    /// Albums with a positive quantity in the cart.
    async fn list_item_ids(
        &self,
        identity: &CartIdentity,
    ) -> Result<BTreeSet<AlbumUuid>, CartsServiceError>;

    /// All positive lines. Non-positive lines found along the way are deleted.
    async fn list_items_detailed(
        &self,
        identity: &CartIdentity,
    ) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Positive lines joined with their albums at current prices. Self-heals like
    /// [`CartsService::list_items_detailed`].
    async fn view(&self, identity: &CartIdentity) -> Result<CartView, CartsServiceError>;
}
