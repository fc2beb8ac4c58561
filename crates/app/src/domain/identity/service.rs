//! Identity merge service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::domain::{
    albums::records::AlbumUuid,
    carts::{CartIdentity, CartsService, CartsServiceError},
    users::records::UserUuid,
};

/// What happened to each anonymous line during a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Albums now in the user's cart.
    pub merged: Vec<AlbumUuid>,

    /// Albums that could not be added (gone or sold out) and were dropped.
    pub skipped: Vec<AlbumUuid>,
}

/// Merges carts through the cart engine so the regular cap rules apply.
#[derive(Clone)]
pub struct CartIdentityMerger {
    carts: Arc<dyn CartsService>,
}

impl std::fmt::Debug for CartIdentityMerger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartIdentityMerger").finish_non_exhaustive()
    }
}

impl CartIdentityMerger {
    #[must_use]
    pub fn new(carts: Arc<dyn CartsService>) -> Self {
        Self { carts }
    }
}

#[async_trait]
impl IdentityMergeService for CartIdentityMerger {
    async fn merge_anonymous_cart(
        &self,
        anonymous: &CartIdentity,
        user: UserUuid,
    ) -> Result<MergeOutcome, CartsServiceError> {
        let mut outcome = MergeOutcome::default();

        if anonymous.is_empty() || anonymous.user().is_some() {
            return Ok(outcome);
        }

        let target = CartIdentity::User(user);

        for line in self.carts.list_items_detailed(anonymous).await? {
            let quantity = i32::try_from(line.quantity).unwrap_or(i32::MAX);

            if self.carts.add(&target, line.album_uuid, quantity).await? {
                outcome.merged.push(line.album_uuid);
            } else {
                debug!(%user, album = %line.album_uuid, "anonymous cart line dropped during merge");
                outcome.skipped.push(line.album_uuid);
            }
        }

        self.carts.clear(anonymous).await?;

        info!(
            %user,
            merged = outcome.merged.len(),
            skipped = outcome.skipped.len(),
            "anonymous cart merged"
        );

        Ok(outcome)
    }
}

#[automock]
#[async_trait]
pub trait IdentityMergeService: Send + Sync {
    /// Re-add every anonymous line to `user`'s cart with its recorded quantity, then
    /// clear the anonymous cart.
    ///
    /// Lines the cart engine refuses are skipped and reported. Call once per successful
    /// sign-in; a second call finds the anonymous cart empty.
    ///
    /// # Errors
    ///
    /// - [`CartsServiceError::BlockedAccount`] when the user is blocked; the anonymous
    ///   cart is left untouched.
    async fn merge_anonymous_cart(
        &self,
        anonymous: &CartIdentity,
        user: UserUuid,
    ) -> Result<MergeOutcome, CartsServiceError>;
}
