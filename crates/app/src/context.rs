//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        albums::{AlbumsService, PgAlbumsService},
        carts::{CartsService, PgCartsService},
        categories::{CategoriesService, PgCategoriesService},
        favorites::{FavoritesService, PgFavoritesService},
        identity::{CartIdentityMerger, IdentityMergeService},
        orders::{OrdersService, PgOrdersService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub albums: Arc<dyn AlbumsService>,
    pub categories: Arc<dyn CategoriesService>,
    pub users: Arc<dyn UsersService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub favorites: Arc<dyn FavoritesService>,
    pub identity: Arc<dyn IdentityMergeService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Wire every service to one database handle.
    #[must_use]
    pub fn from_db(db: &Db) -> Self {
        let carts: Arc<dyn CartsService> = Arc::new(PgCartsService::new(db.clone()));

        Self {
            albums: Arc::new(PgAlbumsService::new(db.clone())),
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            favorites: Arc::new(PgFavoritesService::new(db.clone())),
            identity: Arc::new(CartIdentityMerger::new(Arc::clone(&carts))),
            auth: Arc::new(PgAuthService::new(db.clone())),
            carts,
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or, if requested, migrating fails.
    pub async fn from_database_url(url: &str, run_migrations: bool) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;

            info!("database migrations applied");
        }

        Ok(Self::from_db(&Db::new(pool)))
    }
}
