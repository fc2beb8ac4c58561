//! Categories service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::categories::{
        data::{CategoryUpdate, NewCategory, validate_name},
        errors::CategoriesServiceError,
        records::{CategoryRecord, CategoryUuid},
        repository::PgCategoriesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self.repository.get_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(category)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        validate_name(&category.name)?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_category(&mut tx, category).await?;

        tx.commit().await?;

        info!(category = %created.uuid, name = %created.name, "category created");

        Ok(created)
    }

    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        validate_name(&update.name)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_category(&mut tx, category, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_category(&mut tx, category).await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%category, "category deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieves all categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    /// Retrieve a single category.
    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Creates a new category.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Renames or re-describes a category.
    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Deletes a category. Albums in it become uncategorised.
    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::albums::{
            AlbumsService,
            data::{AlbumDetails, NewAlbum},
            records::AlbumUuid,
        },
        test::{TestContext, helpers::album_details},
    };

    use super::*;

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            uuid: CategoryUuid::new(),
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn list_categories_is_ordered_by_name() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.categories.create_category(new_category("Rock")).await?;
        ctx.categories.create_category(new_category("Jazz")).await?;
        ctx.categories
            .create_category(new_category("Classical"))
            .await?;

        let names: Vec<String> = ctx
            .categories
            .list_categories()
            .await?
            .into_iter()
            .map(|category| category.name)
            .collect();

        assert_eq!(names, ["Classical", "Jazz", "Rock"]);

        Ok(())
    }

    #[tokio::test]
    async fn create_category_with_blank_name_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.categories.create_category(new_category("   ")).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_category_changes_name() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx.categories.create_category(new_category("Jaz")).await?;

        let updated = ctx
            .categories
            .update_category(
                category.uuid,
                CategoryUpdate {
                    name: "Jazz".to_string(),
                    description: Some("Swing, bop and beyond".to_string()),
                },
            )
            .await?;

        assert_eq!(updated.name, "Jazz");
        assert_eq!(updated.description.as_deref(), Some("Swing, bop and beyond"));

        Ok(())
    }

    #[tokio::test]
    async fn delete_category_keeps_albums_and_nulls_reference() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx.categories.create_category(new_category("Soul")).await?;

        let album = ctx
            .albums
            .create_album(NewAlbum {
                uuid: AlbumUuid::new(),
                details: AlbumDetails {
                    category_uuid: Some(category.uuid),
                    ..album_details("What's Going On", Decimal::TEN, 2)
                },
            })
            .await?;

        ctx.categories.delete_category(category.uuid).await?;

        let album = ctx.albums.get_album(album.uuid).await?;

        assert!(album.category_uuid.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn get_category_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.categories.get_category(CategoryUuid::new()).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
