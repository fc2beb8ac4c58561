//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::users::{
        access,
        data::{NewUser, ProfileUpdate},
        errors::UsersServiceError,
        records::{UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        if user.display_name.trim().is_empty() || !user.email.contains('@') {
            return Err(UsersServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_user(&mut tx, user).await?;

        tx.commit().await?;

        info!(user = %created.uuid, is_admin = created.is_admin, "user created");

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        user: UserUuid,
        profile: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let profile = profile.normalized();

        if !profile.is_valid() {
            return Err(UsersServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_profile(&mut tx, user, profile).await?;

        tx.commit().await?;

        info!(user = %updated.uuid, "profile updated");

        Ok(updated)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn set_blocked(
        &self,
        user: UserUuid,
        blocked: bool,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.set_blocked(&mut tx, user, blocked).await?;

        tx.commit().await?;

        info!(user = %user.uuid, blocked = user.is_blocked, "user block flag set");

        Ok(user)
    }

    async fn toggle_blocked(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.toggle_blocked(&mut tx, user).await?;

        tx.commit().await?;

        info!(user = %user.uuid, blocked = user.is_blocked, "user block flag toggled");

        Ok(user)
    }

    async fn can_mutate_commerce(&self, user: UserUuid) -> Result<bool, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let allowed = access::can_mutate_commerce(&mut tx, user).await?;

        tx.commit().await?;

        Ok(allowed)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Creates a new user.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Replaces the user's own profile fields.
    async fn update_profile(
        &self,
        user: UserUuid,
        profile: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Retrieves all users, oldest first.
    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Sets the blocked flag.
    async fn set_blocked(
        &self,
        user: UserUuid,
        blocked: bool,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Flips the blocked flag.
    async fn toggle_blocked(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Whether the user exists and is not blocked.
    async fn can_mutate_commerce(&self, user: UserUuid) -> Result<bool, UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            uuid: UserUuid::new(),
            display_name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            phone: None,
            delivery_address: Some("12 Analytical Row".to_string()),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn create_user_starts_unblocked() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.users.create_user(new_user("ada@example.com")).await?;

        assert!(!user.is_blocked);
        assert!(!user.is_admin);
        assert!(ctx.users.can_mutate_commerce(user.uuid).await?);

        Ok(())
    }

    #[tokio::test]
    async fn create_user_duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users.create_user(new_user("ada@example.com")).await?;

        let result = ctx.users.create_user(new_user("ada@example.com")).await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_user_without_email_is_invalid() {
        let ctx = TestContext::new().await;

        let result = ctx.users.create_user(new_user("not-an-email")).await;

        assert!(
            matches!(result, Err(UsersServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn blocked_user_cannot_mutate_commerce() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.users.create_user(new_user("ada@example.com")).await?;

        let blocked = ctx.users.set_blocked(user.uuid, true).await?;

        assert!(blocked.is_blocked);
        assert!(!ctx.users.can_mutate_commerce(user.uuid).await?);

        Ok(())
    }

    #[tokio::test]
    async fn toggle_blocked_flips_the_flag_each_time() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.users.create_user(new_user("ada@example.com")).await?;

        assert!(ctx.users.toggle_blocked(user.uuid).await?.is_blocked);
        assert!(!ctx.users.toggle_blocked(user.uuid).await?.is_blocked);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_user_cannot_mutate_commerce() -> TestResult {
        let ctx = TestContext::new().await;

        assert!(!ctx.users.can_mutate_commerce(UserUuid::new()).await?);

        Ok(())
    }

    fn profile(email: &str) -> ProfileUpdate {
        ProfileUpdate {
            display_name: "Ada King".to_string(),
            email: email.to_string(),
            phone: Some("+44 20 7946 0000".to_string()),
            delivery_address: Some("St James's Square 12".to_string()),
        }
    }

    #[tokio::test]
    async fn update_profile_replaces_contact_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.users.create_user(new_user("ada@example.com")).await?;

        let updated = ctx
            .users
            .update_profile(user.uuid, profile("countess@example.com"))
            .await?;

        assert_eq!(updated.display_name, "Ada King");
        assert_eq!(updated.email, "countess@example.com");
        assert_eq!(updated.phone.as_deref(), Some("+44 20 7946 0000"));
        assert_eq!(updated.delivery_address.as_deref(), Some("St James's Square 12"));

        assert_eq!(ctx.users.get_user(user.uuid).await?, updated);

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_clears_blank_optional_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.users.create_user(new_user("ada@example.com")).await?;

        let updated = ctx
            .users
            .update_profile(
                user.uuid,
                ProfileUpdate {
                    delivery_address: Some("  ".to_string()),
                    phone: None,
                    ..profile("ada@example.com")
                },
            )
            .await?;

        assert_eq!(updated.delivery_address, None);
        assert_eq!(updated.phone, None);

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_to_taken_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users.create_user(new_user("grace@example.com")).await?;
        let user = ctx.users.create_user(new_user("ada@example.com")).await?;

        let result = ctx
            .users
            .update_profile(user.uuid, profile("grace@example.com"))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );
        assert_eq!(ctx.users.get_user(user.uuid).await?.email, "ada@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_with_blank_name_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.users.create_user(new_user("ada@example.com")).await?;

        let result = ctx
            .users
            .update_profile(
                user.uuid,
                ProfileUpdate {
                    display_name: "   ".to_string(),
                    ..profile("ada@example.com")
                },
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_unknown_user_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .update_profile(UserUuid::new(), profile("nobody@example.com"))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn blocked_user_can_still_update_profile() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.users.create_user(new_user("ada@example.com")).await?;
        ctx.users.set_blocked(user.uuid, true).await?;

        let updated = ctx
            .users
            .update_profile(user.uuid, profile("ada@example.com"))
            .await?;

        assert!(updated.is_blocked);
        assert_eq!(updated.display_name, "Ada King");

        Ok(())
    }

    #[tokio::test]
    async fn get_user_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.get_user(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
