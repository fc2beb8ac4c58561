//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{
        AuthServiceError, IssuedToken, Principal, UserTokenUuid, generate_user_token,
        hash_user_token, is_well_formed, repository::PgAuthRepository,
    },
    database::Db,
    domain::users::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
        }
    }

    /// Issue a new bearer token for the given user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::InvalidReference`] if the user does not exist.
    pub async fn issue_token(&self, user: UserUuid) -> Result<IssuedToken, AuthServiceError> {
        let token = generate_user_token();
        let token_hash = hash_user_token(&token);

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .create_token(&mut tx, UserTokenUuid::new(), user, &token_hash)
            .await?;

        tx.commit().await?;

        info!(%user, token = %record.uuid, "user token issued");

        Ok(IssuedToken { token, record })
    }

    /// Revoke a token. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_token(&self, token: UserTokenUuid) -> Result<bool, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let revoked = self.repository.revoke_token(&mut tx, token).await? == 1;

        tx.commit().await?;

        Ok(revoked)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        if !is_well_formed(bearer_token) {
            return Err(AuthServiceError::NotFound);
        }

        let mut tx = self.db.begin().await?;

        let principal = self
            .repository
            .find_principal_by_token_hash(&mut tx, &hash_user_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        Ok(principal)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::NotFound`] for malformed, unknown or revoked tokens.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_its_user() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_admin("admin@example.com").await?;

        let issued = ctx.auth.issue_token(admin.uuid).await?;
        let principal = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(
            principal,
            Principal {
                user: admin.uuid,
                is_admin: true
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_no_longer_authenticates() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("user@example.com").await?;
        let issued = ctx.auth.issue_token(user.uuid).await?;

        assert!(ctx.auth.revoke_token(issued.record.uuid).await?);
        assert!(!ctx.auth.revoke_token(issued.record.uuid).await?);

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_and_malformed_tokens_are_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let never_issued = generate_user_token();

        for token in ["", "garbage", never_issued.as_str()] {
            let result = ctx.auth.authenticate_bearer(token).await;

            assert!(
                matches!(result, Err(AuthServiceError::NotFound)),
                "expected NotFound for {token:?}, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn issuing_for_unknown_user_fails() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.auth.issue_token(UserUuid::new()).await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }
}
