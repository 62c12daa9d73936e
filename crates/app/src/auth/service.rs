//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::debug;

use crate::{
    auth::{AuthServiceError, Identity, TokenKeys, repository::PgAuthRepository},
    domain::users::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    keys: TokenKeys,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, keys: TokenKeys) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            keys,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError> {
        let claims = self.keys.verify(bearer_token).map_err(|error| {
            debug!("rejected bearer token: {error}");

            AuthServiceError::InvalidToken
        })?;

        let issued_at = claims.issued_at().ok_or(AuthServiceError::InvalidToken)?;
        let user_uuid = UserUuid::from_uuid(claims.sub);

        let subject = self
            .repository
            .find_token_subject(user_uuid)
            .await?
            .ok_or(AuthServiceError::Revoked)?;

        if issued_at < subject.tokens_valid_after {
            return Err(AuthServiceError::Revoked);
        }

        // The stored flags win over the claims so promotions apply immediately.
        Ok(Identity {
            user_uuid,
            email: subject.email,
            is_admin: subject.is_admin,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token into the identity of its subject.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use testresult::TestResult;

    use crate::{
        domain::users::UsersService,
        test::{TestContext, helpers::register_user},
    };

    use super::*;

    #[tokio::test]
    async fn valid_token_resolves_identity() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "ada@example.com").await?;
        let issued = ctx.keys.issue(&user, Timestamp::now())?;

        let identity = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(identity.user_uuid, user.uuid);
        assert_eq!(identity.email, "ada@example.com");
        assert!(!identity.is_admin, "new users are not admins");

        Ok(())
    }

    #[tokio::test]
    async fn forged_token_is_invalid() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("abc.def.ghi").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidToken)),
            "expected InvalidToken, got {result:?}"
        );
    }

    #[tokio::test]
    async fn token_for_unknown_user_is_revoked() -> TestResult {
        let ctx = TestContext::new().await;
        let ghost = crate::test::helpers::user_record("ghost@example.com", false);
        let issued = ctx.keys.issue(&ghost, Timestamp::now())?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::Revoked)),
            "expected Revoked, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn password_change_revokes_older_tokens() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "ada@example.com").await?;
        let earlier = Timestamp::now().checked_sub(SignedDuration::from_mins(5))?;
        let issued = ctx.keys.issue(&user, earlier)?;

        ctx.users
            .update_password(user.uuid, "a brand new password".to_string())
            .await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::Revoked)),
            "expected Revoked, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn token_issued_just_before_password_change_is_revoked() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "ada@example.com").await?;
        let issued = ctx.keys.issue(&user, Timestamp::now())?;

        ctx.users
            .update_password(user.uuid, "a brand new password".to_string())
            .await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::Revoked)),
            "expected Revoked, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn token_issued_after_password_change_is_accepted() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "ada@example.com").await?;

        ctx.users
            .update_password(user.uuid, "a brand new password".to_string())
            .await?;

        let issued = ctx.keys.issue(&user, Timestamp::now())?;

        let identity = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(identity.user_uuid, user.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn promotion_is_visible_without_new_token() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "ada@example.com").await?;
        let issued = ctx.keys.issue(&user, Timestamp::now())?;

        ctx.users.grant_admin(user.uuid).await?;

        let identity = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert!(identity.is_admin, "expected stored admin flag to be used");

        Ok(())
    }
}
