//! Users service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    auth::{Identity, IssuedToken, TokenKeys, hash_password, to_stored_precision, verify_password},
    database::Db,
    domain::users::{
        data::{Credentials, NewUser, is_plausible_email, validate_new_password},
        errors::UsersServiceError,
        records::{UserRecord, UserUuid},
        repository::{PgUsersRepository, UserInsert},
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
    keys: TokenKeys,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db, keys: TokenKeys) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            keys,
        }
    }

    /// Look up a user by exact email address.
    ///
    /// # Errors
    ///
    /// Returns [`UsersServiceError::NotFound`] when no user has that email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.find_user_by_email(&mut tx, email).await?;

        tx.commit().await?;

        user.ok_or(UsersServiceError::NotFound)
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn register(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        user.validate()?;

        let password_hash = hash_password(user.password.clone()).await?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_user(
                &mut tx,
                UserInsert {
                    uuid: user.uuid,
                    first_name: &user.first_name,
                    last_name: &user.last_name,
                    email: &user.email,
                    mobile_no: &user.mobile_no,
                    password_hash: &password_hash,
                },
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, UsersServiceError> {
        if !is_plausible_email(&credentials.email) {
            return Err(UsersServiceError::Invalid("Invalid email format"));
        }

        let user = self.find_user_by_email(&credentials.email).await?;

        if !verify_password(credentials.password, user.password_hash.clone()).await? {
            return Err(UsersServiceError::InvalidCredentials);
        }

        Ok(self.keys.issue(&user, Timestamp::now())?)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn update_password(
        &self,
        user: UserUuid,
        new_password: String,
    ) -> Result<(), UsersServiceError> {
        validate_new_password(&new_password)?;

        let password_hash = hash_password(new_password).await?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .update_password(
                &mut tx,
                user,
                &password_hash,
                to_stored_precision(Timestamp::now()),
            )
            .await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn promote_to_admin(
        &self,
        requester: &Identity,
        target: UserUuid,
    ) -> Result<UserRecord, UsersServiceError> {
        if !requester.is_admin {
            return Err(UsersServiceError::Forbidden);
        }

        self.grant_admin(target).await
    }

    async fn grant_admin(&self, target: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let promoted = self.repository.grant_admin(&mut tx, target).await?;

        tx.commit().await?;

        Ok(promoted)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Validate and store a new user with a hashed password.
    async fn register(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Check credentials and sign an access token.
    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Replace a user's password and revoke their existing tokens.
    async fn update_password(
        &self,
        user: UserUuid,
        new_password: String,
    ) -> Result<(), UsersServiceError>;

    /// Grant admin rights to `target` on behalf of an admin `requester`.
    async fn promote_to_admin(
        &self,
        requester: &Identity,
        target: UserUuid,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Grant admin rights without a requester check. Used for bootstrapping.
    async fn grant_admin(&self, target: UserUuid) -> Result<UserRecord, UsersServiceError>;
}
