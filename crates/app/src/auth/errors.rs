//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// The credential is malformed, expired, or its signature does not verify.
    #[error("invalid token")]
    InvalidToken,

    /// The credential was issued before the subject's tokens were revoked, or
    /// the subject no longer exists.
    #[error("token revoked")]
    Revoked,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
