//! Password hashing.
//!
//! bcrypt is deliberately slow, so hashing and verification run on the
//! blocking pool instead of an async worker thread.

use thiserror::Error;
use tokio::task::{self, JoinError};

/// bcrypt work factor applied to every stored password.
pub const PASSWORD_HASH_COST: u32 = 12;

/// Shortest password accepted at registration or password change.
pub const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password hashing task failed")]
    Join(#[from] JoinError),
}

/// Hash a plaintext password with bcrypt.
///
/// # Errors
///
/// Returns an error if bcrypt rejects the input or the blocking task panics.
pub async fn hash_password(password: String) -> Result<String, PasswordError> {
    hash_password_with_cost(password, PASSWORD_HASH_COST).await
}

pub(crate) async fn hash_password_with_cost(
    password: String,
    cost: u32,
) -> Result<String, PasswordError> {
    Ok(task::spawn_blocking(move || bcrypt::hash(password, cost)).await??)
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the stored hash is malformed or the blocking task panics.
pub async fn verify_password(password: String, hash: String) -> Result<bool, PasswordError> {
    Ok(task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??)
}

/// Whether `password` satisfies the minimum length policy.
#[must_use]
pub fn is_acceptable_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn verify_accepts_matching_password() -> TestResult {
        let hash = hash_password_with_cost("correct horse".to_string(), 4).await?;

        assert!(verify_password("correct horse".to_string(), hash.clone()).await?);
        assert!(!verify_password("battery staple".to_string(), hash).await?);

        Ok(())
    }

    #[tokio::test]
    async fn default_cost_is_embedded_in_hash() -> TestResult {
        let hash = hash_password("password123".to_string()).await?;

        assert!(hash.starts_with("$2b$12$"), "unexpected hash prefix: {hash}");

        Ok(())
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        let result = verify_password("password123".to_string(), "not-a-hash".to_string()).await;

        assert!(
            matches!(result, Err(PasswordError::Hash(_))),
            "expected Hash error, got {result:?}"
        );
    }

    #[test]
    fn password_policy_counts_characters() {
        assert!(!is_acceptable_password("short"));
        assert!(is_acceptable_password("eightchr"));
        assert!(!is_acceptable_password("ñññññññ"));
    }
}
