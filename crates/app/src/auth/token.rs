//! Signed access tokens.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{auth::IssuedToken, domain::users::records::UserRecord};

/// Default token lifetime: one day.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(24);

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token")]
    Sign(#[source] jsonwebtoken::errors::Error),

    #[error("failed to verify token")]
    Verify(#[source] jsonwebtoken::errors::Error),

    #[error("token lifetime overflows the supported time range")]
    Lifetime(#[source] jiff::Error),
}

/// Claims carried by every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject user id.
    pub sub: Uuid,
    pub email: String,
    pub is_admin: bool,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Issued-at, microseconds since the Unix epoch. Revocation is checked against this.
    pub iat_us: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl Claims {
    #[must_use]
    pub fn issued_at(&self) -> Option<Timestamp> {
        let issued_at = Timestamp::from_microsecond(self.iat_us).ok()?;

        (issued_at.as_second() == self.iat).then_some(issued_at)
    }
}

/// Drop sub-microsecond precision, matching what PostgreSQL stores.
#[must_use]
pub fn to_stored_precision(at: Timestamp) -> Timestamp {
    Timestamp::from_microsecond(at.as_microsecond()).unwrap_or(at)
}

/// HS256 signing and verification keys plus the lifetime of issued tokens.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: SignedDuration,
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenKeys {
    #[must_use]
    pub fn from_secret(secret: &[u8], ttl: SignedDuration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);

        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    #[must_use]
    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Sign a token for `user`, valid from `now` for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns an error if the expiry cannot be represented or signing fails.
    pub fn issue(&self, user: &UserRecord, now: Timestamp) -> Result<IssuedToken, TokenError> {
        let expires_at = now.checked_add(self.ttl).map_err(TokenError::Lifetime)?;

        let claims = Claims {
            sub: user.uuid.into_uuid(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            iat: now.as_second(),
            iat_us: now.as_microsecond(),
            exp: expires_at.as_second(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Sign)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is malformed, forged, or expired.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Verify)
    }
}
