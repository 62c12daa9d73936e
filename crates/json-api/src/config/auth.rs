//! Auth Config

use clap::Args;
use jiff::SignedDuration;

/// Access token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// HMAC secret used to sign access tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Lifetime of issued access tokens, in seconds
    #[arg(long, env = "TOKEN_TTL_SECONDS", default_value_t = 86_400_u32)]
    pub token_ttl_seconds: u32,
}

impl AuthConfig {
    #[must_use]
    pub fn token_ttl(&self) -> SignedDuration {
        SignedDuration::from_secs(i64::from(self.token_ttl_seconds))
    }
}
