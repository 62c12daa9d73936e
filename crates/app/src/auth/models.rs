//! Auth data models.

use jiff::Timestamp;

use crate::domain::users::records::UserUuid;

/// Authenticated caller, attached to a request after bearer verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_uuid: UserUuid,
    pub email: String,
    pub is_admin: bool,
}

/// A freshly signed access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Revocation data for a token subject.
#[derive(Debug, Clone)]
pub(crate) struct TokenSubject {
    pub email: String,
    pub is_admin: bool,
    pub tokens_valid_after: Timestamp,
}
