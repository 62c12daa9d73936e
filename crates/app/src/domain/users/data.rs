//! User Data

use crate::{
    auth::is_acceptable_password,
    domain::users::{errors::UsersServiceError, records::UserUuid},
};

/// Number of digits in a valid mobile number.
pub const MOBILE_NO_DIGITS: usize = 11;

const SHORT_PASSWORD: &str = "Password must be at least 8 characters";

/// Registration payload. The password is plaintext until the service hashes it.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_no: String,
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("uuid", &self.uuid)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("mobile_no", &self.mobile_no)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl NewUser {
    /// Check required fields and formats before anything is hashed or stored.
    ///
    /// # Errors
    ///
    /// Returns [`UsersServiceError::Invalid`] naming the first failing rule.
    pub fn validate(&self) -> Result<(), UsersServiceError> {
        let required = [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.mobile_no,
            &self.password,
        ];

        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(UsersServiceError::Invalid("All fields are required"));
        }

        if !is_valid_mobile_no(&self.mobile_no) {
            return Err(UsersServiceError::Invalid(
                "Mobile number must be exactly 11 digits",
            ));
        }

        if !is_plausible_email(&self.email) {
            return Err(UsersServiceError::Invalid("Email is invalid"));
        }

        if !is_acceptable_password(&self.password) {
            return Err(UsersServiceError::Invalid(SHORT_PASSWORD));
        }

        Ok(())
    }
}

/// Login payload.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[must_use]
pub fn is_plausible_email(email: &str) -> bool {
    email.contains('@')
}

#[must_use]
pub fn is_valid_mobile_no(mobile_no: &str) -> bool {
    mobile_no.len() == MOBILE_NO_DIGITS && mobile_no.bytes().all(|b| b.is_ascii_digit())
}

pub(crate) fn validate_new_password(password: &str) -> Result<(), UsersServiceError> {
    if is_acceptable_password(password) {
        return Ok(());
    }

    Err(UsersServiceError::Invalid(SHORT_PASSWORD))
}
