//! Login Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::users::data::Credentials;

use crate::{extensions::*, users::errors::into_status_error};

/// Login Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    /// Bearer token for the `Authorization` header
    pub access: String,

    /// When the token stops being accepted
    pub expires_at: String,
}

/// Login Handler
///
/// Exchanges an email and password for a bearer token.
#[endpoint(
    tags("users"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Token issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed email"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Incorrect password"),
        (status_code = StatusCode::NOT_FOUND, description = "No user with that email"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.state()?;
    let request = json.into_inner();

    let issued = state
        .app
        .users
        .login(Credentials {
            email: request.email.trim().to_string(),
            password: request.password,
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(LoginResponse {
        access: issued.token,
        expires_at: issued.expires_at.to_string(),
    }))
}
