//! Register User Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use storefront_app::domain::users::{data::NewUser, records::UserUuid};

use crate::{
    extensions::*,
    users::{errors::into_status_error, models::UserResponse},
};

/// Register User Request
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Exactly 11 digits
    pub mobile_no: String,
    /// At least 8 characters
    pub password: String,
}

impl std::fmt::Debug for RegisterUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<RegisterUserRequest> for NewUser {
    fn from(request: RegisterUserRequest) -> Self {
        NewUser {
            uuid: UserUuid::new(),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email.trim().to_string(),
            mobile_no: request.mobile_no.trim().to_string(),
            password: request.password,
        }
    }
}

/// Register User Handler
#[endpoint(
    tags("users"),
    summary = "Register User",
    responses(
        (status_code = StatusCode::CREATED, description = "User registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid registration details"),
        (status_code = StatusCode::CONFLICT, description = "Email already exists"),
    ),
)]
#[tracing::instrument(name = "users.register", skip_all)]
pub(crate) async fn handler(
    json: JsonBody<RegisterUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.state()?;

    let user = state
        .app
        .users
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    info!(user_uuid = %user.uuid, "registered user");

    res.status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}
