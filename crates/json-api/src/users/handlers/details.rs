//! User Details Handler

use salvo::prelude::*;

use crate::{
    extensions::*,
    users::{errors::into_status_error, models::UserResponse},
};

/// User Details Handler
///
/// Returns the profile of the authenticated user.
#[endpoint(
    tags("users"),
    summary = "Get User Details",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User profile"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.state()?;
    let identity = depot.identity_or_401()?;

    let user = state
        .app
        .users
        .get_user(identity.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
