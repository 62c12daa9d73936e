//! Set As Admin Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    users::{errors::into_status_error, models::UserResponse},
};

/// Set As Admin Handler
///
/// Grants admin rights to another user.
#[endpoint(
    tags("users"),
    summary = "Set User As Admin",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User promoted"),
        (status_code = StatusCode::FORBIDDEN, description = "Action Forbidden"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
#[tracing::instrument(
    name = "users.set_as_admin",
    skip(id, depot),
    fields(target_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.state()?;
    let identity = depot.identity_or_401()?;
    let target = id.into_inner();

    tracing::Span::current().record("target_uuid", tracing::field::display(target));

    let promoted = state
        .app
        .users
        .promote_to_admin(identity, target.into())
        .await
        .map_err(into_status_error)?;

    info!(target_uuid = %target, "promoted user to admin");

    Ok(Json(promoted.into()))
}
