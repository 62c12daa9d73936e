//! Update Password Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{extensions::*, responses::MessageResponse, users::errors::into_status_error};

/// Update Password Request
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePasswordRequest {
    /// At least 8 characters
    pub new_password: String,
}

impl std::fmt::Debug for UpdatePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdatePasswordRequest").finish_non_exhaustive()
    }
}

/// Update Password Handler
///
/// Replaces the caller's password. Tokens issued before the change stop working.
#[endpoint(
    tags("users"),
    summary = "Update Password",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Password updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Password too short"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
#[tracing::instrument(
    name = "users.update_password",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdatePasswordRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.state()?;
    let identity = depot.identity_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(identity.user_uuid));

    state
        .app
        .users
        .update_password(identity.user_uuid, json.into_inner().new_password)
        .await
        .map_err(into_status_error)?;

    info!(user_uuid = %identity.user_uuid, "updated password");

    Ok(Json(MessageResponse::new("Password updated successfully")))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::users::{MockUsersService, UsersServiceError};

    use crate::test_helpers::{TEST_USER_UUID, TestState, inject_customer, state_service};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        state_service(
            TestState {
                users,
                ..TestState::default()
            },
            Router::with_path("users/update-password")
                .hoop(inject_customer)
                .patch(handler),
        )
    }

    #[tokio::test]
    async fn test_update_password_success() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_update_password()
            .once()
            .withf(|uuid, password| *uuid == TEST_USER_UUID && password == "a new password")
            .return_once(|_, _| Ok(()));

        let res = TestClient::patch("http://example.com/users/update-password")
            .json(&json!({ "newPassword": "a new password" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_password_too_short_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_update_password().once().return_once(|_, _| {
            Err(UsersServiceError::Invalid(
                "Password must be at least 8 characters",
            ))
        });

        let res = TestClient::patch("http://example.com/users/update-password")
            .json(&json!({ "newPassword": "short" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
