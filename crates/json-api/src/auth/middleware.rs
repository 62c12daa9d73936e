//! Auth middleware.
//!
//! `require_auth` rejects requests without a valid bearer token,
//! `optional_auth` attaches an identity only when one is supplied, and
//! `require_admin` must run after `require_auth`.

use salvo::{http::header::AUTHORIZATION, prelude::*};
use storefront_app::auth::{AuthServiceError, Identity};
use tracing::error;

use crate::extensions::*;

#[salvo::handler]
pub(crate) async fn require_auth(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    match authenticate(depot, token).await {
        Ok(identity) => depot.insert_identity(identity),
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn optional_auth(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.headers().contains_key(AUTHORIZATION) {
        let Some(token) = extract_bearer_token(req) else {
            res.render(
                StatusError::unauthorized().brief("Missing or invalid Authorization header"),
            );
            ctrl.skip_rest();

            return;
        };

        match authenticate(depot, token).await {
            Ok(identity) => depot.insert_identity(identity),
            Err(status) => {
                res.render(status);
                ctrl.skip_rest();

                return;
            }
        }
    }

    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let is_admin = match depot.identity_or_401() {
        Ok(identity) => identity.is_admin,
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();

            return;
        }
    };

    if !is_admin {
        res.render(StatusError::forbidden().brief("Action Forbidden"));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

async fn authenticate(depot: &Depot, token: &str) -> Result<Identity, StatusError> {
    let state = depot.state()?;

    state
        .app
        .auth
        .authenticate_bearer(token)
        .await
        .map_err(|auth_error| match auth_error {
            AuthServiceError::InvalidToken => {
                StatusError::unauthorized().brief("Invalid or expired token")
            }
            AuthServiceError::Revoked => StatusError::unauthorized().brief("Token has been revoked"),
            AuthServiceError::Sql(source) => {
                error!("failed to validate access token: {source}");

                StatusError::internal_server_error()
            }
        })
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
