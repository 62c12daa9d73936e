//! Cart owner resolution.
//!
//! Signed-in callers own the cart tied to their account. Anonymous callers
//! carry a session id in the `X-Cart-Session` header; the server mints one on
//! the first `add-to-cart`.

use salvo::prelude::*;
use uuid::Uuid;

use storefront_app::domain::carts::records::{CartOwner, CartSessionUuid};

use crate::extensions::*;

pub(crate) const CART_SESSION_HEADER: &str = "x-cart-session";

/// Owner named by the request, if any.
pub(crate) fn resolve(req: &Request, depot: &Depot) -> Result<Option<CartOwner>, StatusError> {
    if let Some(identity) = depot.identity() {
        return Ok(Some(CartOwner::User(identity.user_uuid)));
    }

    let Some(header) = req.headers().get(CART_SESSION_HEADER) else {
        return Ok(None);
    };

    let session = header
        .to_str()
        .or_400("Invalid cart session")
        .and_then(|value| Uuid::parse_str(value.trim()).or_400("Invalid cart session"))?;

    Ok(Some(CartOwner::Session(CartSessionUuid::from_uuid(session))))
}

/// Owner named by the request; anonymous requests without a session have no cart.
pub(crate) fn require(req: &Request, depot: &Depot) -> Result<CartOwner, StatusError> {
    resolve(req, depot)?.ok_or_else(|| StatusError::not_found().brief("Cart not found"))
}

/// Owner named by the request, minting a session for anonymous callers.
///
/// Session ids are echoed in the response header either way.
pub(crate) fn require_or_mint(
    req: &Request,
    depot: &Depot,
    res: &mut Response,
) -> Result<CartOwner, StatusError> {
    let owner = resolve(req, depot)?
        .unwrap_or_else(|| CartOwner::Session(CartSessionUuid::new()));

    if let CartOwner::Session(session) = owner {
        res.add_header(CART_SESSION_HEADER, session.to_string(), true)
            .or_500("failed to set cart session header")?;
    }

    Ok(owner)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, TestState, inject_customer, state_service};

    use super::*;

    #[salvo::handler]
    async fn describe_owner(
        req: &mut Request,
        depot: &mut Depot,
    ) -> Result<String, StatusError> {
        Ok(match resolve(req, depot)? {
            Some(CartOwner::User(user)) => format!("user:{user}"),
            Some(CartOwner::Session(session)) => format!("session:{session}"),
            None => "none".to_string(),
        })
    }

    fn service(route: Router) -> Service {
        state_service(TestState::default(), route.get(describe_owner))
    }

    #[tokio::test]
    async fn identity_wins_over_session_header() -> TestResult {
        let mut res = TestClient::get("http://example.com/cart")
            .add_header(CART_SESSION_HEADER, Uuid::now_v7().to_string(), true)
            .send(&service(Router::with_path("cart").hoop(inject_customer)))
            .await;

        assert_eq!(res.take_string().await?, format!("user:{TEST_USER_UUID}"));

        Ok(())
    }

    #[tokio::test]
    async fn session_header_names_anonymous_cart() -> TestResult {
        let session = Uuid::now_v7();

        let mut res = TestClient::get("http://example.com/cart")
            .add_header(CART_SESSION_HEADER, session.to_string(), true)
            .send(&service(Router::with_path("cart")))
            .await;

        assert_eq!(res.take_string().await?, format!("session:{session}"));

        Ok(())
    }

    #[tokio::test]
    async fn missing_session_resolves_to_none() -> TestResult {
        let mut res = TestClient::get("http://example.com/cart")
            .send(&service(Router::with_path("cart")))
            .await;

        assert_eq!(res.take_string().await?, "none");

        Ok(())
    }

    #[tokio::test]
    async fn malformed_session_is_bad_request() -> TestResult {
        let res = TestClient::get("http://example.com/cart")
            .add_header(CART_SESSION_HEADER, "not-a-session", true)
            .send(&service(Router::with_path("cart")))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
