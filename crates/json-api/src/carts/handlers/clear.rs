//! Clear Cart Handler

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, models::CartResponse, owner},
    extensions::*,
};

/// Clear Cart Handler
///
/// Removes every line and zeroes the total.
#[endpoint(
    tags("carts"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Empty cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
#[tracing::instrument(name = "carts.clear", skip_all, err)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.state()?;
    let owner = owner::require(req, depot)?;

    let cart = state
        .app
        .carts
        .clear_cart(owner)
        .await
        .map_err(into_status_error)?;

    tracing::info!(cart_uuid = %cart.uuid, "cleared cart");

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::carts::MockCartsService;

    use crate::{
        carts::handlers::tests::{carts_service, make_cart},
        test_helpers::inject_customer,
    };

    use super::*;

    #[tokio::test]
    async fn test_clear_cart_zeroes_total() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_clear_cart()
            .once()
            .return_once(|owner| Ok(make_cart(owner, Vec::new())));

        let mut res = TestClient::put("http://example.com/cart/clear-cart")
            .send(&carts_service(
                carts,
                Router::with_path("cart/clear-cart")
                    .hoop(inject_customer)
                    .put(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartResponse = res.take_json().await?;

        assert_eq!(body.total_price, 0);
        assert!(body.items.is_empty(), "cart should be empty");

        Ok(())
    }
}
