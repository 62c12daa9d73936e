//! Remove From Cart Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, models::CartResponse, owner},
    extensions::*,
};

/// Remove From Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Remove From Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or line not found"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent modification"),
    ),
)]
#[tracing::instrument(
    name = "carts.remove",
    skip(product, req, depot),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.state()?;
    let product = product.into_inner();
    let owner = owner::require(req, depot)?;

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    let cart = state
        .app
        .carts
        .remove_item(owner, product.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(cart_uuid = %cart.uuid, total_price = cart.total_price, "removed from cart");

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::records::ProductUuid,
    };

    use crate::{
        carts::handlers::tests::{carts_service, make_cart, make_item},
        test_helpers::inject_customer,
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(
            carts,
            Router::with_path("cart/{product}/remove-from-cart")
                .hoop(inject_customer)
                .patch(handler),
        )
    }

    #[tokio::test]
    async fn test_remove_from_cart_subtracts_line() -> TestResult {
        let product = ProductUuid::new();
        let kept = ProductUuid::new();
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(move |_, uuid| *uuid == product)
            .return_once(move |owner, _| Ok(make_cart(owner, vec![make_item(kept, 1, 300)])));

        let mut res = TestClient::patch(format!(
            "http://example.com/cart/{product}/remove-from-cart"
        ))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartResponse = res.take_json().await?;

        assert_eq!(body.total_price, 300);
        assert_eq!(body.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_missing_line_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::ItemNotFound));

        let res = TestClient::patch(format!(
            "http://example.com/cart/{}/remove-from-cart",
            ProductUuid::new()
        ))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
