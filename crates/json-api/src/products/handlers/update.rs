//! Update Product Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
};

/// Update Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateProductRequest {
    pub name: String,
    pub description: String,
    /// Price in minor currency units
    pub price: u64,
    pub image_url: Option<String>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name.trim().to_string(),
            description: request.description.trim().to_string(),
            price: request.price,
            image_url: request.image_url,
        }
    }
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Name already taken"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(product_uuid = tracing::field::Empty, price = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state()?;
    let request = json.into_inner();
    let product = product.into_inner();

    let span = tracing::Span::current();

    span.record("product_uuid", tracing::field::display(product));
    span.record("price", tracing::field::display(request.price));

    let updated = state
        .app
        .products
        .update_product(product.into(), request.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_uuid = %product, "updated product");

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::products::handlers::tests::{make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(
            products,
            Router::with_path("products/{product}/update").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_update_product_success() -> TestResult {
        let uuid = ProductUuid::new();
        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |product, update| {
                *product == uuid
                    && *update
                        == ProductUpdate {
                            name: "Big Mug".to_string(),
                            description: "A bigger mug".to_string(),
                            price: 1500,
                            image_url: None,
                        }
            })
            .return_once(move |_, update| Ok(make_product(uuid, &update.name, update.price)));

        let mut res = TestClient::patch(format!("http://example.com/products/{uuid}/update"))
            .json(&json!({ "name": "Big Mug", "description": "A bigger mug", "price": 1500 }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(body.name, "Big Mug");
        assert_eq!(body.price, 1500);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_blank_name_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_update_product().once().return_once(|_, _| {
            Err(ProductsServiceError::Invalid(
                "Name and description are required",
            ))
        });

        let res = TestClient::patch(format!(
            "http://example.com/products/{}/update",
            ProductUuid::new()
        ))
        .json(&json!({ "name": "  ", "description": "A mug", "price": 1500 }))
        .send(&make_service(products))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_non_numeric_price_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_update_product().never();

        let res = TestClient::patch(format!(
            "http://example.com/products/{}/update",
            ProductUuid::new()
        ))
        .json(&json!({ "name": "Mug", "description": "A mug", "price": "ten" }))
        .send(&make_service(products))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::patch(format!(
            "http://example.com/products/{}/update",
            ProductUuid::new()
        ))
        .json(&json!({ "name": "Mug", "description": "A mug", "price": 1500 }))
        .send(&make_service(products))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
