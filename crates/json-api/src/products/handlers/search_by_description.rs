//! Search Products By Description Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::data::ProductFilter;

use crate::{extensions::*, products::models::ProductsResponse};

/// Search By Description Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchByDescriptionRequest {
    /// Case-insensitive substring of the product description
    pub description: String,
}

/// Search Products By Description Handler
#[endpoint(tags("products"), summary = "Search Products By Description")]
pub(crate) async fn handler(
    json: JsonBody<SearchByDescriptionRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.state()?;
    let description = json.into_inner().description;

    let products = state
        .app
        .products
        .list_products(ProductFilter::description_contains(description))
        .await
        .or_500("failed to search products by description")?;

    Ok(Json(products.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::products::MockProductsService;

    use crate::products::handlers::tests::products_service;

    use super::*;

    #[tokio::test]
    async fn test_search_by_description_passes_substring() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter| *filter == ProductFilter::description_contains("ceramic"))
            .return_once(|_| Ok(Vec::new()));

        let mut res = TestClient::post("http://example.com/products/search-by-description")
            .json(&json!({ "description": "ceramic" }))
            .send(&products_service(
                products,
                Router::with_path("products/search-by-description").post(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductsResponse = res.take_json().await?;

        assert!(body.products.is_empty(), "expected no matches");

        Ok(())
    }
}
