//! Search Products By Price Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::data::ProductFilter;

use crate::{extensions::*, products::models::ProductsResponse};

/// Search By Price Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchByPriceRequest {
    /// Inclusive lower bound in minor currency units
    pub min_price: u64,

    /// Inclusive upper bound in minor currency units
    pub max_price: u64,
}

/// Search Products By Price Handler
///
/// Both bounds are required.
#[endpoint(
    tags("products"),
    summary = "Search Products By Price Range",
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid bounds"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SearchByPriceRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.state()?;
    let request = json.into_inner();

    if request.min_price > request.max_price {
        return Err(StatusError::bad_request().brief("minPrice must not exceed maxPrice"));
    }

    let products = state
        .app
        .products
        .list_products(ProductFilter::price_between(
            request.min_price,
            request.max_price,
        ))
        .await
        .or_500("failed to search products by price")?;

    Ok(Json(products.into()))
}
