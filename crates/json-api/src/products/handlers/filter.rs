//! Filter Products Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::data::ProductFilter;

use crate::{extensions::*, products::models::ProductsResponse};

/// Filter Products Request
///
/// Every criterion is optional; supplied ones must all match.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct FilterProductsRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub active_only: bool,
}

impl From<FilterProductsRequest> for ProductFilter {
    fn from(request: FilterProductsRequest) -> Self {
        ProductFilter {
            name: request.name.filter(|name| !name.trim().is_empty()),
            description: request
                .description
                .filter(|description| !description.trim().is_empty()),
            min_price: request.min_price,
            max_price: request.max_price,
            active_only: request.active_only,
        }
    }
}

/// Filter Products Handler
#[endpoint(tags("products"), summary = "Filter Products")]
pub(crate) async fn handler(
    json: JsonBody<FilterProductsRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.state()?;

    let products = state
        .app
        .products
        .list_products(json.into_inner().into())
        .await
        .or_500("failed to filter products")?;

    Ok(Json(products.into()))
}
