//! Search Products By Name Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::data::ProductFilter;

use crate::{extensions::*, products::models::ProductsResponse};

/// Search By Name Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchByNameRequest {
    /// Case-insensitive substring of the product name
    pub name: String,
}

/// Search Products By Name Handler
#[endpoint(tags("products"), summary = "Search Products By Name")]
pub(crate) async fn handler(
    json: JsonBody<SearchByNameRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.state()?;

    let products = state
        .app
        .products
        .list_products(ProductFilter::name_contains(json.into_inner().name))
        .await
        .or_500("failed to search products by name")?;

    Ok(Json(products.into()))
}
