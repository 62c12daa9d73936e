//! All Products Handler

use salvo::prelude::*;

use storefront_app::domain::products::data::ProductFilter;

use crate::{extensions::*, products::models::ProductsResponse};

/// All Products Handler
///
/// Returns every product, archived ones included.
#[endpoint(
    tags("products"),
    summary = "List All Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.state()?;

    let products = state
        .app
        .products
        .list_products(ProductFilter::all())
        .await
        .or_500("failed to fetch products")?;

    Ok(Json(products.into()))
}
