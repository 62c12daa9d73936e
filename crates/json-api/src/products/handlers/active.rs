//! Active Products Handler

use salvo::prelude::*;

use storefront_app::domain::products::data::ProductFilter;

use crate::{extensions::*, products::models::ProductsResponse};

/// Active Products Handler
///
/// Returns the products currently on sale.
#[endpoint(tags("products"), summary = "List Active Products")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.state()?;

    let products = state
        .app
        .products
        .list_products(ProductFilter::active())
        .await
        .or_500("failed to fetch active products")?;

    Ok(Json(products.into()))
}
