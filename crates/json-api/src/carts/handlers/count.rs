//! Cart Item Count Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{errors::into_status_error, owner},
    extensions::*,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemCountResponse {
    /// Sum of line quantities
    pub count: u64,
}

/// Cart Item Count Handler
#[endpoint(
    tags("carts"),
    summary = "Cart Item Count",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartItemCountResponse>, StatusError> {
    let state = depot.state()?;
    let owner = owner::require(req, depot)?;

    let count = state
        .app
        .carts
        .count_items(owner)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartItemCountResponse { count }))
}
