//! Update Cart Quantity Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, models::CartResponse, owner},
    extensions::*,
};

/// Update Cart Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateCartQuantityRequest {
    pub product_id: Uuid,
    /// Must be positive
    pub new_quantity: u32,
}

/// Update Cart Quantity Handler
///
/// Replaces a line's quantity and reprices it at the current unit price.
#[endpoint(
    tags("carts"),
    summary = "Update Cart Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart, product or line not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity or inactive product"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent modification"),
    ),
)]
#[tracing::instrument(
    name = "carts.update_quantity",
    skip(req, json, depot),
    fields(product_uuid = tracing::field::Empty, quantity = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    json: JsonBody<UpdateCartQuantityRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.state()?;
    let request = json.into_inner();
    let owner = owner::require(req, depot)?;

    let span = tracing::Span::current();

    span.record("product_uuid", tracing::field::display(request.product_id));
    span.record("quantity", tracing::field::display(request.new_quantity));

    let cart = state
        .app
        .carts
        .set_item_quantity(owner, request.product_id.into(), request.new_quantity)
        .await
        .map_err(into_status_error)?;

    tracing::info!(cart_uuid = %cart.uuid, total_price = cart.total_price, "updated cart quantity");

    Ok(Json(cart.into()))
}
