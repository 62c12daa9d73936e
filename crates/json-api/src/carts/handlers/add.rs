//! Add To Cart Handler

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

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddToCartRequest {
    pub product_id: Uuid,
    pub quantity: u32,
}

/// Add To Cart Handler
///
/// Adds to the caller's cart, creating it on first use. Anonymous callers
/// without a session get one in the `X-Cart-Session` response header.
#[endpoint(
    tags("carts"),
    summary = "Add To Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Inactive product or invalid quantity"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent modification"),
    ),
)]
#[tracing::instrument(
    name = "carts.add",
    skip(req, json, depot, res),
    fields(product_uuid = tracing::field::Empty, quantity = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.state()?;
    let request = json.into_inner();
    let owner = owner::require_or_mint(req, depot, res)?;

    let span = tracing::Span::current();

    span.record("product_uuid", tracing::field::display(request.product_id));
    span.record("quantity", tracing::field::display(request.quantity));

    let cart = state
        .app
        .carts
        .add_item(owner, request.product_id.into(), request.quantity)
        .await
        .map_err(into_status_error)?;

    tracing::info!(cart_uuid = %cart.uuid, total_price = cart.total_price, "added to cart");

    Ok(Json(cart.into()))
}
