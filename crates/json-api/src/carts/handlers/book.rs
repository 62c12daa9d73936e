//! Book Cart Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use storefront_app::domain::{
    bookings::{
        data::{BookedLine, NewBooking},
        records::BookingUuid,
    },
    carts::CartsServiceError,
};

use crate::{
    bookings::{
        self,
        models::{BookingPlacedResponse, ServicePayload},
    },
    carts::{errors::into_status_error, owner},
    extensions::*,
    observability,
};

/// Book Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookCartRequest {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub service: Option<ServicePayload>,
}

/// Book Cart Handler
///
/// Turns the caller's cart into a booking, merging into the customer's
/// active booking where allowed, then empties the cart.
#[endpoint(
    tags("carts"),
    summary = "Book Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Booking created"),
        (status_code = StatusCode::OK, description = "Merged into the active booking"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or booking already active"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
#[tracing::instrument(
    name = "carts.book",
    skip(req, json, depot, res),
    fields(cart_uuid = tracing::field::Empty, email = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    json: JsonBody<BookCartRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BookingPlacedResponse>, StatusError> {
    let state = depot.state()?;
    let request = json.into_inner();
    let owner = owner::require(req, depot)?;

    let cart = state
        .app
        .carts
        .get_cart(owner)
        .await
        .map_err(into_status_error)?;

    let span = tracing::Span::current();

    span.record("cart_uuid", tracing::field::display(cart.uuid));
    span.record("email", tracing::field::display(&request.email));

    if cart.items.is_empty() && request.service.is_none() {
        return Err(StatusError::bad_request().brief("Your cart is empty"));
    }

    let outcome = state
        .app
        .bookings
        .create_or_merge_booking(NewBooking {
            uuid: BookingUuid::new(),
            user_uuid: depot.identity().map(|identity| identity.user_uuid),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone_number: request.phone_number.trim().to_string(),
            products: cart
                .items
                .iter()
                .map(|item| BookedLine {
                    product_uuid: item.product_uuid,
                    quantity: item.quantity,
                })
                .collect(),
            service: request.service.map(Into::into),
        })
        .await
        .map_err(bookings::into_status_error)?;

    // The booking stands even if the cart could not be emptied. A cart that
    // changed after it was read keeps every line, including unbooked ones.
    match state
        .app
        .carts
        .clear_cart_at_version(owner, cart.version)
        .await
    {
        Ok(_) => {}
        Err(CartsServiceError::Conflict) => {
            warn!(cart_uuid = %cart.uuid, "cart changed during checkout, left intact");
        }
        Err(clear_error) => {
            error!(cart_uuid = %cart.uuid, "failed to clear booked cart: {clear_error}");
        }
    }

    tracing::info!(
        cart_uuid = %cart.uuid,
        booking_uuid = %outcome.booking.uuid,
        merged = outcome.merged,
        "booked cart"
    );

    observability::record_booking_placed(outcome.merged);

    if !outcome.merged {
        res.status_code(StatusCode::CREATED);
    }

    Ok(Json(outcome.into()))
}
