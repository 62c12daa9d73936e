//! Cancel Booking Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::domain::bookings::BookingStatus;

use crate::bookings::{handlers::transition::set_status, models::BookingResponse};

/// Cancel Booking Handler
///
/// Cancels a pending or confirmed booking. Repeating the request is a no-op.
#[endpoint(
    tags("bookings"),
    summary = "Cancel Booking",
    responses(
        (status_code = StatusCode::OK, description = "Booking status"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
    ),
)]
#[tracing::instrument(name = "bookings.cancel", skip_all, err)]
pub(crate) async fn handler(
    booking: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    set_status(depot, booking.into_inner(), BookingStatus::Canceled).await
}
