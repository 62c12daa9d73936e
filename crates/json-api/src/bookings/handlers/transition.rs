//! Shared status change flow.

use salvo::prelude::*;
use uuid::Uuid;

use storefront_app::domain::bookings::BookingStatus;

use crate::{
    bookings::{errors::into_status_error, models::BookingResponse},
    extensions::*,
    observability,
};

pub(super) async fn set_status(
    depot: &Depot,
    booking: Uuid,
    status: BookingStatus,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.state()?;

    let updated = state
        .app
        .bookings
        .set_status(booking.into(), status)
        .await
        .map_err(into_status_error)?;

    tracing::info!(booking_uuid = %booking, %status, "changed booking status");

    observability::record_booking_status_change(status.as_str());

    Ok(Json(updated.into()))
}
