//! Confirm Booking Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::domain::bookings::BookingStatus;

use crate::bookings::{handlers::transition::set_status, models::BookingResponse};

/// Confirm Booking Handler
///
/// Moves a pending booking to confirmed. Repeating the request is a no-op.
#[endpoint(
    tags("bookings"),
    summary = "Confirm Booking",
    responses(
        (status_code = StatusCode::OK, description = "Booking status"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
    ),
)]
#[tracing::instrument(name = "bookings.confirm", skip_all, err)]
pub(crate) async fn handler(
    booking: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    set_status(depot, booking.into_inner(), BookingStatus::Confirmed).await
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::bookings::{
        BookingsServiceError, MockBookingsService, records::BookingUuid,
    };

    use crate::bookings::handlers::tests::{bookings_service, make_booking};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(
            bookings,
            Router::with_path("bookings/confirm/{booking}").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_confirm_booking_success() -> TestResult {
        let uuid = BookingUuid::new();
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_set_status()
            .once()
            .withf(move |booking, status| *booking == uuid && *status == BookingStatus::Confirmed)
            .return_once(move |_, status| Ok(make_booking(uuid, "x@y.com", status)));

        let mut res = TestClient::patch(format!("http://example.com/bookings/confirm/{uuid}"))
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: BookingResponse = res.take_json().await?;

        assert_eq!(body.status, "Confirmed");

        Ok(())
    }

    #[tokio::test]
    async fn test_confirm_unknown_booking_returns_404() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_set_status()
            .once()
            .return_once(|_, _| Err(BookingsServiceError::NotFound));

        let res = TestClient::patch(format!(
            "http://example.com/bookings/confirm/{}",
            BookingUuid::new()
        ))
        .send(&make_service(bookings))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
