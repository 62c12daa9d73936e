//! My Bookings Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    bookings::{errors::into_status_error, models::CustomerBookingsResponse},
    extensions::*,
};

/// My Bookings Handler
///
/// Returns every booking for `email` with flags telling the client whether a
/// new booking can be placed.
#[endpoint(tags("bookings"), summary = "List Customer Bookings")]
pub(crate) async fn handler(
    email: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CustomerBookingsResponse>, StatusError> {
    let state = depot.state()?;
    let email = email.into_inner();

    let bookings = state
        .app
        .bookings
        .list_for_customer(email.trim())
        .await
        .map_err(into_status_error)?;

    Ok(Json(bookings.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::bookings::{
        BookingStatus, MockBookingsService,
        records::{BookingUuid, CustomerBookings},
    };

    use crate::bookings::handlers::tests::{bookings_service, make_booking};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(
            bookings,
            Router::with_path("bookings/my-bookings/{email}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_my_bookings_reports_flags() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_list_for_customer()
            .once()
            .withf(|email| email == "x@y.com")
            .return_once(|email| {
                Ok(CustomerBookings::new(vec![
                    make_booking(BookingUuid::new(), email, BookingStatus::Completed),
                    make_booking(BookingUuid::new(), email, BookingStatus::Pending),
                ]))
            });

        let mut res = TestClient::get("http://example.com/bookings/my-bookings/x@y.com")
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CustomerBookingsResponse = res.take_json().await?;

        assert_eq!(body.bookings.len(), 2);
        assert!(body.has_pending_or_confirmed, "pending booking present");
        assert!(body.has_completed_or_canceled, "completed booking present");

        Ok(())
    }

    #[tokio::test]
    async fn test_my_bookings_empty_for_new_customer() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_list_for_customer()
            .once()
            .return_once(|_| Ok(CustomerBookings::default()));

        let mut res = TestClient::get("http://example.com/bookings/my-bookings/new@y.com")
            .send(&make_service(bookings))
            .await;

        let body: CustomerBookingsResponse = res.take_json().await?;

        assert!(body.bookings.is_empty(), "expected no bookings");
        assert!(!body.has_pending_or_confirmed, "nothing active");

        Ok(())
    }
}
