//! All Bookings Handler

use salvo::prelude::*;

use crate::{
    bookings::{errors::into_status_error, models::GroupedBookingsResponse},
    extensions::*,
};

/// All Bookings Handler
///
/// Returns every booking grouped by customer email.
#[endpoint(
    tags("bookings"),
    summary = "List All Bookings",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<GroupedBookingsResponse>, StatusError> {
    let state = depot.state()?;

    let groups = state
        .app
        .bookings
        .list_all_grouped_by_email()
        .await
        .map_err(into_status_error)?;

    Ok(Json(groups.into()))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::bookings::{
        BookingStatus, MockBookingsService, records::BookingUuid,
    };

    use crate::bookings::handlers::tests::{bookings_service, make_booking};

    use super::*;

    #[tokio::test]
    async fn test_all_bookings_grouped_by_email() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_list_all_grouped_by_email()
            .once()
            .return_once(|| {
                let mut groups = BTreeMap::new();

                groups.insert(
                    "a@y.com".to_string(),
                    vec![make_booking(BookingUuid::new(), "a@y.com", BookingStatus::Pending)],
                );
                groups.insert(
                    "b@y.com".to_string(),
                    vec![
                        make_booking(BookingUuid::new(), "b@y.com", BookingStatus::Canceled),
                        make_booking(BookingUuid::new(), "b@y.com", BookingStatus::Confirmed),
                    ],
                );

                Ok(groups)
            });

        let mut res = TestClient::get("http://example.com/bookings/all-bookings")
            .send(&bookings_service(
                bookings,
                Router::with_path("bookings/all-bookings").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: GroupedBookingsResponse = res.take_json().await?;
        let emails: Vec<&str> = body.bookings.keys().map(String::as_str).collect();

        assert_eq!(emails, vec!["a@y.com", "b@y.com"]);
        assert_eq!(body.bookings.get("b@y.com").map(Vec::len), Some(2));

        Ok(())
    }
}
