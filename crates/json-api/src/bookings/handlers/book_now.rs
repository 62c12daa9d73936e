//! Book Now Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::bookings::{
    data::{BookedLine, NewBooking},
    records::BookingUuid,
};

use crate::{
    bookings::{
        errors::into_status_error,
        models::{BookingPlacedResponse, ServicePayload},
    },
    extensions::*,
    observability,
};

/// A product line in a booking request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookedLinePayload {
    pub product_id: Uuid,
    pub quantity: u32,
}

impl From<BookedLinePayload> for BookedLine {
    fn from(line: BookedLinePayload) -> Self {
        BookedLine {
            product_uuid: line.product_id.into(),
            quantity: line.quantity,
        }
    }
}

/// Book Now Request
///
/// Prices are looked up server-side; any client-side total is ignored.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookNowRequest {
    pub name: String,
    pub phone_number: String,
    #[serde(default)]
    pub products_booked: Vec<BookedLinePayload>,
    pub service: Option<ServicePayload>,
}

/// Book Now Handler
///
/// Creates a booking for `email`, or merges into the customer's active one.
#[endpoint(
    tags("bookings"),
    summary = "Book Now",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Booking created"),
        (status_code = StatusCode::OK, description = "Merged into the active booking"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid booking or booking already active"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent modification"),
    ),
)]
#[tracing::instrument(
    name = "bookings.book_now",
    skip(email, json, depot, res),
    fields(email = tracing::field::Empty, lines = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    email: PathParam<String>,
    json: JsonBody<BookNowRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BookingPlacedResponse>, StatusError> {
    let state = depot.state()?;
    let email = email.into_inner().trim().to_string();
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("email", tracing::field::display(&email));
    span.record("lines", tracing::field::display(request.products_booked.len()));

    let outcome = state
        .app
        .bookings
        .create_or_merge_booking(NewBooking {
            uuid: BookingUuid::new(),
            user_uuid: depot.identity().map(|identity| identity.user_uuid),
            name: request.name.trim().to_string(),
            email,
            phone_number: request.phone_number.trim().to_string(),
            products: request.products_booked.into_iter().map(Into::into).collect(),
            service: request.service.map(Into::into),
        })
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        booking_uuid = %outcome.booking.uuid,
        merged = outcome.merged,
        total_price = outcome.booking.total_price,
        "placed booking"
    );

    observability::record_booking_placed(outcome.merged);

    if !outcome.merged {
        res.status_code(StatusCode::CREATED);
    }

    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        bookings::{
            BookingStatus, BookingsServiceError, MockBookingsService,
            records::{BookingOutcome, ServiceSelection},
        },
        products::records::ProductUuid,
    };

    use crate::{
        bookings::handlers::tests::{bookings_service, make_booking},
        errors::ErrorResponse,
        test_helpers::{TEST_USER_UUID, inject_customer},
    };

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(
            bookings,
            Router::with_path("bookings/book-now/{email}").post(handler),
        )
    }

    #[tokio::test]
    async fn test_book_now_creates_pending_booking() -> TestResult {
        let product = ProductUuid::new();
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_create_or_merge_booking()
            .once()
            .withf(move |request| {
                request.email == "x@y.com"
                    && request.user_uuid.is_none()
                    && request.products
                        == vec![BookedLine {
                            product_uuid: product,
                            quantity: 5,
                        }]
                    && request.service.is_none()
            })
            .returning(|request| {
                Ok(BookingOutcome {
                    booking: make_booking(request.uuid, &request.email, BookingStatus::Pending),
                    merged: false,
                })
            });

        let mut res = TestClient::post("http://example.com/bookings/book-now/x@y.com")
            .json(&json!({
                "name": "Ada",
                "phoneNumber": "09171234567",
                "productsBooked": [{ "productId": product.into_uuid(), "quantity": 5 }],
                "totalPrice": 50,
            }))
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: BookingPlacedResponse = res.take_json().await?;

        assert!(!body.merged, "expected a new booking");
        assert_eq!(body.booking.status, "Pending");
        assert_eq!(body.booking.email, "x@y.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_book_now_merge_returns_200() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_create_or_merge_booking()
            .once()
            .withf(|request| {
                request.service
                    == Some(ServiceSelection {
                        service_type: "Cleaning".to_string(),
                        size: None,
                        service_total: 2500,
                    })
            })
            .returning(|request| {
                Ok(BookingOutcome {
                    booking: make_booking(BookingUuid::new(), &request.email, BookingStatus::Pending),
                    merged: true,
                })
            });

        let mut res = TestClient::post("http://example.com/bookings/book-now/x@y.com")
            .json(&json!({
                "name": "Ada",
                "phoneNumber": "09171234567",
                "service": { "serviceType": "Cleaning", "size": "", "serviceTotal": 2500 },
            }))
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: BookingPlacedResponse = res.take_json().await?;

        assert!(body.merged, "expected a merge");

        Ok(())
    }

    #[tokio::test]
    async fn test_book_now_with_active_booking_returns_400() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_create_or_merge_booking()
            .once()
            .return_once(|_| Err(BookingsServiceError::AlreadyActive));

        let mut res = TestClient::post("http://example.com/bookings/book-now/x@y.com")
            .json(&json!({
                "name": "Ada",
                "phoneNumber": "09171234567",
                "productsBooked": [{ "productId": ProductUuid::new().into_uuid(), "quantity": 1 }],
            }))
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(
            body.error.brief,
            "You already have a pending or confirmed booking."
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_book_now_records_signed_in_user() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_create_or_merge_booking()
            .once()
            .withf(|request| request.user_uuid == Some(TEST_USER_UUID))
            .returning(|request| {
                Ok(BookingOutcome {
                    booking: make_booking(request.uuid, &request.email, BookingStatus::Pending),
                    merged: false,
                })
            });

        let service = bookings_service(
            bookings,
            Router::with_path("bookings/book-now/{email}")
                .hoop(inject_customer)
                .post(handler),
        );

        let res = TestClient::post("http://example.com/bookings/book-now/ada@example.com")
            .json(&json!({
                "name": "Ada",
                "phoneNumber": "09171234567",
                "productsBooked": [{ "productId": ProductUuid::new().into_uuid(), "quantity": 1 }],
            }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_book_now_unknown_product_returns_404() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_create_or_merge_booking()
            .once()
            .return_once(|_| Err(BookingsServiceError::ProductNotFound));

        let res = TestClient::post("http://example.com/bookings/book-now/x@y.com")
            .json(&json!({
                "name": "Ada",
                "phoneNumber": "09171234567",
                "productsBooked": [{ "productId": ProductUuid::new().into_uuid(), "quantity": 1 }],
            }))
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
