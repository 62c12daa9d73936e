//! Update Booking Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::bookings::data::BookingUpdate;

use crate::{
    bookings::{
        errors::into_status_error,
        models::{BookingResponse, ServicePayload},
    },
    extensions::*,
};

/// Update Booking Request
///
/// Omitted fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct UpdateBookingRequest {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub service: Option<ServicePayload>,
}

impl From<UpdateBookingRequest> for BookingUpdate {
    fn from(request: UpdateBookingRequest) -> Self {
        BookingUpdate {
            name: request.name.map(|name| name.trim().to_string()),
            phone_number: request.phone_number.map(|phone| phone.trim().to_string()),
            service: request.service.map(Into::into),
        }
    }
}

/// Update Booking Handler
///
/// Edits contact details or replaces the service of an active booking.
#[endpoint(
    tags("bookings"),
    summary = "Update Booking",
    responses(
        (status_code = StatusCode::OK, description = "Booking updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Nothing to update or blank field"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking not found"),
        (status_code = StatusCode::CONFLICT, description = "Booking no longer active"),
    ),
)]
#[tracing::instrument(
    name = "bookings.update",
    skip(id, json, depot),
    fields(booking_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<UpdateBookingRequest>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.state()?;
    let booking = id.into_inner();

    tracing::Span::current().record("booking_uuid", tracing::field::display(booking));

    let updated = state
        .app
        .bookings
        .update_booking(booking.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(booking_uuid = %booking, total_price = updated.total_price, "updated booking");

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::bookings::{
        BookingStatus, BookingsServiceError, MockBookingsService,
        records::{BookingUuid, ServiceSelection},
    };

    use crate::bookings::handlers::tests::{bookings_service, make_booking};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(
            bookings,
            Router::with_path("bookings/update/{id}").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_update_booking_replaces_service() -> TestResult {
        let uuid = BookingUuid::new();
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_update_booking()
            .once()
            .withf(move |booking, update| {
                *booking == uuid
                    && *update
                        == BookingUpdate {
                            name: None,
                            phone_number: Some("09998887777".to_string()),
                            service: Some(ServiceSelection {
                                service_type: "Cleaning".to_string(),
                                size: Some("Large".to_string()),
                                service_total: 2500,
                            }),
                        }
            })
            .return_once(move |_, update| {
                let mut booking = make_booking(uuid, "x@y.com", BookingStatus::Pending);
                booking.service = update.service;
                booking.total_price += 2500;

                Ok(booking)
            });

        let mut res = TestClient::patch(format!("http://example.com/bookings/update/{uuid}"))
            .json(&json!({
                "phoneNumber": "09998887777",
                "service": { "serviceType": "Cleaning", "size": "Large", "serviceTotal": 2500 },
            }))
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: BookingResponse = res.take_json().await?;

        assert_eq!(body.total_price, 4500);
        assert!(body.service.is_some(), "service attached");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_inactive_booking_returns_409() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_update_booking()
            .once()
            .return_once(|_, _| Err(BookingsServiceError::NotActive));

        let res = TestClient::patch(format!(
            "http://example.com/bookings/update/{}",
            BookingUuid::new()
        ))
        .json(&json!({ "name": "Grace" }))
        .send(&make_service(bookings))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_with_nothing_returns_400() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_update_booking()
            .once()
            .withf(|_, update| *update == BookingUpdate::default())
            .return_once(|_, _| Err(BookingsServiceError::Invalid("Nothing to update")));

        let res = TestClient::patch(format!(
            "http://example.com/bookings/update/{}",
            BookingUuid::new()
        ))
        .json(&json!({}))
        .send(&make_service(bookings))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
