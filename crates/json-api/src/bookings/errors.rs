//! Booking Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::bookings::BookingsServiceError;

pub(crate) fn into_status_error(error: BookingsServiceError) -> StatusError {
    match error {
        BookingsServiceError::NotFound => StatusError::not_found().brief("Booking not found"),
        BookingsServiceError::ProductNotFound => {
            StatusError::not_found().brief("Product not found")
        }
        BookingsServiceError::ProductInactive => {
            StatusError::bad_request().brief("Product is not available")
        }
        BookingsServiceError::Invalid(message) => StatusError::bad_request().brief(message),
        BookingsServiceError::AlreadyActive => StatusError::bad_request()
            .brief("You already have a pending or confirmed booking."),
        BookingsServiceError::InvalidTransition { from, to } => {
            StatusError::conflict().brief(format!("Cannot change booking from {from} to {to}"))
        }
        BookingsServiceError::NotActive => {
            StatusError::conflict().brief("Booking is no longer active")
        }
        BookingsServiceError::Conflict | BookingsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Booking was modified concurrently, retry")
        }
        BookingsServiceError::InvalidReference
        | BookingsServiceError::MissingRequiredData
        | BookingsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid booking payload")
        }
        BookingsServiceError::Sql(source) => {
            error!("booking storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
