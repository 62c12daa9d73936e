//! Booking Models

use std::collections::BTreeMap;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::bookings::records::{
    BookedProductRecord, BookingOutcome, BookingRecord, CustomerBookings, ServiceSelection,
};

/// A service added to a booking.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServicePayload {
    pub service_type: String,
    pub size: Option<String>,
    /// Price of the service in minor currency units
    pub service_total: u64,
}

impl From<ServicePayload> for ServiceSelection {
    fn from(service: ServicePayload) -> Self {
        ServiceSelection {
            service_type: service.service_type.trim().to_string(),
            size: service.size.filter(|size| !size.trim().is_empty()),
            service_total: service.service_total,
        }
    }
}

impl From<ServiceSelection> for ServicePayload {
    fn from(service: ServiceSelection) -> Self {
        Self {
            service_type: service.service_type,
            size: service.size,
            service_total: service.service_total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookedProductResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub quantity: u32,
    pub subtotal: u64,
}

impl From<BookedProductRecord> for BookedProductResponse {
    fn from(line: BookedProductRecord) -> Self {
        Self {
            uuid: line.uuid.into(),
            product_uuid: line.product_uuid.into(),
            product_name: line.product_name,
            quantity: line.quantity,
            subtotal: line.subtotal,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingResponse {
    pub uuid: Uuid,

    /// Account that placed the booking, when it was placed signed in
    pub user_uuid: Option<Uuid>,

    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub products_booked: Vec<BookedProductResponse>,

    /// Product subtotals plus the service total, in minor currency units
    pub total_price: u64,

    pub service: Option<ServicePayload>,

    /// One of `Pending`, `Confirmed`, `Completed` or `Canceled`
    pub status: String,

    pub created_at: String,
    pub updated_at: String,
}

impl From<BookingRecord> for BookingResponse {
    fn from(booking: BookingRecord) -> Self {
        Self {
            uuid: booking.uuid.into(),
            user_uuid: booking.user_uuid.map(Into::into),
            name: booking.name,
            email: booking.email,
            phone_number: booking.phone_number,
            products_booked: booking.products.into_iter().map(Into::into).collect(),
            total_price: booking.total_price,
            service: booking.service.map(Into::into),
            status: booking.status.to_string(),
            created_at: booking.created_at.to_string(),
            updated_at: booking.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingPlacedResponse {
    pub message: String,

    /// Whether the request was merged into an existing active booking
    pub merged: bool,

    pub booking: BookingResponse,
}

impl From<BookingOutcome> for BookingPlacedResponse {
    fn from(outcome: BookingOutcome) -> Self {
        let message = if outcome.merged {
            "Booking updated successfully"
        } else {
            "Booking created successfully"
        };

        Self {
            message: message.to_string(),
            merged: outcome.merged,
            booking: outcome.booking.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomerBookingsResponse {
    pub bookings: Vec<BookingResponse>,
    pub has_pending_or_confirmed: bool,
    pub has_completed_or_canceled: bool,
}

impl From<CustomerBookings> for CustomerBookingsResponse {
    fn from(customer: CustomerBookings) -> Self {
        Self {
            bookings: customer.bookings.into_iter().map(Into::into).collect(),
            has_pending_or_confirmed: customer.has_pending_or_confirmed,
            has_completed_or_canceled: customer.has_completed_or_canceled,
        }
    }
}

/// Every booking keyed by customer email, in email order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GroupedBookingsResponse {
    pub bookings: BTreeMap<String, Vec<BookingResponse>>,
}

impl From<BTreeMap<String, Vec<BookingRecord>>> for GroupedBookingsResponse {
    fn from(groups: BTreeMap<String, Vec<BookingRecord>>) -> Self {
        Self {
            bookings: groups
                .into_iter()
                .map(|(email, bookings)| {
                    (email, bookings.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }
}
