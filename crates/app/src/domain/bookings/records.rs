//! Booking Records

use jiff::Timestamp;

use crate::{
    domain::{
        bookings::status::BookingStatus, products::records::ProductUuid,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Booking UUID
pub type BookingUuid = TypedUuid<BookingRecord>;

/// Booked Product UUID
pub type BookedProductUuid = TypedUuid<BookedProductRecord>;

/// A non-product service attached to a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSelection {
    pub service_type: String,
    pub size: Option<String>,
    /// Price of the service in minor currency units.
    pub service_total: u64,
}

/// Booking Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub uuid: BookingUuid,
    pub user_uuid: Option<UserUuid>,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub products: Vec<BookedProductRecord>,
    /// Σ product subtotals plus the service total, if any.
    pub total_price: u64,
    pub service: Option<ServiceSelection>,
    pub status: BookingStatus,
    /// Optimistic concurrency revision, bumped on every save.
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Snapshot of a product line taken at booking time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookedProductRecord {
    pub uuid: BookedProductUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub quantity: u32,
    pub subtotal: u64,
}

/// Result of a create-or-merge request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingOutcome {
    pub booking: BookingRecord,
    /// `true` when the request was folded into an existing active booking.
    pub merged: bool,
}

/// Every booking for one email plus the flags clients use to decide whether a
/// new booking is currently allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerBookings {
    pub bookings: Vec<BookingRecord>,
    pub has_pending_or_confirmed: bool,
    pub has_completed_or_canceled: bool,
}

impl CustomerBookings {
    #[must_use]
    pub fn new(bookings: Vec<BookingRecord>) -> Self {
        let has_pending_or_confirmed = bookings.iter().any(|b| b.status.is_active());
        let has_completed_or_canceled = bookings.iter().any(|b| !b.status.is_active());

        Self {
            bookings,
            has_pending_or_confirmed,
            has_completed_or_canceled,
        }
    }
}
