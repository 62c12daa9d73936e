//! Booking creation and merge policy.
//!
//! A customer may queue products and a service together, but cannot open a
//! second independent booking while one is still Pending or Confirmed.

use jiff::Timestamp;

use crate::domain::{
    bookings::{
        data::{BookingUpdate, NewBooking},
        errors::BookingsServiceError,
        records::{BookedProductRecord, BookedProductUuid, BookingRecord, ServiceSelection},
        status::BookingStatus,
    },
    products::records::ProductRecord,
};

/// What to do with an incoming booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BookingPlan {
    /// Store a fresh Pending booking.
    Create,

    /// Fold the request into the customer's active booking.
    Merge,
}

/// Decide between creating and merging given the customer's latest booking.
///
/// An active booking without products stays open for merging. One that
/// already has products only accepts a request carrying a service.
pub(crate) fn plan(
    latest: Option<&BookingRecord>,
    has_service: bool,
) -> Result<BookingPlan, BookingsServiceError> {
    match latest {
        None => Ok(BookingPlan::Create),
        Some(booking) if !booking.status.is_active() => Ok(BookingPlan::Create),
        Some(booking) if booking.products.is_empty() || has_service => Ok(BookingPlan::Merge),
        Some(_) => Err(BookingsServiceError::AlreadyActive),
    }
}

/// Snapshot one requested line at the product's current price.
pub(crate) fn price_line(
    product: &ProductRecord,
    quantity: u32,
) -> Result<BookedProductRecord, BookingsServiceError> {
    if !product.is_active {
        return Err(BookingsServiceError::ProductInactive);
    }

    if quantity == 0 || i32::try_from(quantity).is_err() {
        return Err(BookingsServiceError::Invalid(
            "Quantity must be a positive number",
        ));
    }

    let subtotal = product
        .price
        .checked_mul(u64::from(quantity))
        .filter(|subtotal| i64::try_from(*subtotal).is_ok())
        .ok_or(BookingsServiceError::Invalid("Booking total is out of range"))?;

    Ok(BookedProductRecord {
        uuid: BookedProductUuid::new(),
        product_uuid: product.uuid,
        product_name: product.name.clone(),
        quantity,
        subtotal,
    })
}

/// Σ product subtotals plus the service total.
pub(crate) fn booking_total(
    products: &[BookedProductRecord],
    service: Option<&ServiceSelection>,
) -> Result<u64, BookingsServiceError> {
    products
        .iter()
        .map(|line| line.subtotal)
        .chain(service.map(|service| service.service_total))
        .try_fold(0_u64, u64::checked_add)
        .filter(|total| i64::try_from(*total).is_ok())
        .ok_or(BookingsServiceError::Invalid("Booking total is out of range"))
}

impl BookingRecord {
    /// A new Pending booking built from a validated request and its priced lines.
    pub(crate) fn open(
        request: NewBooking,
        products: Vec<BookedProductRecord>,
        now: Timestamp,
    ) -> Result<Self, BookingsServiceError> {
        let total_price = booking_total(&products, request.service.as_ref())?;

        Ok(Self {
            uuid: request.uuid,
            user_uuid: request.user_uuid,
            name: request.name,
            email: request.email,
            phone_number: request.phone_number,
            products,
            total_price,
            service: request.service,
            status: BookingStatus::Pending,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Append `products` and attach or overwrite the service.
    pub(crate) fn absorb(
        &mut self,
        request: NewBooking,
        products: Vec<BookedProductRecord>,
    ) -> Result<(), BookingsServiceError> {
        let mut merged = self.products.clone();
        merged.extend(products);

        let service = request.service.or_else(|| self.service.clone());
        let total_price = booking_total(&merged, service.as_ref())?;

        self.products = merged;
        self.service = service;
        self.total_price = total_price;

        if self.user_uuid.is_none() {
            self.user_uuid = request.user_uuid;
        }

        Ok(())
    }

    /// Apply a contact/service edit to an active booking.
    pub(crate) fn apply_update(&mut self, update: BookingUpdate) -> Result<(), BookingsServiceError> {
        if !self.status.is_active() {
            return Err(BookingsServiceError::NotActive);
        }

        let service = update.service.or_else(|| self.service.clone());
        let total_price = booking_total(&self.products, service.as_ref())?;

        if let Some(name) = update.name {
            self.name = name;
        }

        if let Some(phone_number) = update.phone_number {
            self.phone_number = phone_number;
        }

        self.service = service;
        self.total_price = total_price;

        Ok(())
    }
}
