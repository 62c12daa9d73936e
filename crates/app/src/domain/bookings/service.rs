//! Bookings service.

use std::collections::BTreeMap;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        bookings::{
            data::{BookedLine, BookingUpdate, NewBooking},
            errors::BookingsServiceError,
            merge::{BookingPlan, plan, price_line},
            records::{
                BookedProductRecord, BookingOutcome, BookingRecord, BookingUuid, CustomerBookings,
            },
            repositories::{PgBookedProductsRepository, PgBookingsRepository},
            status::BookingStatus,
        },
        products::repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgBookingsService {
    db: Db,
    bookings_repository: PgBookingsRepository,
    lines_repository: PgBookedProductsRepository,
    products_repository: PgProductsRepository,
}

impl PgBookingsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            bookings_repository: PgBookingsRepository::new(),
            lines_repository: PgBookedProductsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    async fn price_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        lines: &[BookedLine],
    ) -> Result<Vec<BookedProductRecord>, BookingsServiceError> {
        let mut priced = Vec::with_capacity(lines.len());

        for line in lines {
            let product = self
                .products_repository
                .get_product(tx, line.product_uuid)
                .await
                .map_err(BookingsServiceError::from_product_lookup)?;

            priced.push(price_line(&product, line.quantity)?);
        }

        Ok(priced)
    }

    /// Attach stored lines to each booking.
    async fn with_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut bookings: Vec<BookingRecord>,
    ) -> Result<Vec<BookingRecord>, BookingsServiceError> {
        let uuids: Vec<BookingUuid> = bookings.iter().map(|b| b.uuid).collect();

        let mut lines = self
            .lines_repository
            .get_booked_products(tx, &uuids)
            .await?;

        for booking in &mut bookings {
            booking.products = lines.remove(&booking.uuid).unwrap_or_default();
        }

        Ok(bookings)
    }

    async fn load_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<BookingRecord, BookingsServiceError> {
        let booking = self.bookings_repository.get_booking(tx, booking).await?;

        self.with_lines(tx, vec![booking])
            .await?
            .pop()
            .ok_or(BookingsServiceError::NotFound)
    }

    async fn insert_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingRecord,
    ) -> Result<BookingRecord, BookingsServiceError> {
        let mut created = self
            .bookings_repository
            .create_booking(tx, &booking)
            .await
            .map_err(|error| match BookingsServiceError::from(error) {
                BookingsServiceError::AlreadyExists => BookingsServiceError::Conflict,
                other => other,
            })?;

        self.lines_repository
            .replace_booked_products(tx, created.uuid, &booking.products)
            .await?;

        created.products = booking.products;

        Ok(created)
    }

    /// Persist `booking` against the version it was read at.
    async fn save_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: &mut BookingRecord,
        lines_changed: bool,
    ) -> Result<(), BookingsServiceError> {
        let revision = self
            .bookings_repository
            .update_booking(tx, booking)
            .await?
            .ok_or(BookingsServiceError::Conflict)?;

        if lines_changed {
            self.lines_repository
                .replace_booked_products(tx, booking.uuid, &booking.products)
                .await?;
        }

        booking.version = revision.version;
        booking.updated_at = revision.updated_at;

        Ok(())
    }
}

#[async_trait]
impl BookingsService for PgBookingsService {
    async fn create_or_merge_booking(
        &self,
        request: NewBooking,
    ) -> Result<BookingOutcome, BookingsServiceError> {
        request.validate()?;

        let mut tx = self.db.begin().await?;

        let lines = self.price_lines(&mut tx, &request.products).await?;

        let latest = self
            .bookings_repository
            .find_latest_booking(&mut tx, &request.email)
            .await?;

        let latest = match latest {
            Some(booking) => self.with_lines(&mut tx, vec![booking]).await?.pop(),
            None => None,
        };

        let outcome = match (plan(latest.as_ref(), request.service.is_some())?, latest) {
            (BookingPlan::Merge, Some(mut booking)) => {
                debug!(booking = %booking.uuid, "merging into active booking");

                booking.absorb(request, lines)?;
                self.save_booking(&mut tx, &mut booking, true).await?;

                BookingOutcome {
                    booking,
                    merged: true,
                }
            }
            (BookingPlan::Create | BookingPlan::Merge, _) => {
                let booking = BookingRecord::open(request, lines, Timestamp::now())?;

                BookingOutcome {
                    booking: self.insert_booking(&mut tx, booking).await?,
                    merged: false,
                }
            }
        };

        tx.commit().await?;

        Ok(outcome)
    }

    async fn get_booking(&self, booking: BookingUuid) -> Result<BookingRecord, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let booking = self.load_booking(&mut tx, booking).await?;

        tx.commit().await?;

        Ok(booking)
    }

    async fn set_status(
        &self,
        booking: BookingUuid,
        status: BookingStatus,
    ) -> Result<BookingRecord, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut booking = self.load_booking(&mut tx, booking).await?;

        if booking.status.transition_to(status)? {
            booking.status = status;
            self.save_booking(&mut tx, &mut booking, false).await?;
        }

        tx.commit().await?;

        Ok(booking)
    }

    async fn update_booking(
        &self,
        booking: BookingUuid,
        update: BookingUpdate,
    ) -> Result<BookingRecord, BookingsServiceError> {
        update.validate()?;

        let mut tx = self.db.begin().await?;

        let mut booking = self.load_booking(&mut tx, booking).await?;

        booking.apply_update(update)?;
        self.save_booking(&mut tx, &mut booking, false).await?;

        tx.commit().await?;

        Ok(booking)
    }

    async fn list_for_customer(
        &self,
        email: &str,
    ) -> Result<CustomerBookings, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let bookings = self
            .bookings_repository
            .list_bookings_by_email(&mut tx, email)
            .await?;

        let bookings = self.with_lines(&mut tx, bookings).await?;

        tx.commit().await?;

        Ok(CustomerBookings::new(bookings))
    }

    async fn list_all_grouped_by_email(
        &self,
    ) -> Result<BTreeMap<String, Vec<BookingRecord>>, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let bookings = self.bookings_repository.list_all_bookings(&mut tx).await?;
        let bookings = self.with_lines(&mut tx, bookings).await?;

        tx.commit().await?;

        let mut grouped: BTreeMap<String, Vec<BookingRecord>> = BTreeMap::new();

        for booking in bookings {
            grouped.entry(booking.email.clone()).or_default().push(booking);
        }

        Ok(grouped)
    }
}

#[automock]
#[async_trait]
pub trait BookingsService: Send + Sync {
    /// Create a booking, or fold the request into the customer's active one.
    async fn create_or_merge_booking(
        &self,
        request: NewBooking,
    ) -> Result<BookingOutcome, BookingsServiceError>;

    /// Retrieve a single booking with its lines.
    async fn get_booking(&self, booking: BookingUuid) -> Result<BookingRecord, BookingsServiceError>;

    /// Move a booking along its lifecycle. Re-applying the current status is a no-op.
    async fn set_status(
        &self,
        booking: BookingUuid,
        status: BookingStatus,
    ) -> Result<BookingRecord, BookingsServiceError>;

    /// Edit contact details or the service of an active booking.
    async fn update_booking(
        &self,
        booking: BookingUuid,
        update: BookingUpdate,
    ) -> Result<BookingRecord, BookingsServiceError>;

    /// Every booking for `email`, oldest first.
    async fn list_for_customer(&self, email: &str)
    -> Result<CustomerBookings, BookingsServiceError>;

    /// Every booking, bucketed by email in email order.
    async fn list_all_grouped_by_email(
        &self,
    ) -> Result<BTreeMap<String, Vec<BookingRecord>>, BookingsServiceError>;
}
