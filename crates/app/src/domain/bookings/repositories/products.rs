//! Booked Products Repository

use rustc_hash::FxHashMap;
use sqlx::{Postgres, Row, Transaction, query};
use uuid::Uuid;

use crate::domain::{
    bookings::records::{BookedProductRecord, BookedProductUuid, BookingUuid},
    products::{
        records::ProductUuid,
        repository::{try_bind_amount, try_get_amount},
    },
};

const GET_BOOKED_PRODUCTS_SQL: &str = include_str!("../sql/get_booked_products.sql");
const DELETE_BOOKED_PRODUCTS_SQL: &str = include_str!("../sql/delete_booked_products.sql");
const INSERT_BOOKED_PRODUCTS_SQL: &str = include_str!("../sql/insert_booked_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBookedProductsRepository;

impl PgBookedProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lines for each of `bookings`, keyed by booking and in booking order.
    pub(crate) async fn get_booked_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        bookings: &[BookingUuid],
    ) -> Result<FxHashMap<BookingUuid, Vec<BookedProductRecord>>, sqlx::Error> {
        let mut lines: FxHashMap<BookingUuid, Vec<BookedProductRecord>> = FxHashMap::default();

        if bookings.is_empty() {
            return Ok(lines);
        }

        let uuids: Vec<Uuid> = bookings.iter().map(|b| b.into_uuid()).collect();

        let rows = query(GET_BOOKED_PRODUCTS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        for row in rows {
            let booking = BookingUuid::from_uuid(row.try_get("booking_uuid")?);
            let quantity: i32 = row.try_get("quantity")?;

            lines.entry(booking).or_default().push(BookedProductRecord {
                uuid: BookedProductUuid::from_uuid(row.try_get("uuid")?),
                product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                product_name: row.try_get("product_name")?,
                quantity: u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "quantity".to_string(),
                    source: Box::new(e),
                })?,
                subtotal: try_get_amount(&row, "subtotal")?,
            });
        }

        Ok(lines)
    }

    /// Overwrite the stored lines of `booking` with `lines`, keeping their order.
    pub(crate) async fn replace_booked_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
        lines: &[BookedProductRecord],
    ) -> Result<(), sqlx::Error> {
        query(DELETE_BOOKED_PRODUCTS_SQL)
            .bind(booking.into_uuid())
            .execute(&mut **tx)
            .await?;

        if lines.is_empty() {
            return Ok(());
        }

        let mut uuids = Vec::with_capacity(lines.len());
        let mut products = Vec::with_capacity(lines.len());
        let mut quantities = Vec::with_capacity(lines.len());
        let mut subtotals = Vec::with_capacity(lines.len());
        let mut positions = Vec::with_capacity(lines.len());

        for (position, line) in lines.iter().enumerate() {
            uuids.push(line.uuid.into_uuid());
            products.push(line.product_uuid.into_uuid());
            quantities.push(
                i32::try_from(line.quantity)
                    .map_err(|e| sqlx::Error::Encode(format!("quantity: {e}").into()))?,
            );
            subtotals.push(try_bind_amount(line.subtotal, "subtotal")?);
            positions.push(
                i32::try_from(position)
                    .map_err(|e| sqlx::Error::Encode(format!("position: {e}").into()))?,
            );
        }

        query(INSERT_BOOKED_PRODUCTS_SQL)
            .bind(booking.into_uuid())
            .bind(uuids)
            .bind(products)
            .bind(quantities)
            .bind(subtotals)
            .bind(positions)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
