//! Bookings Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::SavedRevision,
    domain::{
        bookings::{
            records::{BookingRecord, BookingUuid, ServiceSelection},
            status::BookingStatus,
        },
        products::repository::{try_bind_amount, try_get_amount},
        users::records::UserUuid,
    },
};

const GET_BOOKING_SQL: &str = include_str!("../sql/get_booking.sql");
const FIND_LATEST_BOOKING_SQL: &str = include_str!("../sql/find_latest_booking.sql");
const LIST_BOOKINGS_BY_EMAIL_SQL: &str = include_str!("../sql/list_bookings_by_email.sql");
const LIST_ALL_BOOKINGS_SQL: &str = include_str!("../sql/list_all_bookings.sql");
const CREATE_BOOKING_SQL: &str = include_str!("../sql/create_booking.sql");
const UPDATE_BOOKING_SQL: &str = include_str!("../sql/update_booking.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBookingsRepository;

impl PgBookingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(GET_BOOKING_SQL)
            .bind(booking.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Most recently created booking for `email`, without lines.
    pub(crate) async fn find_latest_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<BookingRecord>, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(FIND_LATEST_BOOKING_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_bookings_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Vec<BookingRecord>, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(LIST_BOOKINGS_BY_EMAIL_SQL)
            .bind(email)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_all_bookings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<BookingRecord>, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(LIST_ALL_BOOKINGS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: &BookingRecord,
    ) -> Result<BookingRecord, sqlx::Error> {
        let service = booking.service.as_ref();

        query_as::<Postgres, BookingRecord>(CREATE_BOOKING_SQL)
            .bind(booking.uuid.into_uuid())
            .bind(booking.user_uuid.map(UserUuid::into_uuid))
            .bind(&booking.name)
            .bind(&booking.email)
            .bind(&booking.phone_number)
            .bind(try_bind_amount(booking.total_price, "total_price")?)
            .bind(service.map(|s| s.service_type.as_str()))
            .bind(service.and_then(|s| s.size.as_deref()))
            .bind(
                service
                    .map(|s| try_bind_amount(s.service_total, "service_total"))
                    .transpose()?,
            )
            .bind(booking.status.as_str())
            .bind(SqlxTimestamp::from(booking.created_at))
            .fetch_one(&mut **tx)
            .await
    }

    /// Write `booking` if nobody else saved since `booking.version` was read.
    ///
    /// Returns `None` when the version no longer matches.
    pub(crate) async fn update_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: &BookingRecord,
    ) -> Result<Option<SavedRevision>, sqlx::Error> {
        let service = booking.service.as_ref();

        query_as::<Postgres, SavedRevision>(UPDATE_BOOKING_SQL)
            .bind(booking.uuid.into_uuid())
            .bind(booking.version)
            .bind(booking.user_uuid.map(UserUuid::into_uuid))
            .bind(&booking.name)
            .bind(&booking.phone_number)
            .bind(try_bind_amount(booking.total_price, "total_price")?)
            .bind(service.map(|s| s.service_type.as_str()))
            .bind(service.and_then(|s| s.size.as_deref()))
            .bind(
                service
                    .map(|s| try_bind_amount(s.service_total, "service_total"))
                    .transpose()?,
            )
            .bind(booking.status.as_str())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for BookingRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<BookingStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        let service_type: Option<String> = row.try_get("service_type")?;
        let service_total: Option<i64> = row.try_get("service_total")?;

        let service = match (service_type, service_total) {
            (Some(service_type), Some(_)) => Some(ServiceSelection {
                service_type,
                size: row.try_get("size")?,
                service_total: try_get_amount(row, "service_total")?,
            }),
            _ => None,
        };

        Ok(Self {
            uuid: BookingUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: row
                .try_get::<Option<uuid::Uuid>, _>("user_uuid")?
                .map(UserUuid::from_uuid),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone_number: row.try_get("phone_number")?,
            products: Vec::new(),
            total_price: try_get_amount(row, "total_price")?,
            service,
            status,
            version: row.try_get("version")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
