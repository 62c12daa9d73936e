//! Booking Repositories

mod bookings;
mod products;

pub(crate) use bookings::PgBookingsRepository;
pub(crate) use products::PgBookedProductsRepository;
