//! Bookings

pub mod data;
pub mod errors;
mod merge;
pub mod records;
mod repositories;
pub mod service;
pub mod status;

pub use errors::BookingsServiceError;
pub use service::*;
pub use status::BookingStatus;
