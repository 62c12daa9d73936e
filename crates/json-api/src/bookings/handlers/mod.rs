//! Booking Handlers

pub(crate) mod all_bookings;
pub(crate) mod book_now;
pub(crate) mod cancel;
pub(crate) mod complete;
pub(crate) mod confirm;
pub(crate) mod my_bookings;
mod transition;
pub(crate) mod update;
