//! Storefront Domain Concerns

pub mod bookings;
pub mod carts;
pub mod products;
pub mod users;
