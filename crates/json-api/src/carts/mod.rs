//! Carts

mod errors;
pub(crate) mod handlers;
mod models;
pub(crate) mod owner;

pub(crate) use handlers::*;
