//! Carts

pub mod errors;
mod ledger;
pub mod records;
mod repositories;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
