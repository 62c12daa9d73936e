//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Anonymous cart session marker.
#[derive(Debug)]
pub struct CartSession;

/// Client-held identifier for an anonymous cart.
pub type CartSessionUuid = TypedUuid<CartSession>;

/// Key a cart is looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOwner {
    User(UserUuid),
    Session(CartSessionUuid),
}

impl CartOwner {
    pub(crate) fn user_uuid(self) -> Option<UserUuid> {
        match self {
            Self::User(user) => Some(user),
            Self::Session(_) => None,
        }
    }

    pub(crate) fn session_uuid(self) -> Option<CartSessionUuid> {
        match self {
            Self::User(_) => None,
            Self::Session(session) => Some(session),
        }
    }
}

/// Cart Record
///
/// `total_price` always equals the sum of item subtotals; the mutators in the
/// ledger module are the only code that changes either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub owner: CartOwner,
    pub items: Vec<CartItemRecord>,
    pub total_price: u64,
    /// Optimistic concurrency revision, bumped on every save.
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// CartItem Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_image_url: String,
    pub quantity: u32,
    /// Unit price at time of entry multiplied by quantity.
    pub subtotal: u64,
}
