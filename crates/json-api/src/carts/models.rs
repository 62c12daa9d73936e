//! Cart Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::records::{CartItemRecord, CartRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub product_id: Uuid,
    pub product_name: String,
    pub product_image_url: String,
    pub quantity: u32,
    /// Line total in minor currency units
    pub subtotal: u64,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            product_id: item.product_uuid.into(),
            product_name: item.product_name,
            product_image_url: item.product_image_url,
            quantity: item.quantity,
            subtotal: item.subtotal,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    pub uuid: Uuid,
    pub items: Vec<CartItemResponse>,
    /// Sum of line subtotals in minor currency units
    pub total_price: u64,
    pub item_count: u64,
    pub updated_at: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        let item_count = cart.item_count();

        Self {
            uuid: cart.uuid.into(),
            items: cart.items.into_iter().map(Into::into).collect(),
            total_price: cart.total_price,
            item_count,
            updated_at: cart.updated_at.to_string(),
        }
    }
}
