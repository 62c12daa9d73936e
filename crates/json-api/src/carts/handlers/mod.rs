//! Cart Handlers

pub(crate) mod add;
pub(crate) mod book;
pub(crate) mod clear;
pub(crate) mod count;
pub(crate) mod get;
pub(crate) mod remove;
pub(crate) mod update_quantity;

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;
    use salvo::{Router, Service};

    use storefront_app::domain::{
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid, CartOwner, CartRecord},
        },
        products::records::ProductUuid,
    };

    use crate::test_helpers::{TestState, state_service};

    pub(crate) fn make_item(product: ProductUuid, quantity: u32, unit_price: u64) -> CartItemRecord {
        CartItemRecord {
            uuid: CartItemUuid::new(),
            product_uuid: product,
            product_name: "Mug".to_string(),
            product_image_url: "https://example.com/mug.jpg".to_string(),
            quantity,
            subtotal: unit_price * u64::from(quantity),
        }
    }

    pub(crate) fn make_cart(owner: CartOwner, items: Vec<CartItemRecord>) -> CartRecord {
        let mut cart = CartRecord::empty(owner, Timestamp::UNIX_EPOCH);

        cart.total_price = items.iter().map(|item| item.subtotal).sum();
        cart.items = items;

        cart
    }

    pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
        state_service(
            TestState {
                carts,
                ..TestState::default()
            },
            route,
        )
    }
}
