//! Product Handlers

mod activation;
pub(crate) mod activate;
pub(crate) mod active;
pub(crate) mod all;
pub(crate) mod archive;
pub(crate) mod create;
pub(crate) mod filter;
pub(crate) mod get;
pub(crate) mod search_by_description;
pub(crate) mod search_by_name;
pub(crate) mod search_by_price;
pub(crate) mod update;

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use salvo::{Router, Service};

    use storefront_app::domain::products::{
        MockProductsService,
        records::{ProductRecord, ProductUuid},
    };

    use crate::test_helpers::{TestState, state_service};

    pub(crate) fn make_product(uuid: ProductUuid, name: &str, price: u64) -> ProductRecord {
        ProductRecord {
            uuid,
            name: name.to_string(),
            description: format!("A {name}"),
            price,
            is_active: true,
            image_url: "https://example.com/image.jpg".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
        state_service(
            TestState {
                products,
                ..TestState::default()
            },
            route,
        )
    }
}
