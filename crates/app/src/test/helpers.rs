//! Test Helpers

use jiff::Timestamp;

use crate::{
    domain::{
        products::{
            ProductsService, ProductsServiceError,
            data::{NewProduct, PLACEHOLDER_IMAGE_URL},
            records::{ProductRecord, ProductUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

pub(crate) const TEST_PASSWORD: &str = "password123";

/// Registration payload with valid defaults for `email`.
pub(crate) fn new_user(email: &str) -> NewUser {
    NewUser {
        uuid: UserUuid::new(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        mobile_no: "09171234567".to_string(),
        password: TEST_PASSWORD.to_string(),
    }
}

pub(crate) async fn register_user(
    ctx: &TestContext,
    email: &str,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users.register(new_user(email)).await
}

/// An unsaved user, for code that only needs the record shape.
pub(crate) fn user_record(email: &str, is_admin: bool) -> UserRecord {
    UserRecord {
        uuid: UserUuid::new(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        mobile_no: "09171234567".to_string(),
        password_hash: String::new(),
        is_admin,
        tokens_valid_after: Timestamp::UNIX_EPOCH,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// An unsaved active product, for pure cart and booking logic.
pub(crate) fn product_record(name: &str, price: u64) -> ProductRecord {
    ProductRecord {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        description: format!("Description of {name}"),
        price,
        is_active: true,
        image_url: PLACEHOLDER_IMAGE_URL.to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            description: format!("Description of {name}"),
            price,
            image_url: None,
        })
        .await
}
