//! Test context for service-level integration tests.

use crate::{
    auth::{DEFAULT_TOKEN_TTL, PgAuthService, TokenKeys},
    database::Db,
    domain::{
        bookings::PgBookingsService, carts::PgCartsService, products::PgProductsService,
        users::PgUsersService,
    },
};

use super::db::TestDb;

const TEST_SECRET: &[u8] = b"storefront-test-secret";

pub struct TestContext {
    pub db: TestDb,
    pub keys: TokenKeys,
    pub users: PgUsersService,
    pub products: PgProductsService,
    pub carts: PgCartsService,
    pub bookings: PgBookingsService,
    pub auth: PgAuthService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());
        let keys = TokenKeys::from_secret(TEST_SECRET, DEFAULT_TOKEN_TTL);

        Self {
            users: PgUsersService::new(db.clone(), keys.clone()),
            products: PgProductsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            bookings: PgBookingsService::new(db),
            auth: PgAuthService::new(test_db.pool().clone(), keys.clone()),
            keys,
            db: test_db,
        }
    }
}
