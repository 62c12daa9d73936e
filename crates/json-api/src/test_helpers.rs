//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use storefront_app::{
    auth::{Identity, MockAuthService},
    context::AppContext,
    domain::{
        bookings::MockBookingsService, carts::MockCartsService, products::MockProductsService,
        users::{MockUsersService, records::UserUuid},
    },
};
use uuid::Uuid;

use crate::{errors::json_errors, extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

/// Service mocks. Any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct TestState {
    pub(crate) users: MockUsersService,
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
    pub(crate) bookings: MockBookingsService,
    pub(crate) auth: MockAuthService,
}

impl TestState {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            users: Arc::new(self.users),
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            bookings: Arc::new(self.bookings),
            auth: Arc::new(self.auth),
        })
    }
}

pub(crate) fn test_identity(is_admin: bool) -> Identity {
    Identity {
        user_uuid: TEST_USER_UUID,
        email: "ada@example.com".to_string(),
        is_admin,
    }
}

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(test_identity(false));
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(test_identity(true));
    ctrl.call_next(req, depot, res).await;
}

/// Service with injected mocks and JSON error rendering around `route`.
pub(crate) fn state_service(state: TestState, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(json_errors)
            .hoop(inject(state.into_state()))
            .push(route),
    )
}
