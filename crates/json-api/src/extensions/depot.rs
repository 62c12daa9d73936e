//! Depot helper extensions.

use std::{any::Any, sync::Arc};

use salvo::prelude::{Depot, StatusError};
use storefront_app::auth::Identity;

use crate::state::State;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Shared application state injected at the router root.
    fn state(&self) -> Result<&Arc<State>, StatusError>;

    fn insert_identity(&mut self, identity: Identity);

    /// Identity attached by the auth middleware, if the caller sent a token.
    fn identity(&self) -> Option<&Identity>;

    fn identity_or_401(&self) -> Result<&Identity, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn state(&self) -> Result<&Arc<State>, StatusError> {
        self.obtain_or_500::<Arc<State>>()
    }

    fn insert_identity(&mut self, identity: Identity) {
        self.inject(identity);
    }

    fn identity(&self) -> Option<&Identity> {
        self.obtain::<Identity>().ok()
    }

    fn identity_or_401(&self) -> Result<&Identity, StatusError> {
        self.identity()
            .ok_or_else(|| StatusError::unauthorized().brief("Authentication required"))
    }
}
