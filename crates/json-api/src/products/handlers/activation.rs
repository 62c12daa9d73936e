//! Shared archive/activate flow.

use salvo::prelude::*;
use uuid::Uuid;

use storefront_app::domain::products::records::ActivationChange;

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ActivationResponse},
};

pub(super) struct Messages {
    pub changed: &'static str,
    pub unchanged: &'static str,
}

pub(super) async fn set_active(
    depot: &Depot,
    product: Uuid,
    is_active: bool,
    messages: &Messages,
) -> Result<Json<ActivationResponse>, StatusError> {
    let state = depot.state()?;

    let change = state
        .app
        .products
        .set_product_active(product.into(), is_active)
        .await
        .map_err(into_status_error)?;

    let message = match &change {
        ActivationChange::Changed(_) => {
            tracing::info!(product_uuid = %product, is_active, "changed product activity");

            messages.changed
        }
        ActivationChange::Unchanged(_) => messages.unchanged,
    };

    Ok(Json(ActivationResponse {
        message: message.to_string(),
        product: change.into_product().into(),
    }))
}
