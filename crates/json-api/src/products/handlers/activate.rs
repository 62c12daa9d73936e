//! Activate Product Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::products::{
    handlers::activation::{Messages, set_active},
    models::ActivationResponse,
};

/// Activate Product Handler
///
/// Puts an archived product back on sale.
#[endpoint(
    tags("products"),
    summary = "Activate Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product activated or already active"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
#[tracing::instrument(name = "products.activate", skip_all, err)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ActivationResponse>, StatusError> {
    set_active(
        depot,
        product.into_inner(),
        true,
        &Messages {
            changed: "Product activated successfully",
            unchanged: "Product already active",
        },
    )
    .await
}
