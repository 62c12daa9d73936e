//! Archive Product Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::products::{
    handlers::activation::{Messages, set_active},
    models::ActivationResponse,
};

/// Archive Product Handler
///
/// Takes a product off sale. Archiving an archived product is not an error.
#[endpoint(
    tags("products"),
    summary = "Archive Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product archived or already archived"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
#[tracing::instrument(name = "products.archive", skip_all, err)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ActivationResponse>, StatusError> {
    set_active(
        depot,
        product.into_inner(),
        false,
        &Messages {
            changed: "Product archived successfully",
            unchanged: "Product already archived",
        },
    )
    .await
}
