//! Uniform JSON error bodies.

use salvo::{http::ResBody, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorDetails {
    /// HTTP status code.
    pub code: u16,

    /// Canonical reason phrase.
    pub name: String,

    /// Human-readable message.
    pub brief: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&StatusError> for ErrorResponse {
    fn from(error: &StatusError) -> Self {
        Self {
            error: ErrorDetails {
                code: error.code.as_u16(),
                name: error.name.clone(),
                brief: error.brief.clone(),
                detail: error.detail.clone(),
            },
        }
    }
}

/// Render status errors as [`ErrorResponse`] JSON whatever the client accepts.
#[handler]
pub(crate) async fn json_errors(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    ctrl.call_next(req, depot, res).await;

    if !matches!(res.body, ResBody::Error(_)) {
        return;
    }

    if let ResBody::Error(error) = res.take_body() {
        res.status_code(error.code);
        res.render(Json(ErrorResponse::from(&error)));
    }
}

/// Catcher hoop giving unmatched routes and other bodiless errors the same envelope.
#[handler]
pub(crate) async fn json_catcher(res: &mut Response, ctrl: &mut FlowCtrl) {
    if !matches!(res.body, ResBody::None | ResBody::Error(_)) {
        return;
    }

    let error = match res.take_body() {
        ResBody::Error(error) => error,
        _ => res
            .status_code
            .and_then(StatusError::from_code)
            .unwrap_or_else(StatusError::not_found),
    };

    res.status_code(error.code);
    res.render(Json(ErrorResponse::from(&error)));
    ctrl.skip_rest();
}
