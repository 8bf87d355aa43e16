//! Router assembly.

mod common;
mod v1;

pub use common::{common_routes, common_routes_with_ready};
pub use v1::v1_routes;

use crate::response::ErrorBody;
use crate::state::AppState;
use axum::http::StatusCode;
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use sqlx::PgPool;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// The full service: entity routes, health/ready/version, body limit and request tracing.
pub fn app(state: AppState, pool: PgPool, body_limit: usize) -> Router {
    v1_routes(state)
        .merge(common_routes_with_ready(pool))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(map_response(payload_too_large_as_json))
        .layer(TraceLayer::new_for_http())
}

/// The body limit answers in plain text, both when it rejects on
/// `content-length` and when a handler fails to buffer a streamed body.
/// Rewrite either into the usual `{status, detail}` error body.
async fn payload_too_large_as_json(response: Response) -> Response {
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return response;
    }
    let status = StatusCode::PAYLOAD_TOO_LARGE;
    let body = ErrorBody {
        status: status.as_u16(),
        detail: "request body is too large".to_string(),
    };
    (status, Json(body)).into_response()
}
