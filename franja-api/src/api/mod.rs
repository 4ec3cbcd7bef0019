//! HTTP surface
//!
//! A single endpoint, mounted on every path: `GET` reads a market's
//! prices, `POST` dispatches a write by its `method` query parameter.

pub mod operation;
pub mod read;
pub mod write;

pub use operation::WriteOperation;

use axum::{
    Router,
    extract::{DefaultBodyLimit, rejection::QueryRejection},
    middleware,
    routing::{MethodRouter, get},
};
use http::{HeaderName, Method};
use shared::error::AppError;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};

use crate::auth::require_token;
use crate::middleware::logging::REQUEST_ID_HEADER;
use crate::middleware::{XRequestId, cors_envelope, logging_middleware, preflight};
use crate::state::AppState;

/// Request bodies above this are refused
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

fn endpoint() -> MethodRouter<AppState> {
    get(read::list_prices)
        .post(write::write_catalog)
        .head(method_not_allowed)
        .fallback(method_not_allowed)
}

/// Routes only, without middleware or state
pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/", endpoint())
        .route("/{*path}", endpoint())
}

/// Full application with the middleware stack, ready to serve
///
/// Outermost first: CORS headers, body limit, request id, logging,
/// preflight, credential gate.
pub fn build_app(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let router = build_router()
        .layer(middleware::from_fn_with_state(state.clone(), require_token))
        .layer(middleware::from_fn(preflight))
        .layer(middleware::from_fn(logging_middleware))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    cors_envelope(router).with_state(state)
}

async fn method_not_allowed(method: Method) -> AppError {
    AppError::method_not_allowed(method.as_str())
}

/// Query string in order of appearance; repeated keys are kept
pub type QueryPairs = Vec<(String, String)>;

/// First value given for `name`, later repeats are ignored
pub(crate) fn first_param(pairs: &[(String, String)], name: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}

pub(crate) fn query_rejection(rejection: QueryRejection) -> AppError {
    AppError::invalid_request(rejection.body_text())
}
