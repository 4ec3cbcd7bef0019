//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::header::AUTHORIZATION;
use shared::error::AppError;

use super::verifier::authenticate;
use crate::state::AppState;

/// Rejects the request unless the verification service accepts its token
///
/// Preflight requests never get here; they are answered further out.
pub async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let verdict = authenticate(
        state.credentials.as_ref(),
        request.headers().get(AUTHORIZATION),
    )
    .await;

    if let Err(e) = verdict {
        tracing::warn!(
            method = %request.method(),
            code = %e.code,
            "Request refused by credential gate"
        );
        return Err(e);
    }

    Ok(next.run(request).await)
}
