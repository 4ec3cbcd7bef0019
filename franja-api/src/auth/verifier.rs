//! Bearer token verification against the external service

use async_trait::async_trait;
use http::HeaderValue;
use http::header::AUTHORIZATION;
use shared::error::{AppError, AppResult};
use std::time::Duration;

/// Outcome of one verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthVerdict {
    /// The service answered 200
    Authenticated,
    /// The service answered with any other status
    Rejected,
    /// The service could not be reached in time
    Unavailable,
}

/// Verifies a raw `Authorization` header value
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, authorization: &HeaderValue) -> AuthVerdict;
}

/// Forwards the header to the verification endpoint via POST
///
/// One attempt per call, bounded by the client timeout.
#[derive(Debug, Clone)]
pub struct HttpCredentialVerifier {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl HttpCredentialVerifier {
    pub fn new(url: reqwest::Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl CredentialVerifier for HttpCredentialVerifier {
    async fn verify(&self, authorization: &HeaderValue) -> AuthVerdict {
        let response = self
            .client
            .post(self.url.clone())
            .header(AUTHORIZATION, authorization.clone())
            .send()
            .await;

        match response {
            Ok(resp) if resp.status() == reqwest::StatusCode::OK => AuthVerdict::Authenticated,
            Ok(resp) => {
                tracing::warn!(status = %resp.status(), "Token rejected by verification service");
                AuthVerdict::Rejected
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    timeout = e.is_timeout(),
                    "Token verification service unreachable"
                );
                AuthVerdict::Unavailable
            }
        }
    }
}

/// Check the request's `Authorization` header
///
/// An absent or blank header is rejected without calling the verifier.
pub async fn authenticate(
    verifier: &dyn CredentialVerifier,
    header: Option<&HeaderValue>,
) -> AppResult<()> {
    let Some(header) = header.filter(|value| carries_token(value)) else {
        return Err(AppError::not_authenticated());
    };

    match verifier.verify(header).await {
        AuthVerdict::Authenticated => Ok(()),
        AuthVerdict::Rejected => Err(AppError::invalid_token()),
        AuthVerdict::Unavailable => Err(AppError::auth_unavailable()),
    }
}

// non-ASCII bytes are forwarded as-is; the service decides
fn carries_token(value: &HeaderValue) -> bool {
    !value.as_bytes().trim_ascii().is_empty()
}
