//! Credential gate
//!
//! Every non-preflight request is checked once against the external
//! verification service before it reaches the router.

pub mod middleware;
pub mod verifier;

pub use middleware::require_token;
pub use verifier::{AuthVerdict, CredentialVerifier, HttpCredentialVerifier, authenticate};
