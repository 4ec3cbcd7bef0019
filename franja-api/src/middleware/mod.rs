//! HTTP middleware

pub mod cors;
pub mod logging;

pub use cors::{cors_envelope, preflight};
pub use logging::{XRequestId, logging_middleware};
