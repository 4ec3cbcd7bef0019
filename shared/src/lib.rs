//! Shared types for the franja catalog service
//!
//! Error system, response envelopes and catalog models used by the
//! HTTP service and its tests.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorBody, ErrorCode};
pub use response::WriteResult;
