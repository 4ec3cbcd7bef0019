//! Unified error codes for the franja catalog service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors (request shape, validation)
//! - 1xxx: Authentication errors
//! - 6xxx: Catalog errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so callers can branch
/// on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Write operation discriminator not recognized
    UnsupportedOperation = 10,
    /// HTTP method not served by the endpoint
    MethodNotAllowed = 11,

    // ==================== 1xxx: Auth ====================
    /// No credentials supplied
    NotAuthenticated = 1001,
    /// Token rejected by the verification service
    TokenInvalid = 1004,
    /// Verification service could not be reached
    AuthServiceUnavailable = 1010,

    // ==================== 6xxx: Catalog ====================
    /// Market parameter missing
    MarketRequired = 6010,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::UnsupportedOperation => "Unrecognized operation",
            ErrorCode::MethodNotAllowed => "Method not allowed",

            // Auth
            ErrorCode::NotAuthenticated => "No token",
            ErrorCode::TokenInvalid => "Invalid token",
            ErrorCode::AuthServiceUnavailable => "Authentication service unavailable",

            // Catalog
            ErrorCode::MarketRequired => "Missing parameter 'mercado'",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            10 => Ok(ErrorCode::UnsupportedOperation),
            11 => Ok(ErrorCode::MethodNotAllowed),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1004 => Ok(ErrorCode::TokenInvalid),
            1010 => Ok(ErrorCode::AuthServiceUnavailable),

            6010 => Ok(ErrorCode::MarketRequired),

            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
