//! Success envelope for write operations

use serde::{Deserialize, Serialize};

/// Result body of a write
///
/// ```json
/// { "success": true, "id": 17, "message": "Product created" }
/// ```
///
/// `success: false` is only used for the delete-target-absent outcome;
/// every other failure uses [`crate::error::ErrorBody`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResult {
    pub success: bool,
    /// Database-assigned identity of a newly created row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub message: String,
}

impl WriteResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            id: None,
            message: message.into(),
        }
    }

    pub fn created(id: u64, message: impl Into<String>) -> Self {
        Self {
            success: true,
            id: Some(id),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            message: message.into(),
        }
    }
}
