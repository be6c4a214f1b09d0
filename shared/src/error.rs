//! Wire error body
//!
//! Every non-2xx response from booking-server carries this JSON shape.
//! Codes follow the `EXXXX` scheme; `E0000` is reserved for success and
//! never appears in an error body.

use serde::{Deserialize, Serialize};

/// JSON body of an error response
///
/// ```json
/// { "code": "E0004", "message": "Table 5 is not available" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ErrorBody {
    /// Error code (`E3001` unauthorized, `E0003` not found, ...)
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
