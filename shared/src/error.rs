use serde::{Serialize, Deserialize};

/// Wire shape shared by every failed request, whether it comes from a
/// route handler or a registered catcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
