use serde::Deserialize;

/// Error body returned by the plugin store API.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Human readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Short error description, used by some endpoints instead of `message`.
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Returns the most specific message available.
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}
