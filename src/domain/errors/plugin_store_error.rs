//! Plugin store error types.

use thiserror::Error;

/// Plugin store API error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PluginStoreError {
    #[error("request cancelled")]
    Cancelled,

    #[error("transport error: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("plugin store returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode plugin store response: {message}")]
    Decode { message: String },

    #[error("invalid client configuration: {message}")]
    InvalidConfig { message: String },
}

impl PluginStoreError {
    /// Creates status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns whether the request was aborted by `cancel_requests`.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Transport { .. })
            || matches!(self, Self::Status { status, .. } if *status >= 500)
    }
}

impl From<reqwest::Error> for PluginStoreError {
    fn from(source: reqwest::Error) -> Self {
        Self::Transport { source }
    }
}
