//! Error types for the VynceAI domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Provider faults have their own enum so the model client can carry them
//! as data instead of propagating them.

use thiserror::Error;

/// The top-level error type for gateway operations.
///
/// Provider faults never reach this type; the model client turns them into
/// response text.
#[derive(Debug, Error)]
pub enum Error {
    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Request validation ---
    #[error("{0}")]
    Validation(String),

    // --- I/O (config files, listener) ---
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Whether this error was caused by the caller (maps to a 4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Faults raised while talking to the model provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limited by provider{}", retry_hint(.retry_after_secs))]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("invalid model name: {0}")]
    InvalidModel(String),

    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Provider returned no text: {0}")]
    EmptyResponse(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl ProviderError {
    /// Configuration faults are detected before any network traffic.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ProviderError::NotConfigured(_) | ProviderError::InvalidModel(_)
        )
    }
}

fn retry_hint(retry_after_secs: &Option<u64>) -> String {
    retry_after_secs
        .map(|secs| format!(", retry after {secs}s"))
        .unwrap_or_default()
}
