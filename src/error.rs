// src/error.rs

//! Unified error handling for the rate explorer.

use thiserror::Error;

/// Result type alias for explorer operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for calls through the API client.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Prefix marking a failure that happened before the server answered.
pub const TRANSPORT_ERROR_PREFIX: &str = "Error: Internal transport error: ";

/// Failure of a single API call.
///
/// The `Display` output is the message handed to the store via
/// `receive_error`, so every variant renders as one human-readable line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network, DNS or timeout failure
    #[error("{}{}", TRANSPORT_ERROR_PREFIX, .0)]
    Transport(String),

    /// Server responded with status >= 400; message is the status text
    #[error("{text}")]
    HttpStatus { status: u16, text: String },

    /// Body could not be parsed as JSON
    #[error("{}malformed response: {}", TRANSPORT_ERROR_PREFIX, .0)]
    Malformed(String),
}

impl ApiError {
    /// Create a transport error from any displayable cause.
    pub fn transport(cause: impl std::fmt::Display) -> Self {
        Self::Transport(cause.to_string())
    }

    /// Create an HTTP status error.
    pub fn http_status(status: u16, text: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            text: text.into(),
        }
    }

    /// Create a malformed-response error.
    pub fn malformed(cause: impl std::fmt::Display) -> Self {
        Self::Malformed(cause.to_string())
    }

    /// True for failures on the transport side (including unparseable bodies).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Malformed(_))
    }
}

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// API call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// A fetch through the store ended in an error message
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
