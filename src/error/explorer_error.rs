//! Unified error type for the explorer client.

use std::fmt;

use super::category::ErrorCategory;
use super::stream::{ParseError, StreamError};
use super::transport::TransportError;
use crate::config::ConfigError;
use crate::traits::HttpError;

/// Unified error type for the explorer client.
#[derive(Debug)]
pub enum ExplorerError {
    /// The request did not produce a usable response.
    Transport(TransportError),

    /// A record stream ended with an error.
    Stream(StreamError),

    /// Configuration is missing or invalid.
    Config(ConfigError),

    /// A whole-document response (index, heuristics) had the wrong shape.
    Document { url: String, reason: String },
}

impl ExplorerError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExplorerError::Transport(TransportError::Request { .. }) => ErrorCategory::Network,
            ExplorerError::Transport(TransportError::Status { .. }) => ErrorCategory::Server,
            ExplorerError::Stream(StreamError::Interrupted(_)) => ErrorCategory::Network,
            ExplorerError::Stream(StreamError::Decode(_)) => ErrorCategory::Client,
            ExplorerError::Config(_) => ErrorCategory::Configuration,
            ExplorerError::Document { .. } => ErrorCategory::Client,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ExplorerError::Transport(err) => err.is_retryable(),
            ExplorerError::Stream(err) => err.is_retryable(),
            ExplorerError::Config(_) | ExplorerError::Document { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ExplorerError::Transport(err) => err.user_message(),
            ExplorerError::Stream(err) => err.user_message(),
            ExplorerError::Config(err) => format!("Configuration problem: {}", err),
            ExplorerError::Document { .. } => {
                "The dataset server sent a document this client cannot read.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ExplorerError::Transport(err) => err.error_code(),
            ExplorerError::Stream(err) => err.error_code(),
            ExplorerError::Config(_) => "E_CONFIG",
            ExplorerError::Document { .. } => "E_DOCUMENT",
        }
    }
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplorerError::Transport(err) => write!(f, "{}", err),
            ExplorerError::Stream(err) => write!(f, "{}", err),
            ExplorerError::Config(err) => write!(f, "{}", err),
            ExplorerError::Document { url, reason } => {
                write!(f, "Unreadable document from {}: {}", url, reason)
            }
        }
    }
}

impl std::error::Error for ExplorerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExplorerError::Transport(err) => Some(err),
            ExplorerError::Stream(err) => Some(err),
            ExplorerError::Config(err) => Some(err),
            ExplorerError::Document { .. } => None,
        }
    }
}

impl From<TransportError> for ExplorerError {
    fn from(err: TransportError) -> Self {
        ExplorerError::Transport(err)
    }
}

impl From<StreamError> for ExplorerError {
    fn from(err: StreamError) -> Self {
        ExplorerError::Stream(err)
    }
}

impl From<ParseError> for ExplorerError {
    fn from(err: ParseError) -> Self {
        ExplorerError::Stream(StreamError::Decode(err))
    }
}

impl From<HttpError> for ExplorerError {
    fn from(err: HttpError) -> Self {
        ExplorerError::Stream(StreamError::Interrupted(err))
    }
}

impl From<ConfigError> for ExplorerError {
    fn from(err: ConfigError) -> Self {
        ExplorerError::Config(err)
    }
}
