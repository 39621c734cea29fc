//! Transport failure types.
//!
//! A transport failure means the request did not yield a usable body: either
//! it never got a response, or the response carried a non-2xx status.

use std::fmt;

use crate::traits::HttpError;

/// Transport-level failure for a single request.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The request could not be completed (connect, timeout, invalid URL).
    Request { url: String, source: HttpError },

    /// The server answered with a non-2xx status.
    Status { url: String, status: u16 },
}

impl TransportError {
    /// URL of the failed request.
    pub fn url(&self) -> &str {
        match self {
            TransportError::Request { url, .. } | TransportError::Status { url, .. } => url,
        }
    }

    /// HTTP status code, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Request { .. } => None,
            TransportError::Status { status, .. } => Some(*status),
        }
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Request { source, .. } => matches!(
                source,
                HttpError::ConnectionFailed(_) | HttpError::Timeout(_) | HttpError::Io(_)
            ),
            TransportError::Status { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            TransportError::Request { source, .. } => match source {
                HttpError::Timeout(_) => {
                    "The dataset server did not respond in time.".to_string()
                }
                HttpError::InvalidUrl(_) => {
                    "The configured dataset server URL is invalid.".to_string()
                }
                _ => "Unable to reach the dataset server.".to_string(),
            },
            TransportError::Status { status, .. } => match *status {
                404 => "The requested instance or distillation does not exist.".to_string(),
                500..=599 => "The dataset server is experiencing issues.".to_string(),
                _ => format!("The dataset server returned an error (HTTP {}).", status),
            },
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            TransportError::Request { .. } => "E_NET_REQUEST",
            TransportError::Status { .. } => "E_NET_HTTP",
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Request { url, source } => {
                write!(f, "GET {} failed: {}", url, source)
            }
            TransportError::Status { url, status } => {
                write!(f, "GET {} returned HTTP {}", url, status)
            }
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Request { source, .. } => Some(source),
            TransportError::Status { .. } => None,
        }
    }
}
