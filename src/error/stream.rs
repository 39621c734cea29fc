//! Streaming-related error types.
//!
//! These errors end a record stream that was already delivering data. They
//! are surfaced to the consumer as the final item of the stream.

use std::fmt;

use thiserror::Error;

use crate::traits::HttpError;

/// Longest record excerpt kept in a [`ParseError`] message.
const RECORD_PREVIEW_CHARS: usize = 120;

/// A complete record that is not valid JSON for the expected type.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("malformed record ({reason}): {}", preview(.record))]
pub struct ParseError {
    /// The full text of the offending record.
    pub record: String,
    /// The underlying decoder's explanation.
    pub reason: String,
}

impl ParseError {
    pub fn new(record: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            reason: reason.into(),
        }
    }
}

fn preview(record: &str) -> String {
    if record.chars().count() <= RECORD_PREVIEW_CHARS {
        record.to_string()
    } else {
        let head: String = record.chars().take(RECORD_PREVIEW_CHARS).collect();
        format!("{}...", head)
    }
}

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// A record could not be decoded.
    Decode(ParseError),

    /// The response body stopped with an error before it was complete.
    Interrupted(HttpError),
}

impl StreamError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StreamError::Interrupted(_))
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::Decode(_) => {
                "The dataset server sent a record that could not be read. The stream was stopped."
                    .to_string()
            }
            StreamError::Interrupted(_) => {
                "The connection to the dataset server was lost mid-stream.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::Decode(_) => "E_STREAM_DECODE",
            StreamError::Interrupted(_) => "E_STREAM_INTERRUPTED",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Decode(err) => write!(f, "Stream decode failed: {}", err),
            StreamError::Interrupted(err) => write!(f, "Stream interrupted: {}", err),
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::Decode(err) => Some(err),
            StreamError::Interrupted(err) => Some(err),
        }
    }
}

impl From<ParseError> for StreamError {
    fn from(err: ParseError) -> Self {
        StreamError::Decode(err)
    }
}

impl From<HttpError> for StreamError {
    fn from(err: HttpError) -> Self {
        StreamError::Interrupted(err)
    }
}
