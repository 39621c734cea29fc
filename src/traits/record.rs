//! Record decoder trait abstraction.
//!
//! A record decoder turns one complete, delimiter-free line of text into one
//! typed value. It knows nothing about chunking or framing; the stream reader
//! hands it whole records only.

use crate::error::ParseError;

/// Trait for decoding one framed record into a typed value.
///
/// # Returns
/// - `Ok(Some(value))` for a decoded record
/// - `Ok(None)` for a blank record, which the reader skips
/// - `Err(error)` for a malformed record, which ends the stream
///
/// # Example
///
/// ```ignore
/// use explorer::ndjson::JsonRecordDecoder;
/// use explorer::traits::RecordDecoder;
///
/// let decoder = JsonRecordDecoder::<serde_json::Value>::new();
/// assert!(decoder.decode("   ").unwrap().is_none());
/// ```
pub trait RecordDecoder {
    /// The value each record decodes into.
    type Output;

    /// Decode a single record.
    fn decode(&self, record: &str) -> Result<Option<Self::Output>, ParseError>;
}
