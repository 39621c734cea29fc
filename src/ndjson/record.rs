//! JSON decoding of single records.

use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;

use crate::error::ParseError;
use crate::traits::RecordDecoder;

/// Decodes each record as one self-contained JSON document of type `T`.
///
/// Blank records (empty or whitespace only) decode to `None`.
pub struct JsonRecordDecoder<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonRecordDecoder<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonRecordDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonRecordDecoder<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonRecordDecoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonRecordDecoder")
            .field("output", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> RecordDecoder for JsonRecordDecoder<T> {
    type Output = T;

    fn decode(&self, record: &str) -> Result<Option<T>, ParseError> {
        if record.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(record)
            .map(Some)
            .map_err(|e| ParseError::new(record, e.to_string()))
    }
}
