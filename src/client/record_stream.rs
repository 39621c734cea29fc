//! Record stream returned by the dataset client.

use futures::stream::{FusedStream, Stream, StreamExt};
use serde::de::DeserializeOwned;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::{StreamError, TransportError};
use crate::ndjson::NdjsonStream;

/// Lazy sequence of records from one streaming endpoint.
///
/// A stream whose request failed under the soft failure policy yields no
/// items; [`RecordStream::failure`] tells it apart from an endpoint that
/// simply had no records.
pub struct RecordStream<T> {
    reader: Option<NdjsonStream<T>>,
    failure: Option<TransportError>,
}

impl<T: DeserializeOwned> RecordStream<T> {
    pub(crate) fn open(reader: NdjsonStream<T>) -> Self {
        Self {
            reader: Some(reader),
            failure: None,
        }
    }

    pub(crate) fn failed(failure: TransportError) -> Self {
        Self {
            reader: None,
            failure: Some(failure),
        }
    }

    /// The transport failure that left this stream empty, if any.
    pub fn failure(&self) -> Option<&TransportError> {
        self.failure.as_ref()
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Number of records delivered so far.
    pub fn delivered(&self) -> usize {
        self.reader.as_ref().map_or(0, |reader| reader.delivered())
    }

    /// Stop consuming: release the response body and buffers.
    pub fn close(&mut self) {
        if let Some(reader) = self.reader.as_mut() {
            reader.close();
        }
    }
}

impl<T: DeserializeOwned> Stream for RecordStream<T> {
    type Item = Result<T, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.get_mut().reader.as_mut() {
            Some(reader) => reader.poll_next_unpin(cx),
            None => Poll::Ready(None),
        }
    }
}

impl<T: DeserializeOwned> FusedStream for RecordStream<T> {
    fn is_terminated(&self) -> bool {
        self.reader
            .as_ref()
            .map_or(true, |reader| reader.is_terminated())
    }
}

impl<T> std::fmt::Debug for RecordStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStream")
            .field("open", &self.reader.is_some())
            .field("failure", &self.failure)
            .finish()
    }
}
