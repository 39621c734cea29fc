//! Pull-based NDJSON record stream.
//!
//! [`EventStreamReader`] chains the UTF-8 decoder, the line splitter and a
//! record decoder over a byte source and exposes the result as a
//! [`futures::Stream`]. Each poll does only as much work as the next record
//! needs: buffered complete records are delivered before the source is
//! polled again, and the source is never polled ahead of demand.
//!
//! The stream is single-pass. It ends with `None` once the source is
//! exhausted, or with one final `Err` item followed by `None` when a record is
//! malformed or the body breaks off. Dropping the reader, or calling
//! [`EventStreamReader::close`], drops the source and all buffers.

use bytes::Bytes;
use futures::stream::{FusedStream, Stream, StreamExt};
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use super::decoder::Utf8ChunkDecoder;
use super::record::JsonRecordDecoder;
use super::splitter::LineSplitter;
use crate::error::StreamError;
use crate::traits::{ByteStream, HttpError, RecordDecoder};

/// Lifecycle of an [`EventStreamReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// The source may still produce chunks.
    Reading,
    /// The source is exhausted; buffered records are being delivered.
    Draining,
    /// Nothing more will be produced.
    Finished,
}

/// Lazy, single-pass stream of records decoded from a byte source.
pub struct EventStreamReader<S, D> {
    source: Option<S>,
    bytes: Utf8ChunkDecoder,
    lines: LineSplitter,
    decoder: D,
    state: ReaderState,
    delivered: usize,
}

/// Reader over an HTTP body producing values of type `T`.
pub type NdjsonStream<T> = EventStreamReader<ByteStream, JsonRecordDecoder<T>>;

/// Read an NDJSON response body as a stream of `T`.
pub fn read_ndjson<T>(body: ByteStream) -> NdjsonStream<T>
where
    T: serde::de::DeserializeOwned,
{
    EventStreamReader::new(body, JsonRecordDecoder::new())
}

impl<S, D> EventStreamReader<S, D>
where
    S: Stream<Item = Result<Bytes, HttpError>> + Unpin,
    D: RecordDecoder,
{
    /// Create a newline-delimited reader.
    pub fn new(source: S, decoder: D) -> Self {
        Self::with_splitter(source, decoder, LineSplitter::new())
    }

    /// Create a reader with a preconfigured splitter.
    pub fn with_splitter(source: S, decoder: D, lines: LineSplitter) -> Self {
        Self {
            source: Some(source),
            bytes: Utf8ChunkDecoder::new(),
            lines,
            decoder,
            state: ReaderState::Reading,
            delivered: 0,
        }
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Number of records delivered so far.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Stop reading: drop the source and every buffer.
    ///
    /// Subsequent polls return `None` without touching the source.
    pub fn close(&mut self) {
        self.source = None;
        self.lines.clear();
        self.bytes = Utf8ChunkDecoder::new();
        self.state = ReaderState::Finished;
    }

    /// Decode one framed record. `None` means the record was blank.
    fn decode_record(&mut self, record: String) -> Option<Result<D::Output, StreamError>> {
        match self.decoder.decode(&record) {
            Ok(Some(value)) => {
                self.delivered += 1;
                tracing::trace!(delivered = self.delivered, "Decoded record");
                Some(Ok(value))
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(
                    delivered = self.delivered,
                    "Stopping stream on malformed record: {}",
                    err.reason
                );
                self.close();
                Some(Err(StreamError::Decode(err)))
            }
        }
    }
}

impl<S, D> Stream for EventStreamReader<S, D>
where
    S: Stream<Item = Result<Bytes, HttpError>> + Unpin,
    D: RecordDecoder + Unpin,
{
    type Item = Result<D::Output, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match this.state {
                ReaderState::Finished => return Poll::Ready(None),
                ReaderState::Draining => {
                    if let Some(record) = this.lines.next_record() {
                        match this.decode_record(record) {
                            Some(item) => return Poll::Ready(Some(item)),
                            None => continue,
                        }
                    }
                    let tail = this.lines.finish();
                    this.close();
                    return Poll::Ready(tail.and_then(|record| this.decode_record(record)));
                }
                ReaderState::Reading => {
                    if let Some(record) = this.lines.next_record() {
                        match this.decode_record(record) {
                            Some(item) => return Poll::Ready(Some(item)),
                            None => continue,
                        }
                    }

                    let Some(source) = this.source.as_mut() else {
                        this.state = ReaderState::Draining;
                        continue;
                    };

                    match ready!(source.poll_next_unpin(cx)) {
                        Some(Ok(chunk)) => {
                            let text = this.bytes.decode(&chunk);
                            this.lines.push(&text);
                        }
                        Some(Err(err)) => {
                            tracing::warn!(
                                delivered = this.delivered,
                                "Response body ended with an error: {}",
                                err
                            );
                            this.close();
                            return Poll::Ready(Some(Err(StreamError::Interrupted(err))));
                        }
                        None => {
                            let tail = this.bytes.finish();
                            this.lines.push(&tail);
                            this.source = None;
                            this.state = ReaderState::Draining;
                            tracing::trace!(
                                delivered = this.delivered,
                                pending = this.lines.pending_len(),
                                "Response body exhausted"
                            );
                        }
                    }
                }
            }
        }
    }
}

impl<S, D> FusedStream for EventStreamReader<S, D>
where
    S: Stream<Item = Result<Bytes, HttpError>> + Unpin,
    D: RecordDecoder + Unpin,
{
    fn is_terminated(&self) -> bool {
        self.state == ReaderState::Finished
    }
}
