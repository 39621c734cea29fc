//! Instrumented byte source for testing stream consumers.
//!
//! [`ProbeStream`] replays a fixed list of chunks and records how often it
//! was polled and whether it has been dropped, so tests can check that a
//! consumer stops reading when it should.

use bytes::Bytes;
use futures::Stream;
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use crate::traits::HttpError;

#[derive(Debug, Default)]
struct ProbeState {
    polls: AtomicUsize,
    dropped: AtomicBool,
}

/// Observes a [`ProbeStream`] after it has been handed to a consumer.
#[derive(Debug, Clone)]
pub struct ProbeHandle {
    state: Arc<ProbeState>,
}

impl ProbeHandle {
    /// Number of times the stream has been polled.
    pub fn polls(&self) -> usize {
        self.state.polls.load(Ordering::SeqCst)
    }

    /// Whether the stream has been dropped.
    pub fn is_dropped(&self) -> bool {
        self.state.dropped.load(Ordering::SeqCst)
    }
}

/// A byte stream that replays predefined chunks.
#[derive(Debug)]
pub struct ProbeStream {
    items: VecDeque<Result<Bytes, HttpError>>,
    poll_limit: Option<usize>,
    state: Arc<ProbeState>,
}

impl ProbeStream {
    /// Create a stream yielding `items` in order, then ending.
    pub fn new(items: Vec<Result<Bytes, HttpError>>) -> Self {
        Self {
            items: items.into(),
            poll_limit: None,
            state: Arc::new(ProbeState::default()),
        }
    }

    /// Create a stream of text chunks.
    pub fn from_text<I, T>(chunks: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::new(
            chunks
                .into_iter()
                .map(|chunk| Ok(Bytes::from(chunk.into())))
                .collect(),
        )
    }

    /// Panic if polled more than `limit` times.
    pub fn with_poll_limit(mut self, limit: usize) -> Self {
        self.poll_limit = Some(limit);
        self
    }

    pub fn handle(&self) -> ProbeHandle {
        ProbeHandle {
            state: Arc::clone(&self.state),
        }
    }
}

impl Stream for ProbeStream {
    type Item = Result<Bytes, HttpError>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let polls = self.state.polls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(limit) = self.poll_limit {
            assert!(
                polls <= limit,
                "source polled {} times, limit was {}",
                polls,
                limit
            );
        }
        Poll::Ready(self.items.pop_front())
    }
}

impl Drop for ProbeStream {
    fn drop(&mut self) {
        self.state.dropped.store(true, Ordering::SeqCst);
    }
}
