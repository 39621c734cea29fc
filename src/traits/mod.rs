//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (whole-document and streaming GET)
//! - [`RecordDecoder`] - Decoding of one framed NDJSON record

pub mod http;
pub mod record;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response, StreamingResponse};
pub use record::RecordDecoder;
