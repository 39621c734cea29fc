//! Mock implementations for testing.
//!
//! These stand in for the network so that the client and the stream reader
//! can be unit tested without a server.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`ProbeStream`] - Byte source that records how it is consumed

pub mod http;
pub mod stream;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use stream::{ProbeHandle, ProbeStream};
