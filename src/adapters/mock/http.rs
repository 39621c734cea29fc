//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses, streamed bodies or errors for testing purposes.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response, StreamingResponse};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Whether the body was requested as a stream
    pub streaming: bool,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a whole response
    Success(Response),
    /// Fail before any status line arrives
    Error(HttpError),
    /// Return a body delivered chunk by chunk
    Stream { status: u16, chunks: Vec<Bytes> },
    /// Deliver some chunks, then fail mid-body
    BrokenStream {
        status: u16,
        chunks: Vec<Bytes>,
        error: HttpError,
    },
}

impl MockResponse {
    /// A 200 response carrying `body` as one chunk.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        MockResponse::Success(Response::new(200, body.into()))
    }

    /// A 200 streamed response with the given text chunks.
    pub fn ndjson<I, T>(chunks: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        MockResponse::Stream {
            status: 200,
            chunks: chunks.into_iter().map(Into::into).collect(),
        }
    }

    /// A response with the given status and an empty body.
    pub fn status(status: u16) -> Self {
        MockResponse::Success(Response::new(status, Bytes::new()))
    }
}

/// Mock HTTP client for testing.
///
/// This client can be configured to return specific responses for URLs,
/// allowing tests to verify HTTP interactions without network access. Every
/// configured response can be served both as a whole document and as a
/// stream.
///
/// # Example
///
/// ```ignore
/// use explorer::adapters::mock::{MockHttpClient, MockResponse};
/// use explorer::traits::{HttpClient, Headers};
///
/// let client = MockHttpClient::new();
/// client.set_response("http://api/index", MockResponse::ok(r#"{"checksum":"x"}"#));
///
/// let response = client.get("http://api/index", &Headers::new()).await?;
/// assert_eq!(response.status, 200);
/// assert_eq!(client.get_requests()[0].url, "http://api/index");
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a specific URL.
    ///
    /// The URL is matched exactly first, then as a prefix.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Clear all configured responses.
    pub fn clear_responses(&self) {
        self.responses.lock().unwrap().clear();
    }

    fn record_request(&self, url: &str, headers: &Headers, streaming: bool) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            streaming,
        });
    }

    /// Get the response for a URL.
    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        // Longest prefix wins so that "/events" does not shadow "/events/x"
        let prefix_match = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, response)| response.clone());
        if prefix_match.is_some() {
            return prefix_match;
        }

        let default = self.default_response.lock().unwrap();
        default.clone()
    }

    fn chunk_stream(chunks: Vec<Bytes>, error: Option<HttpError>) -> ByteStream {
        let items = chunks
            .into_iter()
            .map(Ok)
            .chain(error.map(Err))
            .collect::<Vec<_>>();
        Box::pin(futures::stream::iter(items))
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request(url, headers, false);

        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Stream { status, chunks }) => {
                Ok(Response::new(status, Bytes::from(chunks.concat())))
            }
            Some(MockResponse::BrokenStream { error, .. }) => Err(error),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }

    async fn get_stream(
        &self,
        url: &str,
        headers: &Headers,
    ) -> Result<StreamingResponse, HttpError> {
        self.record_request(url, headers, true);

        match self.get_response(url) {
            Some(MockResponse::Success(response)) => {
                let chunks = if response.body.is_empty() {
                    Vec::new()
                } else {
                    vec![response.body]
                };
                let mut streaming =
                    StreamingResponse::new(response.status, Self::chunk_stream(chunks, None));
                streaming.headers = response.headers;
                Ok(streaming)
            }
            Some(MockResponse::Stream { status, chunks }) => {
                Ok(StreamingResponse::new(status, Self::chunk_stream(chunks, None)))
            }
            Some(MockResponse::BrokenStream {
                status,
                chunks,
                error,
            }) => Ok(StreamingResponse::new(
                status,
                Self::chunk_stream(chunks, Some(error)),
            )),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}
