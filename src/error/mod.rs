//! Error handling for the explorer client.
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Domain-specific Errors**: transport, stream and configuration errors
//! - **Unified Error Type**: `ExplorerError` consolidates all error types
//! - **Result Type Alias**: `ExplorerResult<T>` for consistent return types
//!
//! | Failure | Type | Where it surfaces |
//! |---------|------|-------------------|
//! | Non-2xx status, connect failure | [`TransportError`] | Client boundary, logged; empty stream under the soft policy |
//! | Malformed record | [`StreamError::Decode`] | Final item of the record stream |
//! | Body cut off mid-stream | [`StreamError::Interrupted`] | Final item of the record stream |
//! | Missing base URL | [`crate::config::ConfigError`] | Startup |

mod category;
mod explorer_error;
mod result;
mod stream;
mod transport;

pub use category::ErrorCategory;
pub use explorer_error::ExplorerError;
pub use result::ExplorerResult;
pub use stream::{ParseError, StreamError};
pub use transport::TransportError;
