//! NDJSON stream decoding.
//!
//! Turns an HTTP body of newline-delimited JSON into a lazy stream of typed
//! values:
//!
//! ```text
//! bytes -> Utf8ChunkDecoder -> text -> LineSplitter -> records -> JsonRecordDecoder -> T
//! ```
//!
//! # Module structure
//! - `decoder` - UTF-8 decoding across chunk boundaries
//! - `splitter` - Re-framing text into delimiter-terminated records
//! - `record` - JSON decoding of one record
//! - `reader` - The pull-based stream tying them together

mod decoder;
mod reader;
mod record;
mod splitter;

pub use decoder::Utf8ChunkDecoder;
pub use reader::{read_ndjson, EventStreamReader, NdjsonStream, ReaderState};
pub use record::JsonRecordDecoder;
pub use splitter::{LineSplitter, NEWLINE};
