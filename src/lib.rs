//! Explorer - streaming client for a recorded chat-bot combat event dataset
//!
//! The dataset server publishes an index, heuristic scores and, per
//! instance, NDJSON streams of raw events and distillations. This library
//! decodes those streams lazily into typed records.
//!
//! # Module structure
//! - `ndjson` - Byte to record decoding pipeline
//! - `client` - Dataset server client and record streams
//! - `models` - Event model, distillations and index documents
//! - `traits` / `adapters` - HTTP transport seam and its implementations
//! - `config` / `error` - Configuration and error taxonomy
//! - `cli` - Command-line front end

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod ndjson;
pub mod traits;
