//! Word Counter Service Library
//!
//! Counts word occurrences in text resources and serves two queries over
//! them: exact counts for a list of words, and the N most frequent words.
//! The binary (`main.rs`) wires these modules into an HTTP server.
//!
//! ## Modules
//! - **`counter`**: tokenizer, frequency index, the per-resource index cache,
//!   the query engine and the HTTP handlers on top of them.
//! - **`resources`**: loaders that turn a resource identifier into bytes
//!   (filesystem directory or in-memory map).
//! - **`config`**: command-line configuration for the service.
//! - **`error`**: the error type reported to query callers.

pub mod config;
pub mod counter;
pub mod error;
pub mod resources;

pub use config::Config;
pub use counter::cache::{MissingResourcePolicy, ResourceCache};
pub use counter::index::FrequencyIndex;
pub use counter::types::WordCount;
pub use error::{CounterError, Result};
