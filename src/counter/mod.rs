//! Word Counter Module
//!
//! Answers word-count queries against text resources. Each resource is
//! tokenized once into a frequency index and then served from the cache.
//!
//! ## Pipeline
//! 1. **Load**: the cache asks a `ResourceLoader` for the resource bytes (first access only).
//! 2. **Tokenize**: bytes become lowercase word tokens.
//! 3. **Index**: tokens are counted in parallel into a `FrequencyIndex`.
//! 4. **Query**: `lookup` and `top_n` read the cached index.
//!
//! ## Submodules
//! - **`cache`**: the per-resource index cache with build coalescing.
//! - **`handlers`**: HTTP handlers for the Axum web server.
//! - **`index`**: the frequency index and its parallel construction.
//! - **`protocol`**: endpoints, request/response DTOs and CSV encoding.
//! - **`query`**: word lookup and top-N selection.
//! - **`tokenizer`**: splitting text into lowercase word tokens.
//! - **`types`**: shared result types.

pub mod cache;
pub mod handlers;
pub mod index;
pub mod protocol;
pub mod query;
pub mod tokenizer;
pub mod types;
