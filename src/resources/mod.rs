//! Resource Loading Module
//!
//! Turns a resource identifier (e.g. `data.txt`) into the bytes that get
//! tokenized. The counter core only sees the [`loader::ResourceLoader`] trait;
//! which backend serves the bytes is decided at startup.
//!
//! ## Backends
//! - **`FsResourceLoader`**: files below a configured directory.
//! - **`MemoryResourceLoader`**: an in-process map of identifier -> bytes.

pub mod loader;

#[cfg(test)]
mod tests;
