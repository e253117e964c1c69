//! Resource Loaders
//!
//! Resolve a resource identifier to its raw bytes. Loaders are synchronous;
//! the cache calls them from tokio's blocking pool.

use dashmap::DashMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Why a resource could not be loaded.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("resource does not exist")]
    NotFound,

    #[error("identifier does not name a resource")]
    InvalidIdentifier,

    #[error("{0}")]
    Unreadable(#[source] io::Error),
}

/// Source of resource bytes, keyed by resource identifier.
pub trait ResourceLoader: Send + Sync {
    fn load_bytes(&self, id: &str) -> Result<Vec<u8>, LoadError>;
}

/// Serves resources as files below a root directory.
///
/// Identifiers are relative paths. Absolute paths and `..` components are
/// rejected so a request cannot read outside the root.
#[derive(Debug, Clone)]
pub struct FsResourceLoader {
    root: PathBuf,
}

impl FsResourceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, id: &str) -> Result<PathBuf, LoadError> {
        let relative = Path::new(id);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if id.is_empty() || escapes {
            return Err(LoadError::InvalidIdentifier);
        }
        Ok(self.root.join(relative))
    }
}

impl ResourceLoader for FsResourceLoader {
    fn load_bytes(&self, id: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.resolve(id)?;
        tracing::debug!("Reading resource {} from {}", id, path.display());

        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(LoadError::NotFound),
            Err(e) => Err(LoadError::Unreadable(e)),
        }
    }
}

/// In-memory resources, for embedded assets and tests.
#[derive(Debug, Default)]
pub struct MemoryResourceLoader {
    resources: DashMap<String, Vec<u8>>,
}

impl MemoryResourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a resource and returns the loader, for chaining.
    pub fn with_resource(self, id: &str, content: impl Into<Vec<u8>>) -> Self {
        self.insert(id, content);
        self
    }

    pub fn insert(&self, id: &str, content: impl Into<Vec<u8>>) {
        self.resources.insert(id.to_string(), content.into());
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceLoader for MemoryResourceLoader {
    fn load_bytes(&self, id: &str) -> Result<Vec<u8>, LoadError> {
        self.resources
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(LoadError::NotFound)
    }
}
