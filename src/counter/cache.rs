//! Resource Index Cache
//!
//! Maps a resource identifier to its [`FrequencyIndex`]. Each identifier owns
//! a `OnceCell` slot inside a `DashMap`, so:
//! - the first request for an identifier builds the index and every request
//!   arriving while the build runs awaits that same build;
//! - later requests get the published `Arc` without touching the loader;
//! - builds for different identifiers never wait on each other, since the
//!   map lock is only held long enough to fetch or create a slot.
//!
//! The build itself runs on a spawned task rather than on the requesting
//! future, so a client that disconnects mid-build does not hand the build
//! over to the next waiter.
//!
//! Entries live until the cache is dropped, with two exceptions that are
//! removed once every waiter has its answer: failed builds, and empty
//! indexes stood in for resources that could not be loaded. The next
//! request for either starts a fresh build.

use super::index::FrequencyIndex;
use super::tokenizer::tokenize_bytes;
use crate::error::{CounterError, Result};
use crate::resources::loader::{LoadError, ResourceLoader};

use dashmap::DashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

type Slot = Arc<OnceCell<Result<Built>>>;

/// Outcome of one build, as stored in a slot.
#[derive(Debug, Clone)]
struct Built {
    index: Arc<FrequencyIndex>,
    /// The resource could not be loaded and `index` is an empty stand-in.
    unavailable: bool,
}

/// What to do when a resource cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingResourcePolicy {
    /// Index the resource as empty content and log a warning.
    #[default]
    Empty,
    /// Report `ResourceNotFound` / `ResourceUnreadable` to the caller.
    Fail,
}

impl FromStr for MissingResourcePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "empty" => Ok(Self::Empty),
            "fail" => Ok(Self::Fail),
            other => Err(format!(
                "unknown missing-resource policy '{}' (expected 'empty' or 'fail')",
                other
            )),
        }
    }
}

impl fmt::Display for MissingResourcePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty"),
            Self::Fail => f.write_str("fail"),
        }
    }
}

/// Per-resource frequency index cache.
pub struct ResourceCache {
    entries: Arc<DashMap<String, Slot>>,
    loader: Arc<dyn ResourceLoader>,
    policy: MissingResourcePolicy,
    builds: Arc<AtomicUsize>,
}

impl ResourceCache {
    pub fn new(loader: Arc<dyn ResourceLoader>, policy: MissingResourcePolicy) -> Arc<Self> {
        Arc::new(Self {
            entries: Arc::new(DashMap::new()),
            loader,
            policy,
            builds: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Returns the index for `id`, building it on first access.
    ///
    /// Concurrent first-time callers share one build and all receive the
    /// same `Arc`. Dropping a caller never cancels the build.
    pub async fn get_or_build(&self, id: &str) -> Result<Arc<FrequencyIndex>> {
        let slot = self.slot(id);

        if let Some(Ok(built)) = slot.get() {
            tracing::debug!("Found resource {} in cache", id);
            return Ok(Arc::clone(&built.index));
        }

        let job = BuildJob {
            id: id.to_string(),
            loader: Arc::clone(&self.loader),
            policy: self.policy,
            builds: Arc::clone(&self.builds),
        };
        let entries = Arc::clone(&self.entries);

        // Detached: the first task to reach `get_or_init` owns the build, and
        // it keeps running even if the request that spawned it goes away.
        let waiter = tokio::spawn(async move {
            let outcome = slot.get_or_init(|| job.run()).await.clone();

            let keep = matches!(&outcome, Ok(built) if !built.unavailable);
            if !keep {
                // Only drop the slot this build filled; a newer build may
                // already have replaced it.
                entries.remove_if(&job.id, |_, current| Arc::ptr_eq(current, &slot));
            }
            outcome
        });

        match waiter.await {
            Ok(outcome) => outcome.map(|built| built.index),
            Err(e) => Err(CounterError::IndexBuild {
                id: id.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn slot(&self, id: &str) -> Slot {
        if let Some(slot) = self.entries.get(id) {
            return Arc::clone(slot.value());
        }
        Arc::clone(self.entries.entry(id.to_string()).or_default().value())
    }

    /// True once `id` has a published index.
    pub fn contains(&self, id: &str) -> bool {
        self.entries
            .get(id)
            .map(|slot| matches!(slot.value().get(), Some(Ok(_))))
            .unwrap_or(false)
    }

    /// Number of identifiers with a slot (built or building).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many build attempts have completed, successfully or not, since
    /// the cache was created.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

/// Everything a build needs, owned so it can outlive the request.
struct BuildJob {
    id: String,
    loader: Arc<dyn ResourceLoader>,
    policy: MissingResourcePolicy,
    builds: Arc<AtomicUsize>,
}

impl BuildJob {
    async fn run(&self) -> Result<Built> {
        tracing::info!("Processing and caching resource {}", self.id);

        let loader = Arc::clone(&self.loader);
        let policy = self.policy;
        let key = self.id.clone();

        let outcome =
            tokio::task::spawn_blocking(move || build_index(loader.as_ref(), &key, policy))
                .await
                .map_err(|e| CounterError::IndexBuild {
                    id: self.id.clone(),
                    reason: e.to_string(),
                })
                .and_then(|built| built);
        self.builds.fetch_add(1, Ordering::SeqCst);

        match outcome {
            Ok((index, unavailable)) => {
                tracing::info!(
                    "Indexed resource {}: {} tokens, {} distinct words",
                    self.id,
                    index.total_tokens(),
                    index.len()
                );
                Ok(Built {
                    index: Arc::new(index),
                    unavailable,
                })
            }
            Err(err) => {
                tracing::error!("Failed to build index for {}: {}", self.id, err);
                Err(err)
            }
        }
    }
}

/// Loads and indexes one resource. The flag is set when the resource could
/// not be loaded and the policy substituted an empty index.
fn build_index(
    loader: &dyn ResourceLoader,
    id: &str,
    policy: MissingResourcePolicy,
) -> Result<(FrequencyIndex, bool)> {
    let bytes = match loader.load_bytes(id) {
        Ok(bytes) => bytes,
        Err(LoadError::InvalidIdentifier) => {
            return Err(CounterError::InvalidIdentifier(id.to_string()));
        }
        Err(err) if policy == MissingResourcePolicy::Empty => {
            tracing::warn!("Resource {} unavailable ({}), indexing as empty", id, err);
            return Ok((FrequencyIndex::empty(), true));
        }
        Err(LoadError::NotFound) => return Err(CounterError::ResourceNotFound(id.to_string())),
        Err(LoadError::Unreadable(e)) => {
            return Err(CounterError::ResourceUnreadable {
                id: id.to_string(),
                reason: e.to_string(),
            });
        }
    };

    let tokens = tokenize_bytes(&bytes);
    Ok((FrequencyIndex::from_tokens(&tokens), false))
}
