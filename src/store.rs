//! The section store: sole owner of fetched section data.
//!
//! Sections are fetched once per (collection, locale) key from the content
//! layer, converted to [`SearchableSection`]s, and cached for the lifetime
//! of the store. Two guarantees matter to callers:
//!
//! - **Idempotence**: a key with cached, non-empty sections never refetches.
//! - **Single-flight**: concurrent `load()` calls for the same key attach to
//!   one shared in-flight future instead of issuing duplicate fetches.
//!
//! Fetch failures are absorbed here: the error is recorded per key, the
//! section list degrades to empty, and callers never see an `Err`. Search
//! over a failed collection silently returns nothing while other sources
//! keep working.

use crate::types::{CollectionKey, RawSection, SearchableSection};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by the content-layer collaborator.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The content store could not be reached or answered with a failure.
    #[error("content source unavailable: {0}")]
    Unavailable(String),
    /// The payload for a collection could not be interpreted.
    #[error("malformed section payload: {0}")]
    Malformed(String),
}

/// The content-layer interface: section lists for a named collection,
/// already filtered to published items.
#[async_trait]
pub trait SectionSource: Send + Sync {
    async fn fetch_sections(&self, key: &CollectionKey)
        -> Result<Vec<RawSection>, SourceError>;
}

type LoadFuture = Shared<BoxFuture<'static, ()>>;

/// Keyed cache of section lists with single-flight loading.
pub struct SectionStore {
    source: Arc<dyn SectionSource>,
    sections: RwLock<HashMap<CollectionKey, Arc<Vec<SearchableSection>>>>,
    errors: RwLock<HashMap<CollectionKey, String>>,
    pending: Mutex<HashMap<CollectionKey, LoadFuture>>,
}

impl SectionStore {
    pub fn new(source: Arc<dyn SectionSource>) -> Arc<Self> {
        Arc::new(SectionStore {
            source,
            sections: RwLock::new(HashMap::new()),
            errors: RwLock::new(HashMap::new()),
            pending: Mutex::new(HashMap::new()),
        })
    }

    /// Cached sections for a key; empty if never loaded or load failed.
    pub fn sections(&self, key: &CollectionKey) -> Arc<Vec<SearchableSection>> {
        self.sections
            .read()
            .get(key)
            .cloned()
            .unwrap_or_else(|| Arc::new(Vec::new()))
    }

    /// The recorded fetch error for a key, if its last load failed.
    pub fn error(&self, key: &CollectionKey) -> Option<String> {
        self.errors.read().get(key).cloned()
    }

    /// Does the key have cached, non-empty sections?
    ///
    /// An empty cached list (from a failed or empty fetch) does not count,
    /// so the next `load()` retries.
    pub fn has_sections(&self, key: &CollectionKey) -> bool {
        self.sections
            .read()
            .get(key)
            .is_some_and(|sections| !sections.is_empty())
    }

    /// Ensure sections for a key are loaded.
    ///
    /// Never fails; on fetch error the key degrades to an empty list with
    /// the error recorded. Concurrent calls for the same key share one
    /// underlying fetch.
    pub async fn load(self: &Arc<Self>, key: &CollectionKey) {
        if self.has_sections(key) {
            return;
        }

        let load = {
            let mut pending = self.pending.lock();
            match pending.get(key) {
                Some(in_flight) => in_flight.clone(),
                None => {
                    let store = Arc::clone(self);
                    let key_owned = key.clone();
                    let load: LoadFuture = async move {
                        store.fetch_into_cache(&key_owned).await;
                        store.pending.lock().remove(&key_owned);
                    }
                    .boxed()
                    .shared();
                    pending.insert(key.clone(), load.clone());
                    load
                }
            }
        };

        load.await;
    }

    async fn fetch_into_cache(&self, key: &CollectionKey) {
        match self.source.fetch_sections(key).await {
            Ok(raw) => {
                let sections: Vec<SearchableSection> =
                    raw.into_iter().map(SearchableSection::from_raw).collect();
                tracing::debug!(key = %key, count = sections.len(), "loaded search sections");
                self.sections
                    .write()
                    .insert(key.clone(), Arc::new(sections));
                self.errors.write().remove(key);
            }
            Err(err) => {
                tracing::error!(key = %key, error = %err, "failed to fetch search sections");
                self.errors.write().insert(key.clone(), err.to_string());
                self.sections
                    .write()
                    .insert(key.clone(), Arc::new(Vec::new()));
            }
        }
    }
}
