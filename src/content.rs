//! The content search facade: one per named collection.
//!
//! A facade hides the index lifecycle from the aggregator. `prepare()` pulls
//! sections through the [`SectionStore`] and gets-or-builds the lexical
//! index for the current (collection, locale) key; `search()` queries
//! whatever index is ready right now and degrades to empty otherwise.
//!
//! The facade never pins a locale: the current key is re-resolved from the
//! shared [`LocaleState`] on every call, so a locale switch re-targets it
//! without re-instantiation, and results from the prior locale's index are
//! never mixed in.

use crate::index::{build_index, SectionHit, SectionIndex};
use crate::locale::LocaleState;
use crate::store::SectionStore;
use crate::types::{CollectionKey, ReadyState, ResultType, SearchableSection};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Keyed cache of built indices, shared by all facades.
///
/// Owned by the composition root and injected, never a bare global. The only
/// exposed semantics are get-or-build: an index, once built for a key, is
/// reused until the key itself changes (a locale switch produces a new key).
#[derive(Default)]
pub struct IndexCache {
    indices: RwLock<HashMap<CollectionKey, Arc<SectionIndex>>>,
}

impl IndexCache {
    pub fn get(&self, key: &CollectionKey) -> Option<Arc<SectionIndex>> {
        self.indices.read().get(key).cloned()
    }

    /// Return the cached index for `key`, building one from `sections` if
    /// absent. The build happens under the write lock so concurrent callers
    /// cannot build twice; at blog scale the build is fast enough that
    /// holding the lock is a non-issue.
    pub fn get_or_build(
        &self,
        key: &CollectionKey,
        sections: &[SearchableSection],
    ) -> Arc<SectionIndex> {
        let mut indices = self.indices.write();
        if let Some(existing) = indices.get(key) {
            return existing.clone();
        }
        let built = Arc::new(build_index(sections));
        indices.insert(key.clone(), built.clone());
        built
    }

    /// Build a fresh index for `key` from `sections`, replacing any cached
    /// one. Used when the section list has changed out from under the cache,
    /// e.g. a retried fetch succeeding after a failure cached an empty index.
    pub fn rebuild(&self, key: &CollectionKey, sections: &[SearchableSection]) -> Arc<SectionIndex> {
        let built = Arc::new(build_index(sections));
        self.indices.write().insert(key.clone(), built.clone());
        built
    }
}

/// Search capability for one named content collection.
pub struct ContentSearch {
    collection: String,
    kind: ResultType,
    store: Arc<SectionStore>,
    locale: Arc<LocaleState>,
    indices: Arc<IndexCache>,
    ready: RwLock<HashMap<CollectionKey, ReadyState>>,
}

impl ContentSearch {
    pub fn new(
        collection: impl Into<String>,
        kind: ResultType,
        store: Arc<SectionStore>,
        locale: Arc<LocaleState>,
        indices: Arc<IndexCache>,
    ) -> Self {
        ContentSearch {
            collection: collection.into(),
            kind,
            store,
            locale,
            indices,
            ready: RwLock::new(HashMap::new()),
        }
    }

    /// The result type hits from this collection carry.
    pub fn kind(&self) -> ResultType {
        self.kind
    }

    /// The key this facade currently targets, derived from the active locale.
    pub fn current_key(&self) -> CollectionKey {
        CollectionKey::new(self.collection.clone(), self.locale.active())
    }

    /// Preparation state for the current key.
    pub fn ready_state(&self) -> ReadyState {
        self.ready
            .read()
            .get(&self.current_key())
            .copied()
            .unwrap_or_default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready_state().is_ready()
    }

    /// Ensure sections are loaded and an index is built for the current key.
    ///
    /// Idempotent: once a key is `Ready` this returns immediately, so a key
    /// sees at most one fetch and at most one index build. A `Failed` key
    /// retries on the next call.
    pub async fn prepare(&self) {
        let key = self.current_key();
        if self.ready.read().get(&key).copied() == Some(ReadyState::Ready) {
            return;
        }

        self.ready.write().insert(key.clone(), ReadyState::Preparing);
        self.store.load(&key).await;

        let sections = self.store.sections(&key);
        // A failed attempt caches an empty index for the key. If a retry has
        // since put sections in the store, that cache entry is stale and must
        // be replaced, not reused.
        let stale_empty = self
            .indices
            .get(&key)
            .is_some_and(|index| index.is_empty() && !sections.is_empty());
        if stale_empty {
            let _ = self.indices.rebuild(&key, &sections);
        } else {
            let _ = self.indices.get_or_build(&key, &sections);
        }

        let state = if self.store.error(&key).is_some() {
            ReadyState::Failed
        } else {
            ReadyState::Ready
        };
        self.ready.write().insert(key, state);
    }

    /// Search the current locale's collection.
    ///
    /// Returns empty for blank queries and for keys whose index has not been
    /// built yet (`prepare()` never called, still pending, or failed) rather
    /// than erroring.
    pub fn search(&self, query: &str) -> Vec<SectionHit> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        match self.indices.get(&self.current_key()) {
            Some(index) => index.search(query),
            None => Vec::new(),
        }
    }

    /// The recorded fetch error for the current key, if any.
    pub fn error(&self) -> Option<String> {
        self.store.error(&self.current_key())
    }
}
