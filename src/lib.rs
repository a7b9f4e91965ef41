//! Unified multi-source search for a content site's command palette.
//!
//! One query fans out to heterogeneous sources (lexically indexed content
//! sections plus static navigation and quick-action providers) and comes
//! back as a single ranked, highlighted, grouped result list.
//!
//! # Architecture
//!
//! ```text
//! query ──debounce──▶ GlobalSearch (global.rs)
//!                        │
//!          ┌─────────────┼──────────────────┐
//!          ▼             ▼                  ▼
//!   ContentSearch   NavEntries        ActionEntries
//!    (content.rs)   (entries.rs)      (entries.rs)
//!          │
//!    SectionStore ──▶ SectionIndex
//!     (store.rs)       (index.rs)
//!          │
//!    SectionSource  (the content layer, supplied by the host)
//!
//! all raw matches ──▶ into_result (highlight.rs) ──▶ ranked + truncated
//! ```
//!
//! Content indices are built lazily, once per (collection, locale) key, with
//! single-flight fetch deduplication. Fetch failures degrade that source to
//! empty results; they never surface as errors from a search call.
//!
//! # Usage
//!
//! ```ignore
//! use omnibar::{GlobalSearch, SearchConfig};
//!
//! let search = GlobalSearch::new(content_source, SearchConfig::default());
//! search.ensure_content_search_ready().await;
//! search.set_query("rust");
//! search.perform_search().await;
//! for group in search.grouped_results() {
//!     // render group.label, group.items...
//! }
//! ```

pub mod config;
pub mod content;
pub mod debounce;
pub mod entries;
pub mod fuzzy;
pub mod global;
pub mod highlight;
pub mod index;
pub mod locale;
pub mod store;
pub mod theme;
pub mod types;
pub mod utils;

// Re-exports for the public API
pub use config::{ContentSourceConfig, NavLinkConfig, QuickActionConfig, SearchConfig};
pub use content::{ContentSearch, IndexCache};
pub use debounce::Debouncer;
pub use entries::{ActionEntries, NavEntries};
pub use global::{hint_keys, GlobalSearch};
pub use highlight::{build_snippet, escape_html, highlight_text, into_result, ResultPayload};
pub use index::{build_index, SectionHit, SectionIndex, FUZZY_TOLERANCE};
pub use locale::{message, Locale, LocaleState};
pub use store::{SectionSource, SectionStore, SourceError};
pub use theme::{ThemeMode, ThemeState};
pub use types::{
    CollectionKey, GlobalSearchResult, RawSection, ReadyState, ResultBehavior, ResultType,
    SearchSuggestionGroup, SearchableSection, SelectAction,
};
pub use utils::{document_path, normalize, normalize_path};
