//! The unified search: aggregation, ranking, and presentation state.
//!
//! [`GlobalSearch`] is the composition root. It owns the shared locale and
//! theme state, the section store, one content facade per configured
//! collection, the two static providers, and the reactive-ish state the
//! presentation layer binds to (query, results, flags).
//!
//! # Search lifecycle
//!
//! ```text
//! Idle → Preparing (indices building) → Searching → Idle (with results)
//! ```
//!
//! `Preparing` is skipped once every facade reports ready. Clearing the
//! query short-circuits back to idle with empty results. There is no
//! cancellation: overlapping invocations resolve last-write-wins, which is
//! sound because each is a pure function of (query, current indices) and the
//! indices change rarely.

use crate::config::SearchConfig;
use crate::content::{ContentSearch, IndexCache};
use crate::debounce::Debouncer;
use crate::entries::{ActionEntries, NavEntries};
use crate::highlight::{build_snippet, into_result, ResultPayload};
use crate::index::SectionHit;
use crate::locale::LocaleState;
use crate::store::{SectionSource, SectionStore};
use crate::theme::ThemeState;
use crate::types::{
    GlobalSearchResult, ResultBehavior, ResultType, SearchSuggestionGroup, SelectAction,
};
use futures::future::join_all;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// The unified multi-source search engine.
pub struct GlobalSearch {
    config: Arc<SearchConfig>,
    locale: Arc<LocaleState>,
    theme: Arc<ThemeState>,
    store: Arc<SectionStore>,
    content_sources: Vec<ContentSearch>,
    nav: NavEntries,
    actions: ActionEntries,
    query: RwLock<String>,
    results: RwLock<Vec<GlobalSearchResult>>,
    is_searching: AtomicBool,
    surface_open: AtomicBool,
    debouncer: Debouncer,
}

impl GlobalSearch {
    /// Wire up the whole subsystem over a content source and configuration.
    pub fn new(source: Arc<dyn SectionSource>, config: SearchConfig) -> Arc<Self> {
        let config = Arc::new(config);
        let locale = Arc::new(LocaleState::new(config.locales.clone()));
        let theme = Arc::new(ThemeState::default());
        let store = SectionStore::new(source);
        let indices = Arc::new(IndexCache::default());

        let content_sources = config
            .content_sources
            .iter()
            .map(|source_config| {
                ContentSearch::new(
                    source_config.collection.clone(),
                    source_config.kind,
                    Arc::clone(&store),
                    Arc::clone(&locale),
                    Arc::clone(&indices),
                )
            })
            .collect();

        let nav = NavEntries::new(Arc::clone(&config), Arc::clone(&locale));
        let actions = ActionEntries::new(
            Arc::clone(&config),
            Arc::clone(&locale),
            Arc::clone(&theme),
        );
        let debouncer = Debouncer::new(Duration::from_millis(config.debounce_ms));

        Arc::new(GlobalSearch {
            config,
            locale,
            theme,
            store,
            content_sources,
            nav,
            actions,
            query: RwLock::new(String::new()),
            results: RwLock::new(Vec::new()),
            is_searching: AtomicBool::new(false),
            surface_open: AtomicBool::new(false),
            debouncer,
        })
    }

    pub fn locale(&self) -> &Arc<LocaleState> {
        &self.locale
    }

    pub fn theme(&self) -> &Arc<ThemeState> {
        &self.theme
    }

    pub fn store(&self) -> &Arc<SectionStore> {
        &self.store
    }

    // ---- query + results state ------------------------------------------

    pub fn query(&self) -> String {
        self.query.read().clone()
    }

    pub fn set_query(&self, query: impl Into<String>) {
        *self.query.write() = query.into();
    }

    pub fn results(&self) -> Vec<GlobalSearchResult> {
        self.results.read().clone()
    }

    pub fn has_results(&self) -> bool {
        !self.results.read().is_empty()
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching.load(Ordering::Acquire)
    }

    // ---- search ----------------------------------------------------------

    /// Pre-warm every content index (e.g. on search-surface open, before the
    /// user types). Prepares run concurrently; ready facades are no-ops.
    pub async fn ensure_content_search_ready(&self) {
        join_all(
            self.content_sources
                .iter()
                .map(|facade| facade.prepare()),
        )
        .await;
    }

    /// Run one full search pass against the current query.
    ///
    /// Empty (after trimming) queries clear the results and return. All
    /// sources are queried against the same index snapshot; results are
    /// concatenated in source order (content, then nav, then actions),
    /// stable-sorted by descending score, and truncated to the configured
    /// maximum.
    pub async fn perform_search(&self) {
        let keyword = self.query().trim().to_string();
        if keyword.is_empty() {
            self.results.write().clear();
            return;
        }

        self.is_searching.store(true, Ordering::Release);
        self.ensure_content_search_ready().await;

        let mut aggregated: Vec<GlobalSearchResult> = Vec::new();
        for facade in &self.content_sources {
            let kind = facade.kind();
            aggregated.extend(
                facade
                    .search(&keyword)
                    .into_iter()
                    .map(|hit| section_result(hit, kind, &keyword)),
            );
        }
        aggregated.extend(self.nav.search(&keyword));
        aggregated.extend(self.actions.search(&keyword));

        // Stable sort: equal scores keep source-invocation order.
        aggregated.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        aggregated.truncate(self.config.max_results);

        *self.results.write() = aggregated;
        self.is_searching.store(false, Ordering::Release);
    }

    /// Debounced search trigger for input-change bindings: fire-and-forget,
    /// coalescing rapid keystrokes into one trailing search.
    pub fn debounced_search(self: &Arc<Self>) {
        let search = Arc::clone(self);
        self.debouncer
            .call(move || async move { search.perform_search().await });
    }

    /// Convenience binding: update the query and trigger a debounced search.
    pub fn on_query_input(self: &Arc<Self>, query: impl Into<String>) {
        self.set_query(query);
        self.debounced_search();
    }

    // ---- grouped views ---------------------------------------------------

    /// Results partitioned by type in fixed display order. Groups with zero
    /// items are retained; callers filter if they want to.
    pub fn grouped_results(&self) -> Vec<SearchSuggestionGroup> {
        let locale = self.locale.active();
        let results = self.results.read();
        ResultType::GROUP_ORDER
            .iter()
            .map(|kind| SearchSuggestionGroup {
                key: kind.as_str().to_string(),
                label: kind.label(locale),
                items: results
                    .iter()
                    .filter(|result| result.kind == *kind)
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// No-query suggestions from the static providers only, available even
    /// before any content index is ready. Empty groups are omitted.
    pub fn suggestions(&self) -> Vec<SearchSuggestionGroup> {
        let locale = self.locale.active();
        let groups = [
            SearchSuggestionGroup {
                key: "navigation".to_string(),
                label: crate::locale::message(locale, "group.navigation"),
                items: self.nav.suggestions(),
            },
            SearchSuggestionGroup {
                key: "actions".to_string(),
                label: crate::locale::message(locale, "group.actions"),
                items: self.actions.suggestions(),
            },
        ];
        groups
            .into_iter()
            .filter(|group| !group.items.is_empty())
            .collect()
    }

    pub fn has_suggestions(&self) -> bool {
        !self.suggestions().is_empty()
    }

    // ---- selection -------------------------------------------------------

    /// Execute an invoked action against the owned state. The presentation
    /// layer calls this when a selected result carries
    /// [`ResultBehavior::Invoke`], navigates itself for
    /// [`ResultBehavior::Navigate`], and then closes the surface unless the
    /// behavior says otherwise.
    pub fn apply_action(&self, action: SelectAction) {
        match action {
            SelectAction::ToggleTheme => {
                self.theme.toggle();
            }
            SelectAction::SwitchLocale { locale } => {
                self.locale.set_active(locale);
            }
        }
    }

    // ---- surface state ---------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.surface_open.load(Ordering::Acquire)
    }

    pub fn open(&self) {
        self.surface_open.store(true, Ordering::Release);
    }

    pub fn close(&self) {
        self.surface_open.store(false, Ordering::Release);
    }

    pub fn toggle_surface(&self) {
        self.surface_open.fetch_xor(true, Ordering::AcqRel);
    }
}

/// Keyboard-shortcut hint for the given user agent. Apple platforms show the
/// command key; everything else shows Ctrl, as does a missing user agent
/// (no UA signal to go on).
pub fn hint_keys(user_agent: Option<&str>) -> &'static str {
    let Some(user_agent) = user_agent else {
        return "Ctrl K";
    };
    let ua = user_agent.to_lowercase();
    if ["mac", "iphone", "ipod", "ipad"]
        .iter()
        .any(|platform| ua.contains(platform))
    {
        "⌘ K"
    } else {
        "Ctrl K"
    }
}

/// Normalize a content-section hit into the uniform result record.
///
/// The section id doubles as the navigation URL (content routes are already
/// locale-specific). The document title is the head of the heading trail.
fn section_result(hit: SectionHit, kind: ResultType, keyword: &str) -> GlobalSearchResult {
    let snippet = build_snippet(&hit.section.content, keyword);
    into_result(
        ResultPayload {
            id: hit.section.id.clone(),
            kind,
            behavior: ResultBehavior::navigate(hit.section.id.clone()),
            document_title: hit.section.document_title().to_string(),
            section_title: hit.section.title.clone(),
            snippet,
            score: hit.score,
            icon: None,
        },
        keyword,
    )
}
