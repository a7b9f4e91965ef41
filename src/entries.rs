//! Static entry providers: navigation links and quick actions.
//!
//! Unlike the content sources these need no preparation; they resolve their
//! entries from config plus live locale/theme state on every call, so they
//! are always available, including for the no-query suggestion list.
//!
//! Scoring uses fixed heuristic constants rather than the lexical index's
//! relevance scale, which makes cross-source ranking only loosely principled
//! (a weak lexical match can outrank a strong nav match or vice versa).
//! That is the shipped, observed behavior and is kept as-is.

use crate::config::SearchConfig;
use crate::highlight::{into_result, ResultPayload};
use crate::locale::{message, Locale, LocaleState};
use crate::theme::ThemeState;
use crate::types::{GlobalSearchResult, ResultBehavior, ResultType, SelectAction};
use std::sync::Arc;

/// Score for a nav entry whose title equals the query exactly.
const NAV_SCORE_EXACT: f64 = 140.0;
/// Score for any other matching nav entry.
const NAV_SCORE_BASE: f64 = 100.0;
/// Score for a matching quick action.
const ACTION_SCORE: f64 = 90.0;

/// A fully resolved entry: localized text plus selection behavior.
struct ResolvedEntry {
    id: String,
    title: String,
    description: String,
    icon: String,
    behavior: ResultBehavior,
}

/// Case-insensitive filter shared by both providers: an entry matches if the
/// keyword occurs in its title, its description, or the provider's own
/// category label (so a bare "navigation" surfaces every nav entry).
fn matches(entry: &ResolvedEntry, category_label: &str, term: &str) -> bool {
    entry.title.to_lowercase().contains(term)
        || entry.description.to_lowercase().contains(term)
        || category_label.to_lowercase().contains(term)
}

fn entry_result(
    entry: ResolvedEntry,
    kind: ResultType,
    category_label: &str,
    score: f64,
    keyword: &str,
) -> GlobalSearchResult {
    into_result(
        ResultPayload {
            id: entry.id,
            kind,
            behavior: entry.behavior,
            document_title: entry.title,
            section_title: category_label.to_string(),
            snippet: entry.description,
            score,
            icon: Some(entry.icon),
        },
        keyword,
    )
}

/// The navigation provider: a fixed ordered list of site destinations.
pub struct NavEntries {
    config: Arc<SearchConfig>,
    locale: Arc<LocaleState>,
}

impl NavEntries {
    pub fn new(config: Arc<SearchConfig>, locale: Arc<LocaleState>) -> Self {
        NavEntries { config, locale }
    }

    fn category_label(&self, locale: Locale) -> String {
        message(locale, "group.navigation")
    }

    fn resolved(&self) -> Vec<ResolvedEntry> {
        let locale = self.locale.active();
        self.config
            .nav_links
            .iter()
            .map(|link| ResolvedEntry {
                id: link.id.clone(),
                title: message(locale, &link.label_key),
                description: message(locale, &link.description_key),
                icon: link.icon.clone(),
                behavior: ResultBehavior::navigate(self.locale.localize_path(&link.path)),
            })
            .collect()
    }

    /// Nav entries matching a keyword, scored 140 for an exact title match
    /// and 100 otherwise.
    pub fn search(&self, keyword: &str) -> Vec<GlobalSearchResult> {
        let term = keyword.to_lowercase();
        let category = self.category_label(self.locale.active());
        self.resolved()
            .into_iter()
            .filter(|entry| matches(entry, &category, &term))
            .map(|entry| {
                let score = if entry.title.to_lowercase() == term {
                    NAV_SCORE_EXACT
                } else {
                    NAV_SCORE_BASE
                };
                entry_result(
                    ResolvedEntry {
                        id: format!("nav-{}", entry.id),
                        ..entry
                    },
                    ResultType::Nav,
                    &category,
                    score,
                    keyword,
                )
            })
            .collect()
    }

    /// All nav entries, unscored, for the empty-query suggestion list.
    pub fn suggestions(&self) -> Vec<GlobalSearchResult> {
        let category = self.category_label(self.locale.active());
        self.resolved()
            .into_iter()
            .map(|entry| {
                entry_result(
                    ResolvedEntry {
                        id: format!("suggestion-nav-{}", entry.id),
                        ..entry
                    },
                    ResultType::Nav,
                    &category,
                    0.0,
                    "",
                )
            })
            .collect()
    }
}

/// The quick-actions provider.
///
/// Always includes a theme toggle; includes a locale switch when more than
/// one locale is configured; then the configured static actions.
pub struct ActionEntries {
    config: Arc<SearchConfig>,
    locale: Arc<LocaleState>,
    theme: Arc<ThemeState>,
}

impl ActionEntries {
    pub fn new(
        config: Arc<SearchConfig>,
        locale: Arc<LocaleState>,
        theme: Arc<ThemeState>,
    ) -> Self {
        ActionEntries {
            config,
            locale,
            theme,
        }
    }

    fn category_label(&self, locale: Locale) -> String {
        message(locale, "group.actions")
    }

    fn resolved(&self) -> Vec<ResolvedEntry> {
        let locale = self.locale.active();
        let mut entries = Vec::with_capacity(self.config.quick_actions.len() + 2);

        // Theme toggle: label and icon name the mode it switches TO.
        // Keeps the surface open so the flip is visible.
        let (label_key, icon) = if self.theme.is_dark() {
            ("theme.toLight", "ri:sun-line")
        } else {
            ("theme.toDark", "ri:moon-line")
        };
        entries.push(ResolvedEntry {
            id: "toggle-theme".to_string(),
            title: message(locale, label_key),
            description: message(locale, "actions.theme.description"),
            icon: icon.to_string(),
            behavior: ResultBehavior::Invoke {
                action: SelectAction::ToggleTheme,
                close_on_select: false,
            },
        });

        // Locale switch: only meaningful with more than one locale. The
        // label names the target locale in that locale's own language.
        if self.locale.is_multilingual() {
            let target = self.locale.next();
            entries.push(ResolvedEntry {
                id: format!("switch-locale-{}", target.code()),
                title: format!(
                    "{} {}",
                    message(locale, "locale.switchTo"),
                    target.display_name()
                ),
                description: message(locale, "actions.locale.description"),
                icon: "ri:translate-2".to_string(),
                behavior: ResultBehavior::Invoke {
                    action: SelectAction::SwitchLocale { locale: target },
                    close_on_select: true,
                },
            });
        }

        for action in &self.config.quick_actions {
            entries.push(ResolvedEntry {
                id: action.id.clone(),
                title: message(locale, &action.label_key),
                description: message(locale, &action.description_key),
                icon: action.icon.clone(),
                behavior: if action.external {
                    ResultBehavior::navigate_external(action.url.clone())
                } else {
                    ResultBehavior::navigate(action.url.clone())
                },
            });
        }

        entries
    }

    /// Actions matching a keyword, at a fixed score of 90.
    pub fn search(&self, keyword: &str) -> Vec<GlobalSearchResult> {
        let term = keyword.to_lowercase();
        let category = self.category_label(self.locale.active());
        self.resolved()
            .into_iter()
            .filter(|entry| matches(entry, &category, &term))
            .map(|entry| {
                entry_result(
                    ResolvedEntry {
                        id: format!("action-{}", entry.id),
                        ..entry
                    },
                    ResultType::Action,
                    &category,
                    ACTION_SCORE,
                    keyword,
                )
            })
            .collect()
    }

    /// All actions, unscored, for the empty-query suggestion list.
    pub fn suggestions(&self) -> Vec<GlobalSearchResult> {
        let category = self.category_label(self.locale.active());
        self.resolved()
            .into_iter()
            .map(|entry| {
                entry_result(
                    ResolvedEntry {
                        id: format!("suggestion-action-{}", entry.id),
                        ..entry
                    },
                    ResultType::Action,
                    &category,
                    0.0,
                    "",
                )
            })
            .collect()
    }
}
