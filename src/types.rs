//! The data model of the unified search surface.
//!
//! Three shapes matter here:
//!
//! - [`SearchableSection`]: one indexable chunk of long-form content,
//!   produced by the content layer and cached per [`CollectionKey`].
//! - [`GlobalSearchResult`]: the uniform record every source (content index,
//!   nav provider, actions provider) normalizes into.
//! - [`ResultBehavior`]: what selecting a result does. A tagged variant, not
//!   a `action:`-prefixed pseudo-URL, so the presentation layer dispatches
//!   on structure instead of string sniffing.
//!
//! # Invariants
//!
//! - Within one collection+locale, all section `id`s are unique (they double
//!   as index keys and navigation targets).
//! - `document_path` is always a normalized absolute path: leading `/`, no
//!   trailing `/` (the root path itself excepted).
//! - Result `id`s are collision-free across sources by construction: content
//!   sections use their raw section id, nav entries are prefixed `nav-`,
//!   actions `action-`.

use crate::locale::{message, Locale};
use crate::utils::document_path;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one locale-specific content collection, e.g. posts in English.
///
/// This is the cache key for section lists, lexical indices, and per-source
/// readiness state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionKey {
    pub collection: String,
    pub locale: Locale,
}

impl CollectionKey {
    pub fn new(collection: impl Into<String>, locale: Locale) -> Self {
        CollectionKey {
            collection: collection.into(),
            locale,
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.collection, self.locale)
    }
}

/// A section as delivered by the content layer, before path derivation.
///
/// `id` is `<documentPath>#<anchorSlug>`, or a bare `<documentPath>` for the
/// lead section of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSection {
    pub id: String,
    pub title: String,
    /// Heading hierarchy from the document title down to this section;
    /// `titles[0]` is always the document-level title.
    pub titles: Vec<String>,
    /// Heading depth: 1 = document title, 2 = h2, and so on.
    pub level: u8,
    pub content: String,
}

/// One indexable unit of long-form content.
///
/// The unit the lexical index stores and returns: a heading-delimited chunk
/// whose `content` runs until the next heading of equal-or-higher level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchableSection {
    pub id: String,
    pub title: String,
    pub titles: Vec<String>,
    pub level: u8,
    pub content: String,
    /// `id` with the anchor fragment stripped; identifies the document.
    pub document_path: String,
}

impl SearchableSection {
    /// Promote a raw section by deriving its document path from the id.
    pub fn from_raw(raw: RawSection) -> Self {
        let path = document_path(&raw.id);
        SearchableSection {
            id: raw.id,
            title: raw.title,
            titles: raw.titles,
            level: raw.level,
            content: raw.content,
            document_path: path,
        }
    }

    /// The document-level title: head of the heading hierarchy, falling back
    /// to the section's own title for lead sections.
    pub fn document_title(&self) -> &str {
        self.titles.first().map_or(&self.title, String::as_str)
    }
}

/// Closed tag set classifying every search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Post,
    Project,
    Nav,
    Action,
}

impl ResultType {
    /// Fixed display order for grouped results.
    pub const GROUP_ORDER: [ResultType; 4] = [
        ResultType::Post,
        ResultType::Project,
        ResultType::Nav,
        ResultType::Action,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResultType::Post => "post",
            ResultType::Project => "project",
            ResultType::Nav => "nav",
            ResultType::Action => "action",
        }
    }

    /// Translated group label for this result type.
    pub fn label(self, locale: Locale) -> String {
        message(locale, &format!("type.{}", self.as_str()))
    }

    /// Icon identifier shown next to the group header.
    pub fn icon(self) -> &'static str {
        match self {
            ResultType::Post => "ri:article-line",
            ResultType::Project => "ri:projector-line",
            ResultType::Nav => "ri:compass-3-line",
            ResultType::Action => "ri:flashlight-line",
        }
    }
}

/// An in-app effect a result can trigger instead of navigating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SelectAction {
    ToggleTheme,
    SwitchLocale { locale: Locale },
}

/// What selecting a result does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "behavior", rename_all = "camelCase")]
pub enum ResultBehavior {
    /// Go to a URL; `external` means outside the app context.
    Navigate { url: String, external: bool },
    /// Run an in-app effect. `close_on_select` controls whether the search
    /// surface closes afterwards (theme toggling keeps it open so the user
    /// sees the flip).
    Invoke {
        action: SelectAction,
        #[serde(rename = "closeOnSelect")]
        close_on_select: bool,
    },
}

impl ResultBehavior {
    pub fn navigate(url: impl Into<String>) -> Self {
        ResultBehavior::Navigate {
            url: url.into(),
            external: false,
        }
    }

    pub fn navigate_external(url: impl Into<String>) -> Self {
        ResultBehavior::Navigate {
            url: url.into(),
            external: true,
        }
    }

    /// Navigation target, if this result navigates at all.
    pub fn url(&self) -> Option<&str> {
        match self {
            ResultBehavior::Navigate { url, .. } => Some(url),
            ResultBehavior::Invoke { .. } => None,
        }
    }

    /// Whether choosing this result should close the search surface.
    /// Navigation always closes; invokes decide for themselves.
    pub fn close_on_select(&self) -> bool {
        match self {
            ResultBehavior::Navigate { .. } => true,
            ResultBehavior::Invoke {
                close_on_select, ..
            } => *close_on_select,
        }
    }
}

/// The uniform output record for any search source.
///
/// Constructed fresh on every search call and never mutated afterwards. The
/// `*_html` fields are the plain fields HTML-escaped and then highlight-
/// wrapped, in that order (see `highlight.rs` for why order matters).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSearchResult {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResultType,
    #[serde(flatten)]
    pub behavior: ResultBehavior,
    pub document_title: String,
    pub section_title: String,
    pub snippet: String,
    pub document_title_html: String,
    pub section_title_html: String,
    pub snippet_html: String,
    /// Non-negative; higher ranks first. The scale is source-dependent:
    /// content hits carry the lexical index's own relevance score, nav and
    /// action entries carry fixed heuristic constants.
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A labelled, homogeneous bucket of results.
///
/// Used both for the no-query suggestion list and for grouping real results
/// by type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSuggestionGroup {
    pub key: String,
    pub label: String,
    pub items: Vec<GlobalSearchResult>,
}

/// Lifecycle of one content source's index preparation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    #[default]
    NotPrepared,
    Preparing,
    Ready,
    /// Fetch or build failed; search degrades to empty for this source.
    Failed,
}

impl ReadyState {
    pub fn is_ready(self) -> bool {
        matches!(self, ReadyState::Ready)
    }
}
