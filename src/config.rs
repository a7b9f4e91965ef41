//! Search surface configuration.
//!
//! Host applications describe their content collections, navigation
//! destinations, and quick actions here; everything is deserializable so the
//! configuration can live alongside the rest of the site config. The
//! defaults mirror the blog this subsystem was built for.

use crate::locale::Locale;
use crate::types::ResultType;
use serde::{Deserialize, Serialize};

/// One content collection to search, and the result type its hits carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSourceConfig {
    pub collection: String,
    #[serde(rename = "type")]
    pub kind: ResultType,
}

/// A fixed navigation destination.
///
/// `label_key`/`description_key` are message-table keys so titles resolve
/// against the active locale at search time, not at config time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLinkConfig {
    pub id: String,
    pub path: String,
    pub label_key: String,
    pub description_key: String,
    pub icon: String,
}

/// A configured quick action (contact, external profiles).
///
/// Theme-toggle and locale-switch actions are not configured; the actions
/// provider derives them from live state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickActionConfig {
    pub id: String,
    pub url: String,
    pub label_key: String,
    pub description_key: String,
    pub icon: String,
    #[serde(default)]
    pub external: bool,
}

/// Everything the unified search surface needs to know about the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    pub content_sources: Vec<ContentSourceConfig>,
    pub nav_links: Vec<NavLinkConfig>,
    pub quick_actions: Vec<QuickActionConfig>,
    /// Configured locales; the first is the default (unprefixed routes).
    pub locales: Vec<Locale>,
    /// Result list cap after cross-source ranking.
    pub max_results: usize,
    /// Quiet period for the debounced search trigger.
    pub debounce_ms: u64,
}

fn nav_link(id: &str, path: &str, icon: &str) -> NavLinkConfig {
    NavLinkConfig {
        id: id.to_string(),
        path: path.to_string(),
        label_key: format!("nav.{id}.title"),
        description_key: format!("nav.{id}.description"),
        icon: icon.to_string(),
    }
}

fn quick_action(id: &str, url: &str, icon: &str) -> QuickActionConfig {
    QuickActionConfig {
        id: id.to_string(),
        url: url.to_string(),
        label_key: format!("actions.{id}.title"),
        description_key: format!("actions.{id}.description"),
        icon: icon.to_string(),
        external: true,
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            content_sources: vec![
                ContentSourceConfig {
                    collection: "posts".to_string(),
                    kind: ResultType::Post,
                },
                ContentSourceConfig {
                    collection: "projects".to_string(),
                    kind: ResultType::Project,
                },
            ],
            nav_links: vec![
                nav_link("home", "/", "ri:home-4-line"),
                nav_link("posts", "/posts", "ri:article-line"),
                nav_link("projects", "/projects", "ri:projector-line"),
                nav_link("demos", "/demos", "mdi:monitor-dashboard"),
                nav_link("gallery", "/gallery", "ri:camera-3-line"),
            ],
            quick_actions: vec![
                quick_action("contact", "mailto:hello@example.com", "ri:mail-send-line"),
                quick_action("github", "https://github.com/example", "ri:github-fill"),
                quick_action(
                    "instagram",
                    "https://instagram.com/example",
                    "ri:instagram-line",
                ),
            ],
            locales: vec![Locale::En, Locale::Zh],
            max_results: 30,
            debounce_ms: 200,
        }
    }
}
