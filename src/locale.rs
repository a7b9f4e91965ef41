//! Locale configuration and translated labels for the search surface.
//!
//! The site ships two locales. The default (first configured) locale serves
//! unprefixed routes; every other locale is prefixed with its code, so the
//! Chinese rendition of `/posts` is `/zh/posts`.

use crate::utils::normalize_path;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A site locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Zh,
}

impl Locale {
    /// BCP 47-ish code used in route prefixes and collection keys.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    /// Human-readable name, in the locale's own language.
    pub fn display_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Zh => "中文",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The configured locale list plus the currently active locale.
///
/// Shared across every search component so a locale switch re-targets all of
/// them at once. The first configured locale is the default.
#[derive(Debug)]
pub struct LocaleState {
    configured: Vec<Locale>,
    active: RwLock<Locale>,
}

impl LocaleState {
    /// Create state over a configured locale list. An empty list falls back
    /// to English-only so there is always an active locale.
    pub fn new(configured: Vec<Locale>) -> Self {
        let configured = if configured.is_empty() {
            vec![Locale::En]
        } else {
            configured
        };
        let active = RwLock::new(configured[0]);
        LocaleState { configured, active }
    }

    pub fn configured(&self) -> &[Locale] {
        &self.configured
    }

    pub fn active(&self) -> Locale {
        *self.active.read()
    }

    pub fn set_active(&self, locale: Locale) {
        *self.active.write() = locale;
    }

    /// More than one locale configured?
    pub fn is_multilingual(&self) -> bool {
        self.configured.len() > 1
    }

    /// The locale after the active one, cycling through the configured list.
    ///
    /// Falls back to the default locale if the active locale is somehow not
    /// in the configured list.
    pub fn next(&self) -> Locale {
        let active = self.active();
        let position = self
            .configured
            .iter()
            .position(|l| *l == active)
            .unwrap_or(0);
        self.configured[(position + 1) % self.configured.len()]
    }

    /// Switch to the next locale in rotation and return it.
    pub fn switch_to_next(&self) -> Locale {
        let next = self.next();
        self.set_active(next);
        next
    }

    /// Localize a route path for the active locale.
    ///
    /// The default locale is unprefixed; others get a `/<code>` prefix,
    /// with the bare root localizing to `/<code>`.
    pub fn localize_path(&self, path: &str) -> String {
        let normalized = normalize_path(path);
        let active = self.active();
        if active == self.configured[0] {
            return normalized;
        }
        if normalized == "/" {
            format!("/{}", active.code())
        } else {
            format!("/{}{}", active.code(), normalized)
        }
    }
}

impl Default for LocaleState {
    fn default() -> Self {
        LocaleState::new(vec![Locale::En, Locale::Zh])
    }
}

/// Look up a translated label by message key.
///
/// Unknown keys fall back to English, then to the key itself, mirroring how
/// the site renders a missing translation rather than failing.
pub fn message(locale: Locale, key: &str) -> String {
    lookup(locale, key)
        .or_else(|| lookup(Locale::En, key))
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string())
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    let table: &[(&str, &str)] = match locale {
        Locale::En => EN_MESSAGES,
        Locale::Zh => ZH_MESSAGES,
    };
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, message)| *message)
}

const EN_MESSAGES: &[(&str, &str)] = &[
    ("nav.home.title", "Home"),
    ("nav.home.description", "Back to the front page"),
    ("nav.posts.title", "Blog"),
    ("nav.posts.description", "Read all blog posts"),
    ("nav.projects.title", "Projects"),
    ("nav.projects.description", "Browse project write-ups"),
    ("nav.demos.title", "Demos"),
    ("nav.demos.description", "Interactive demos and experiments"),
    ("nav.gallery.title", "Gallery"),
    ("nav.gallery.description", "Photography gallery"),
    ("actions.contact.title", "Contact me"),
    ("actions.contact.description", "Send an email"),
    ("actions.github.title", "GitHub"),
    ("actions.github.description", "Open my GitHub profile"),
    ("actions.instagram.title", "Instagram"),
    ("actions.instagram.description", "Open my Instagram profile"),
    ("actions.theme.description", "Toggle the color theme"),
    ("actions.locale.description", "Switch the site language"),
    ("group.navigation", "Navigation"),
    ("group.actions", "Actions"),
    ("theme.toLight", "Switch to light mode"),
    ("theme.toDark", "Switch to dark mode"),
    ("locale.switchTo", "Switch to"),
    ("type.post", "Posts"),
    ("type.project", "Projects"),
    ("type.nav", "Navigation"),
    ("type.action", "Actions"),
];

const ZH_MESSAGES: &[(&str, &str)] = &[
    ("nav.home.title", "首頁"),
    ("nav.home.description", "回到首頁"),
    ("nav.posts.title", "文章"),
    ("nav.posts.description", "閱讀所有文章"),
    ("nav.projects.title", "專案"),
    ("nav.projects.description", "瀏覽專案介紹"),
    ("nav.demos.title", "Demo"),
    ("nav.demos.description", "互動 Demo 與實驗"),
    ("nav.gallery.title", "相簿"),
    ("nav.gallery.description", "攝影相簿"),
    ("actions.contact.title", "聯絡我"),
    ("actions.contact.description", "寄一封電子郵件"),
    ("actions.github.title", "GitHub"),
    ("actions.github.description", "打開我的 GitHub"),
    ("actions.instagram.title", "Instagram"),
    ("actions.instagram.description", "打開我的 Instagram"),
    ("actions.theme.description", "切換色彩主題"),
    ("actions.locale.description", "切換網站語言"),
    ("group.navigation", "導覽"),
    ("group.actions", "快速操作"),
    ("theme.toLight", "切換至淺色模式"),
    ("theme.toDark", "切換至深色模式"),
    ("locale.switchTo", "切換至"),
    ("type.post", "文章"),
    ("type.project", "專案"),
    ("type.nav", "導覽"),
    ("type.action", "快速操作"),
];
