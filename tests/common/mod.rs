//! Shared fixtures: a scriptable content source with fetch counting.

#![allow(dead_code)]

use async_trait::async_trait;
use omnibar::{CollectionKey, RawSection, SectionSource, SourceError};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// In-memory [`SectionSource`] that records every fetch, can delay to widen
/// race windows, and can fail for selected collections.
#[derive(Default)]
pub struct MockSource {
    sections: HashMap<String, Vec<RawSection>>,
    failing: HashSet<String>,
    failing_once: Mutex<HashSet<String>>,
    delay: Option<Duration>,
    fetch_counts: Mutex<HashMap<String, usize>>,
}

impl MockSource {
    pub fn new() -> Self {
        MockSource::default()
    }

    /// Register sections under a `<collection>_<locale>` key.
    pub fn with_sections(mut self, key: &str, sections: Vec<RawSection>) -> Self {
        self.sections.insert(key.to_string(), sections);
        self
    }

    /// Make fetches for a collection fail.
    pub fn failing(mut self, collection: &str) -> Self {
        self.failing.insert(collection.to_string());
        self
    }

    /// Make only the first fetch for a collection fail.
    pub fn failing_once(self, collection: &str) -> Self {
        self.failing_once.lock().insert(collection.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many fetches were issued for a key.
    pub fn fetch_count(&self, key: &str) -> usize {
        self.fetch_counts.lock().get(key).copied().unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetch_counts.lock().values().sum()
    }
}

#[async_trait]
impl SectionSource for MockSource {
    async fn fetch_sections(
        &self,
        key: &CollectionKey,
    ) -> Result<Vec<RawSection>, SourceError> {
        *self
            .fetch_counts
            .lock()
            .entry(key.to_string())
            .or_insert(0) += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.contains(&key.collection)
            || self.failing_once.lock().remove(&key.collection)
        {
            return Err(SourceError::Unavailable(format!(
                "mock failure for {key}"
            )));
        }

        Ok(self.sections.get(&key.to_string()).cloned().unwrap_or_default())
    }
}

pub fn raw_section(id: &str, title: &str, titles: &[&str], level: u8, content: &str) -> RawSection {
    RawSection {
        id: id.to_string(),
        title: title.to_string(),
        titles: titles.iter().map(|t| t.to_string()).collect(),
        level,
        content: content.to_string(),
    }
}

/// A small English posts collection.
pub fn posts_en() -> Vec<RawSection> {
    vec![
        raw_section(
            "/posts/my-blog-journey",
            "My Blog Journey",
            &["My Blog Journey"],
            1,
            "How this blog came to be, and what writing here taught me.",
        ),
        raw_section(
            "/posts/my-blog-journey#tooling",
            "Tooling",
            &["My Blog Journey", "Tooling"],
            2,
            "The static site generator, the search index, the deploy pipeline.",
        ),
        raw_section(
            "/posts/lenses",
            "Choosing Lenses",
            &["Choosing Lenses"],
            1,
            "Prime lenses against zooms for travel photography.",
        ),
    ]
}

/// A small English projects collection.
pub fn projects_en() -> Vec<RawSection> {
    vec![raw_section(
        "/projects/shader-toy",
        "Shader Toy",
        &["Shader Toy"],
        1,
        "A canvas shader playground built for the demos page.",
    )]
}
