//! Section store behavior: idempotence, single-flight, failure degradation.

use crate::common::{posts_en, raw_section, MockSource};
use omnibar::{CollectionKey, Locale, SectionStore};
use std::sync::Arc;
use std::time::Duration;

fn posts_key() -> CollectionKey {
    CollectionKey::new("posts", Locale::En)
}

#[tokio::test]
async fn load_is_idempotent_for_cached_keys() {
    let source = Arc::new(MockSource::new().with_sections("posts_en", posts_en()));
    let store = SectionStore::new(source.clone());
    let key = posts_key();

    store.load(&key).await;
    store.load(&key).await;

    assert_eq!(source.fetch_count("posts_en"), 1);
    assert_eq!(store.sections(&key).len(), 3);
}

#[tokio::test(start_paused = true)]
async fn concurrent_loads_share_one_fetch() {
    let source = Arc::new(
        MockSource::new()
            .with_sections("posts_en", posts_en())
            .with_delay(Duration::from_millis(50)),
    );
    let store = SectionStore::new(source.clone());
    let key = posts_key();

    tokio::join!(store.load(&key), store.load(&key));

    assert_eq!(source.fetch_count("posts_en"), 1);
    assert!(store.has_sections(&key));
}

#[tokio::test]
async fn distinct_keys_fetch_independently() {
    let source = Arc::new(
        MockSource::new()
            .with_sections("posts_en", posts_en())
            .with_sections("posts_zh", vec![raw_section("/zh/posts/a", "甲", &["甲"], 1, "")]),
    );
    let store = SectionStore::new(source.clone());

    store.load(&CollectionKey::new("posts", Locale::En)).await;
    store.load(&CollectionKey::new("posts", Locale::Zh)).await;

    assert_eq!(source.total_fetches(), 2);
}

#[tokio::test]
async fn failed_fetch_degrades_and_retries_on_next_load() {
    let source = Arc::new(MockSource::new().failing("posts"));
    let store = SectionStore::new(source.clone());
    let key = posts_key();

    store.load(&key).await;
    assert!(store.sections(&key).is_empty());
    assert!(store.error(&key).is_some());

    // Empty cache entries do not satisfy idempotence, so the store retries.
    store.load(&key).await;
    assert_eq!(source.fetch_count("posts_en"), 2);
}

#[tokio::test]
async fn successful_load_records_no_error() {
    let source = Arc::new(MockSource::new().with_sections("posts_en", posts_en()));
    let store = SectionStore::new(source.clone());
    let key = posts_key();

    store.load(&key).await;
    assert!(store.error(&key).is_none());
}
