//! Locale switching re-targets content search without mixing collections.

use crate::common::{raw_section, MockSource};
use omnibar::{GlobalSearch, Locale, SearchConfig, SelectAction};
use std::sync::Arc;

fn bilingual_engine() -> (Arc<GlobalSearch>, Arc<MockSource>) {
    let source = Arc::new(
        MockSource::new()
            .with_sections(
                "posts_en",
                vec![raw_section(
                    "/posts/search-notes",
                    "Search Notes",
                    &["Search Notes"],
                    1,
                    "Notes on building the search surface.",
                )],
            )
            .with_sections(
                "posts_zh",
                vec![raw_section(
                    "/zh/posts/search-notes",
                    "Search 筆記",
                    &["Search 筆記"],
                    1,
                    "關於搜尋介面的筆記。",
                )],
            )
            .with_sections("projects_en", vec![])
            .with_sections("projects_zh", vec![]),
    );
    let search = GlobalSearch::new(source.clone(), SearchConfig::default());
    (search, source)
}

#[tokio::test]
async fn switching_locale_queries_the_new_collection_only() {
    let (search, source) = bilingual_engine();

    search.set_query("search");
    search.perform_search().await;
    let en_ids: Vec<String> = search.results().iter().map(|r| r.id.clone()).collect();
    assert!(en_ids.contains(&"/posts/search-notes".to_string()));
    assert!(!en_ids.contains(&"/zh/posts/search-notes".to_string()));

    search.apply_action(SelectAction::SwitchLocale { locale: Locale::Zh });
    assert_eq!(search.locale().active(), Locale::Zh);

    search.perform_search().await;
    let zh_ids: Vec<String> = search.results().iter().map(|r| r.id.clone()).collect();
    assert!(zh_ids.contains(&"/zh/posts/search-notes".to_string()));
    // Results from the prior locale are never mixed in.
    assert!(!zh_ids.contains(&"/posts/search-notes".to_string()));

    // Each locale's collection was fetched exactly once.
    assert_eq!(source.fetch_count("posts_en"), 1);
    assert_eq!(source.fetch_count("posts_zh"), 1);
}

#[tokio::test]
async fn theme_toggle_action_flips_owned_state() {
    let (search, _) = bilingual_engine();

    assert!(!search.theme().is_dark());
    search.apply_action(SelectAction::ToggleTheme);
    assert!(search.theme().is_dark());
}

#[tokio::test]
async fn switching_back_reuses_the_cached_index() {
    let (search, source) = bilingual_engine();

    search.set_query("search");
    search.perform_search().await;
    search.apply_action(SelectAction::SwitchLocale { locale: Locale::Zh });
    search.perform_search().await;
    search.apply_action(SelectAction::SwitchLocale { locale: Locale::En });
    search.perform_search().await;

    // The English index survives the round trip; no refetch.
    assert_eq!(source.fetch_count("posts_en"), 1);
    assert!(search
        .results()
        .iter()
        .any(|r| r.id == "/posts/search-notes"));
}
