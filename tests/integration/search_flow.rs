//! End-to-end search passes through the aggregator.

use crate::common::{posts_en, projects_en, raw_section, MockSource};
use omnibar::{GlobalSearch, ResultType, SearchConfig};
use std::sync::Arc;
use std::time::Duration;

fn engine_with(source: MockSource) -> (Arc<GlobalSearch>, Arc<MockSource>) {
    let source = Arc::new(source);
    let search = GlobalSearch::new(source.clone(), SearchConfig::default());
    (search, source)
}

fn default_engine() -> (Arc<GlobalSearch>, Arc<MockSource>) {
    engine_with(
        MockSource::new()
            .with_sections("posts_en", posts_en())
            .with_sections("projects_en", projects_en()),
    )
}

#[tokio::test]
async fn prepare_is_idempotent_across_searches() {
    let (search, source) = default_engine();

    search.ensure_content_search_ready().await;
    search.set_query("blog");
    search.perform_search().await;
    search.set_query("shader");
    search.perform_search().await;

    assert_eq!(source.fetch_count("posts_en"), 1);
    assert_eq!(source.fetch_count("projects_en"), 1);
}

#[tokio::test]
async fn blog_query_ranks_nav_above_content() {
    let (search, _) = default_engine();

    search.set_query("blog");
    search.perform_search().await;
    let results = search.results();

    // The nav entry "Blog" is an exact title match (140); the post section
    // scores on the lexical index's own scale, well below.
    assert_eq!(results[0].id, "nav-posts");
    assert_eq!(results[0].kind, ResultType::Nav);
    let post_position = results
        .iter()
        .position(|r| r.id == "/posts/my-blog-journey")
        .expect("post section should match");
    assert!(post_position > 0);
    assert!(results[0].score > results[post_position].score);

    // Scores are non-increasing throughout.
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[tokio::test]
async fn grouped_results_partition_by_type_in_fixed_order() {
    let (search, _) = default_engine();

    search.set_query("blog");
    search.perform_search().await;
    let groups = search.grouped_results();

    assert_eq!(groups.len(), 4);
    let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, ["post", "project", "nav", "action"]);

    assert!(groups[0].items.iter().all(|r| r.kind == ResultType::Post));
    assert!(groups[0]
        .items
        .iter()
        .any(|r| r.document_title == "My Blog Journey"));
    assert!(groups[2].items.iter().any(|r| r.id == "nav-posts"));
    // Empty groups are retained, not filtered.
    assert!(groups[1].items.is_empty());
}

#[tokio::test]
async fn results_are_truncated_to_the_configured_maximum() {
    let sections = (0..45)
        .map(|i| {
            raw_section(
                &format!("/posts/widget-{i}"),
                &format!("Widget {i}"),
                &[&format!("Widget {i}")],
                1,
                "All about widgets.",
            )
        })
        .collect();
    let (search, _) = engine_with(MockSource::new().with_sections("posts_en", sections));

    search.set_query("widget");
    search.perform_search().await;

    assert_eq!(search.results().len(), 30);
}

#[tokio::test]
async fn empty_query_clears_results() {
    let (search, _) = default_engine();

    search.set_query("blog");
    search.perform_search().await;
    assert!(search.has_results());

    search.set_query("   ");
    search.perform_search().await;
    assert!(!search.has_results());
}

#[tokio::test]
async fn failed_collection_degrades_without_breaking_other_sources() {
    let (search, _) = engine_with(
        MockSource::new()
            .failing("posts")
            .with_sections("projects_en", projects_en()),
    );

    search.set_query("shader");
    search.perform_search().await;

    let results = search.results();
    assert!(results.iter().any(|r| r.id == "/projects/shader-toy"));
    assert!(results.iter().all(|r| r.kind != ResultType::Post));
}

#[tokio::test]
async fn transient_fetch_failure_recovers_on_the_next_search() {
    let (search, source) = engine_with(
        MockSource::new()
            .failing_once("posts")
            .with_sections("posts_en", posts_en()),
    );

    search.set_query("blog");
    search.perform_search().await;
    assert!(search
        .results()
        .iter()
        .all(|r| r.id != "/posts/my-blog-journey"));

    // The failed key retries, and the refetched sections must actually be
    // searchable, not shadowed by the empty index cached during the failure.
    search.perform_search().await;
    assert_eq!(source.fetch_count("posts_en"), 2);
    assert!(search
        .results()
        .iter()
        .any(|r| r.id == "/posts/my-blog-journey"));
}

#[tokio::test]
async fn matching_results_are_highlighted() {
    let (search, _) = default_engine();

    search.set_query("blog");
    search.perform_search().await;
    let results = search.results();

    let post = results
        .iter()
        .find(|r| r.id == "/posts/my-blog-journey")
        .unwrap();
    assert!(post.document_title_html.contains("<mark>Blog</mark>"));
    assert!(post.snippet_html.contains("<mark>blog</mark>"));
}

#[tokio::test]
async fn suggestions_come_from_static_providers_only() {
    let (search, source) = default_engine();

    let suggestions = search.suggestions();
    // Available before any content fetch has happened.
    assert_eq!(source.total_fetches(), 0);

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].key, "navigation");
    assert_eq!(suggestions[0].items.len(), 5);
    assert_eq!(suggestions[1].key, "actions");
    // Theme toggle + locale switch + three configured actions.
    assert_eq!(suggestions[1].items.len(), 5);
    assert!(search.has_suggestions());
}

#[tokio::test(start_paused = true)]
async fn debounced_input_coalesces_into_one_trailing_search() {
    let (search, source) = default_engine();

    for query in ["b", "bl", "blo", "blog"] {
        search.on_query_input(query);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    // Quiet period elapses once, after the last keystroke.
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert!(search.has_results());
    assert_eq!(search.query(), "blog");
    assert_eq!(source.fetch_count("posts_en"), 1);
}
