//! End-to-end tests for the category tree, listings and search

mod common;

use common::{empty_engine, path, seeded_engine, PYTHON_TUTORIAL, SCIENCE_FACTS};
use minitube::{CategoryPath, EngineError};

fn titles_under(engine: &minitube::Engine, category: &str, deep: bool) -> Vec<String> {
    engine
        .list_category(&path(category), deep)
        .unwrap()
        .map(|video| video.title.clone())
        .collect()
}

// =============================================================================
// Tree structure
// =============================================================================

#[test]
fn test_add_nested_categories() {
    let mut engine = empty_engine();
    let education = engine.add_category(&CategoryPath::root(), "Education").unwrap();
    let programming = engine.add_category(&education, "Programming").unwrap();

    assert_eq!(programming, path("Education/Programming"));
    assert_eq!(
        engine.categories().children(&education).unwrap(),
        vec![programming]
    );
    assert_eq!(engine.find_category("Programming"), Some(path("Education/Programming")));
    assert_eq!(engine.find_category("Missing"), None);
}

#[test]
fn test_duplicate_sibling_is_rejected() {
    let mut engine = empty_engine();
    engine.add_category(&CategoryPath::root(), "Music").unwrap();
    let result = engine.add_category(&CategoryPath::root(), "Music");
    assert!(matches!(result, Err(EngineError::Duplicate { .. })));
}

#[test]
fn test_same_name_under_different_parents_is_allowed() {
    let mut engine = empty_engine();
    let a = engine.add_category(&CategoryPath::root(), "A").unwrap();
    let b = engine.add_category(&CategoryPath::root(), "B").unwrap();
    engine.add_category(&a, "Shared").unwrap();
    engine.add_category(&b, "Shared").unwrap();
    assert_eq!(engine.category_outline().len(), 5);
}

#[test]
fn test_unknown_parent_and_bad_names_are_rejected() {
    let mut engine = empty_engine();
    assert!(matches!(
        engine.add_category(&path("Ghost"), "Child"),
        Err(EngineError::NotFound { .. })
    ));
    assert!(matches!(
        engine.add_category(&CategoryPath::root(), "  "),
        Err(EngineError::Invalid(_))
    ));
    assert!(matches!(
        engine.add_category(&CategoryPath::root(), "a/b"),
        Err(EngineError::Invalid(_))
    ));
    assert_eq!(engine.category_outline().len(), 1);
}

#[test]
fn test_create_video_in_unknown_category_fails() {
    let mut engine = empty_engine();
    let result = engine.create_video("Orphan", &path("Nowhere"));
    assert!(matches!(result, Err(EngineError::NotFound { .. })));
    assert_eq!(engine.videos().count(), 0);
}

// =============================================================================
// Listings
// =============================================================================

#[test]
fn test_seeded_listing_is_depth_first() {
    let engine = seeded_engine();
    assert_eq!(titles_under(&engine, "Education", false), vec![SCIENCE_FACTS]);
    assert_eq!(
        titles_under(&engine, "Education", true),
        vec![SCIENCE_FACTS, PYTHON_TUTORIAL]
    );

    let everything = titles_under(&engine, "", true);
    assert_eq!(everything.len(), 11);
    assert_eq!(everything[0], "Mini YouTube Test Video");
    assert_eq!(everything[4], SCIENCE_FACTS);
    assert_eq!(everything[5], PYTHON_TUTORIAL);
    assert_eq!(everything[10], "Tech Review");
}

#[test]
fn test_listing_unknown_category_fails() {
    let engine = empty_engine();
    assert!(engine.list_category(&path("Nope"), true).is_err());
}

#[test]
fn test_outline_counts_direct_videos() {
    let engine = seeded_engine();
    let outline = engine.category_outline();
    let names: Vec<_> = outline.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "All Videos",
            "Education",
            "Programming",
            "Entertainment",
            "Lifestyle",
            "Technology"
        ]
    );
    let programming = outline.iter().find(|row| row.name == "Programming").unwrap();
    assert_eq!(programming.depth, 2);
    assert_eq!(programming.direct_videos, 1);
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_matches_title_case_insensitively() {
    let engine = seeded_engine();
    let found: Vec<_> = engine.search("HIGHLIGHTS").iter().map(|v| v.title.clone()).collect();
    assert_eq!(found, vec!["Sports Highlights", "Gaming Highlights"]);
}

#[test]
fn test_search_matches_category_segments() {
    let engine = seeded_engine();
    let found: Vec<_> = engine.search("programming").iter().map(|v| v.title.clone()).collect();
    assert_eq!(found, vec![PYTHON_TUTORIAL]);
}

#[test]
fn test_blank_search_returns_everything_published() {
    let engine = seeded_engine();
    assert_eq!(engine.search("  ").len(), 11);
    assert!(engine.search("no such video").is_empty());
}
