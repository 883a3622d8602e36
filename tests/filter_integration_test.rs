//! Integration tests for the search and category filters

use catalog_portal::catalog::sort_entries;
use catalog_portal::filters::apply::{filter_stats_label, search_stats_label};
use catalog_portal::filters::available_filters;
use catalog_portal::filters::suggestions::suggestions;
use catalog_portal::models::CatalogEntry;
use catalog_portal::{CategoryFilter, SearchState, evaluate, parse_cards, visible_entries};

fn catalog() -> Vec<CatalogEntry> {
    let json = r#"[
        {"title":"Orders","description":"Order fact models","url":"https://d/orders","status":"active","lastUpdated":"30h","priority":2},
        {"title":"Order History","description":"Archived order snapshots","url":"https://d/oh","status":"active","category":"archive","lastUpdated":"2h","priority":3},
        {"title":"Customer Orders","description":"Customer order rollups","url":"https://d/co","status":"active","lastUpdated":"5h","priority":4},
        {"title":"Sales Mart","description":"Revenue and sales models","url":"https://d/sales","status":"active","lastUpdated":"1h","priority":1}
    ]"#;
    let mut entries = parse_cards(json).unwrap().entries;
    sort_entries(&mut entries);
    entries
}

fn titles(entries: &[&CatalogEntry]) -> Vec<String> {
    entries.iter().map(|e| e.title.clone()).collect()
}

#[test]
fn test_empty_state_shows_everything_unhighlighted() {
    let entries = catalog();
    let decisions = evaluate(&entries, &SearchState::new());

    assert_eq!(decisions.len(), entries.len());
    assert!(decisions.iter().all(|d| d.visible && !d.highlighted));
}

#[test]
fn test_query_matches_first_word_prefix_only() {
    let entries = catalog();
    let state = SearchState::new().with_query("ORD");

    let visible = visible_entries(&entries, &state);
    assert_eq!(titles(&visible), vec!["Orders", "Order History"]);

    let decisions = evaluate(&entries, &state);
    for (entry, decision) in entries.iter().zip(&decisions) {
        assert_eq!(decision.visible, decision.highlighted, "{}", entry.title);
    }
    assert_eq!(search_stats_label(visible.len(), entries.len()), "2 of 4 projects");
}

#[test]
fn test_query_and_category_combine() {
    let entries = catalog();
    let state = SearchState::new().with_query("ord").with_category(CategoryFilter::Recent);

    assert_eq!(titles(&visible_entries(&entries, &state)), vec!["Order History"]);
}

#[test]
fn test_recent_window_is_24_hours() {
    let entries = catalog();
    let state = SearchState::new().with_category(CategoryFilter::parse("recent"));

    let visible = visible_entries(&entries, &state);
    assert_eq!(titles(&visible), vec!["Sales Mart", "Order History", "Customer Orders"]);
    assert_eq!(filter_stats_label(state.category(), visible.len()), "Recent: 3 projects");
}

#[test]
fn test_overflowing_age_is_not_recent() {
    let json = r#"[
        {"title":"Ancient","description":"d","url":"https://d/a","status":"active","lastUpdated":"99999999999h"},
        {"title":"Fresh","description":"d","url":"https://d/f","status":"active","lastUpdated":"3h"}
    ]"#;
    let mut entries = parse_cards(json).unwrap().entries;
    sort_entries(&mut entries);

    assert_eq!(entries[0].title, "Fresh");
    let state = SearchState::new().with_category(CategoryFilter::Recent);
    assert_eq!(titles(&visible_entries(&entries, &state)), vec!["Fresh"]);
}

#[test]
fn test_tag_category_is_exact_match() {
    let entries = catalog();
    let state = SearchState::new().with_category(CategoryFilter::parse("archive"));
    assert_eq!(titles(&visible_entries(&entries, &state)), vec!["Order History"]);

    let state = SearchState::new().with_category(CategoryFilter::parse("arch"));
    assert!(visible_entries(&entries, &state).is_empty());
}

#[test]
fn test_clear_restores_full_view() {
    let entries = catalog();
    let mut state = SearchState::new().with_query("sal").with_category(CategoryFilter::Recent);
    assert_eq!(visible_entries(&entries, &state).len(), 1);

    state.clear();
    assert_eq!(state, SearchState::new());
    assert_eq!(visible_entries(&entries, &state).len(), entries.len());
}

#[test]
fn test_evaluate_is_idempotent() {
    let entries = catalog();
    let state = SearchState::new().with_query("cus");
    assert_eq!(evaluate(&entries, &state), evaluate(&entries, &state));
}

#[test]
fn test_whitespace_query_is_empty() {
    let entries = catalog();
    let state = SearchState::new().with_query("   ");
    assert_eq!(state.query(), "");
    assert!(state.hint().is_none());
    assert_eq!(visible_entries(&entries, &state).len(), 4);
}

#[test]
fn test_single_character_query_still_filters() {
    let entries = catalog();
    let state = SearchState::new().with_query("o");

    assert!(state.hint().is_some());
    assert_eq!(titles(&visible_entries(&entries, &state)), vec!["Orders", "Order History"]);
}

#[test]
fn test_available_filters_from_catalog() {
    let filters = available_filters(&catalog());
    let keys: Vec<&str> = filters.iter().map(|f| f.key()).collect();
    assert_eq!(keys, vec!["all", "recent", "active", "archive"]);
}

#[test]
fn test_suggestions_from_titles_and_descriptions() {
    let found = suggestions(&catalog(), "or");
    assert_eq!(found.first().map(String::as_str), Some("Orders"));
    assert!(found.len() <= 5);
    assert!(found.iter().all(|w| w.to_lowercase().starts_with("or")));
}
