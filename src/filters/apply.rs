use super::category::CategoryFilter;
use super::matcher::{MAX_QUERY_LEN, matches_title, normalize_query, search_hint};
use crate::models::CatalogEntry;

/// Current query and category facet. Lives for the session only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    category: CategoryFilter,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, raw: &str) -> Self {
        self.set_query(raw);
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Store the normalized form of `raw`, capped at [`MAX_QUERY_LEN`] characters
    pub fn set_query(&mut self, raw: &str) {
        let mut query = normalize_query(raw);
        if let Some((idx, _)) = query.char_indices().nth(MAX_QUERY_LEN) {
            query.truncate(idx);
        }
        self.query = query;
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn hint(&self) -> Option<&'static str> {
        search_hint(&self.query)
    }

    /// Empty the query and go back to the "all" facet
    pub fn clear(&mut self) {
        self.query.clear();
        self.category = CategoryFilter::All;
    }
}

/// Display decision for one entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardVisibility {
    pub visible: bool,
    pub highlighted: bool,
}

/// Decide visibility and highlight for every entry, in input order.
///
/// Always recomputed from the full entry set; calling it twice with the same
/// state gives the same answer.
pub fn evaluate(entries: &[CatalogEntry], state: &SearchState) -> Vec<CardVisibility> {
    entries
        .iter()
        .map(|entry| {
            let visible =
                matches_title(&entry.title, state.query()) && state.category().matches(entry);
            CardVisibility { visible, highlighted: visible && !state.query().is_empty() }
        })
        .collect()
}

/// The entries `evaluate` marks visible, in input order
pub fn visible_entries<'a>(entries: &'a [CatalogEntry], state: &SearchState) -> Vec<&'a CatalogEntry> {
    entries
        .iter()
        .zip(evaluate(entries, state))
        .filter_map(|(entry, vis)| vis.visible.then_some(entry))
        .collect()
}

/// True when a search is active but nothing matched (show the empty-state panel)
pub fn is_no_match(state: &SearchState, visible_count: usize) -> bool {
    !state.query().is_empty() && visible_count == 0
}

/// "3 of 12 projects"
pub fn search_stats_label(visible: usize, total: usize) -> String {
    format!("{} of {} projects", visible, total)
}

/// "Recent: 3 projects"
pub fn filter_stats_label(category: &CategoryFilter, visible: usize) -> String {
    format!("{}: {} projects", category.label(), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, category: &str, hours: u32) -> CatalogEntry {
        CatalogEntry {
            title: title.to_string(),
            description: format!("{} description", title),
            url: format!("https://docs.example.com/{}", title.to_lowercase().replace(' ', "-")),
            category: category.to_string(),
            status: "active".to_string(),
            last_updated: format!("{}h", hours),
            last_updated_hours: hours,
            model_count: 1,
            icon: "📊".to_string(),
            priority: 0,
        }
    }

    fn titles(entries: Vec<&CatalogEntry>) -> Vec<&str> {
        entries.into_iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_empty_state_shows_everything_unhighlighted() {
        let entries = vec![entry("Orders", "active", 1), entry("Sales Mart", "archived", 40)];
        let result = evaluate(&entries, &SearchState::new());
        assert!(result.iter().all(|v| v.visible && !v.highlighted));
    }

    #[test]
    fn test_query_highlights_visible_only() {
        let entries = vec![entry("Orders", "active", 1), entry("Customer Orders", "active", 1)];
        let state = SearchState::new().with_query("ord");
        let result = evaluate(&entries, &state);
        assert_eq!(result[0], CardVisibility { visible: true, highlighted: true });
        assert_eq!(result[1], CardVisibility { visible: false, highlighted: false });
    }

    #[test]
    fn test_query_and_category_combine() {
        let entries = vec![
            entry("Orders", "active", 1),
            entry("Order History", "archived", 1),
            entry("Sales", "active", 1),
        ];
        let state =
            SearchState::new().with_query("ORD ").with_category(CategoryFilter::parse("active"));
        assert_eq!(titles(visible_entries(&entries, &state)), vec!["Orders"]);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let entries = vec![entry("Orders", "active", 1), entry("Sales", "active", 50)];
        let state = SearchState::new().with_query("s").with_category(CategoryFilter::Recent);
        assert_eq!(evaluate(&entries, &state), evaluate(&entries, &state));
    }

    #[test]
    fn test_clear_resets_category() {
        let mut state = SearchState::new().with_query("ord").with_category(CategoryFilter::Recent);
        state.clear();
        assert_eq!(state.query(), "");
        assert_eq!(state.category(), &CategoryFilter::All);
    }

    #[test]
    fn test_query_length_cap() {
        let mut state = SearchState::new();
        state.set_query(&"a".repeat(MAX_QUERY_LEN + 10));
        assert_eq!(state.query().chars().count(), MAX_QUERY_LEN);
    }

    #[test]
    fn test_hint_for_single_char() {
        assert!(SearchState::new().with_query("s").hint().is_some());
        assert!(SearchState::new().with_query("sa").hint().is_none());
    }

    #[test]
    fn test_no_match_detection() {
        let state = SearchState::new().with_query("zzz");
        assert!(is_no_match(&state, 0));
        assert!(!is_no_match(&state, 1));
        assert!(!is_no_match(&SearchState::new(), 0));
    }

    #[test]
    fn test_stats_labels() {
        assert_eq!(search_stats_label(3, 12), "3 of 12 projects");
        assert_eq!(filter_stats_label(&CategoryFilter::All, 12), "All: 12 projects");
        assert_eq!(
            filter_stats_label(&CategoryFilter::Tag("archived".to_string()), 2),
            "Archived: 2 projects"
        );
    }
}
