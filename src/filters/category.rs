use std::fmt;

use crate::models::CatalogEntry;
use crate::utils::capitalize_first;

/// Entries updated within this many hours count as "recently updated"
pub const RECENT_WINDOW_HOURS: u32 = 24;

/// Category facet applied on top of the text query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Derived facet: updated within [`RECENT_WINDOW_HOURS`]
    Recent,
    /// Exact tag equality against the entry's category
    Tag(String),
}

impl CategoryFilter {
    /// Parse the facet names used by the portal ("all", "recent", or a tag)
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Self::All
        } else if value.eq_ignore_ascii_case("recent") {
            Self::Recent
        } else {
            Self::Tag(value.to_string())
        }
    }

    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            Self::All => true,
            Self::Recent => entry.last_updated_hours <= RECENT_WINDOW_HOURS,
            Self::Tag(tag) => entry.category == *tag,
        }
    }

    /// Facet key as used on the wire and on the command line
    pub fn key(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Recent => "recent",
            Self::Tag(tag) => tag,
        }
    }

    /// Label for the filter stats line: "All", "Recent", "Archived"
    pub fn label(&self) -> String {
        match self {
            Self::All => "All".to_string(),
            other => capitalize_first(other.key()),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Facets offered in the UI: "all", "recent", then every distinct category in first-seen order
pub fn available_filters(entries: &[CatalogEntry]) -> Vec<CategoryFilter> {
    let mut filters = vec![CategoryFilter::All, CategoryFilter::Recent];
    for entry in entries {
        let filter = CategoryFilter::Tag(entry.category.clone());
        if !filters.contains(&filter) {
            filters.push(filter);
        }
    }
    filters
}
