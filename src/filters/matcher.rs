//! Title matching for the portal search box.
//!
//! Only the first word of the title takes part: the query must be a case-insensitive
//! prefix of it. "ord" finds "Orders" and "Order History" but not "Customer Orders".

use crate::utils::first_word;

/// Longest query kept from user input
pub const MAX_QUERY_LEN: usize = 256;

/// Hint shown while the query is a single character
pub const SINGLE_CHAR_HINT: &str = "Type more characters to search project names";

/// Normalize raw search box input: trimmed and lower-cased
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Does `title` match the (already normalized) `query`?
///
/// An empty query matches every title.
pub fn matches_title(title: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let title = title.to_lowercase();
    first_word(&title).starts_with(query)
}

/// Hint for very short queries; the match rule itself does not change
pub fn search_hint(query: &str) -> Option<&'static str> {
    if query.chars().count() == 1 { Some(SINGLE_CHAR_HINT) } else { None }
}
