use crate::models::CatalogEntry;

const MIN_QUERY_CHARS: usize = 2;
const MIN_WORD_CHARS: usize = 3;
pub const MAX_SUGGESTIONS: usize = 5;

/// Words from titles and descriptions that start with `query`.
///
/// Needs at least two query characters. Words must be longer than two characters; each
/// distinct word is kept once, in the order first seen, up to [`MAX_SUGGESTIONS`].
pub fn suggestions(entries: &[CatalogEntry], query: &str) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let mut found: Vec<String> = Vec::new();
    let words = entries
        .iter()
        .flat_map(|e| e.title.split_whitespace().chain(e.description.split_whitespace()));

    for word in words {
        if word.chars().count() >= MIN_WORD_CHARS
            && word.to_lowercase().starts_with(&query)
            && !found.iter().any(|w| w == word)
        {
            found.push(word.to_string());
            if found.len() == MAX_SUGGESTIONS {
                break;
            }
        }
    }

    found
}
