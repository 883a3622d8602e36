/// First whitespace-delimited word of `text`, or "" when there is none
pub fn first_word(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}

/// Upper-case the first character, leave the rest untouched
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turn a project identifier into a readable name: "sales_mart" → "sales mart"
pub fn humanize_identifier(name: &str) -> String {
    name.replace('_', " ")
}
