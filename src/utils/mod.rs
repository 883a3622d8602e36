pub mod sanitize;
pub mod text;

pub use sanitize::{sanitize_inline, strip_ansi_codes};
pub use text::{capitalize_first, first_word, humanize_identifier};
