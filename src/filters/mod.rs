//! Search and filter engine for the card grid.
//!
//! Everything here is a pure function of the entry list and a [`SearchState`]; the TUI and
//! the CLI only render the decisions.

pub mod apply;
pub mod category;
pub mod debounce;
pub mod export;
pub mod matcher;
pub mod suggestions;

pub use apply::{CardVisibility, SearchState, evaluate, is_no_match, visible_entries};
pub use category::{CategoryFilter, available_filters};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use matcher::{matches_title, normalize_query};
