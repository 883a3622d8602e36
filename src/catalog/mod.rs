//! Card store: loading, ordering and change polling for `cards-config.json`
//!
//! # Error Handling Strategy
//!
//! - **Initial load**: a missing or malformed document is logged and the portal starts with
//!   an empty grid; the regular poll picks the file up once it appears.
//! - **Polling**: fetch or parse failures while polling are logged at debug level and the
//!   current cards stay on screen.

pub mod loader;
pub mod order;
pub mod stats;
pub mod store;

pub use loader::{CardSource, load_cards, spawn_refresh};
pub use order::sort_entries;
pub use stats::{CatalogStats, summarize};
pub use store::{CardStore, POLL_INTERVAL};
