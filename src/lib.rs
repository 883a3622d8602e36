//! Catalog Portal - browse a dbt documentation portal and chat about its projects
//!
//! This library provides the pieces behind the `catalog-portal` terminal client:
//!
//! - Loading and validating the portal's `cards-config.json` (file or URL)
//! - Ordering cards and polling the configuration for changes
//! - First-word prefix search, category facets, suggestions and JSON export
//! - A chat session state machine over the portal's `/api/projects` and `/api/chat`
//! - Light formatting of assistant replies (code blocks, lists, headers)
//! - Remembering recently used chat projects
//!
//! # Example
//!
//! ```no_run
//! use catalog_portal::{CardSource, SearchState, load_cards, visible_entries};
//!
//! let source = CardSource::parse("./static/cards-config.json");
//! let parsed = load_cards(&source)?;
//! let state = SearchState::new().with_query("sales");
//! for entry in visible_entries(&parsed.entries, &state) {
//!     println!("{} → {}", entry.title, entry.url);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod catalog;
pub mod chat;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod filters;
pub mod logging;
pub mod models;
pub mod notification;
pub mod opener;
pub mod parsers;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use catalog::{CardSource, CardStore, load_cards};
pub use chat::{ChatSession, HttpPortalClient, PortalApi, format_reply};
pub use filters::{CategoryFilter, SearchState, evaluate, visible_entries};
pub use models::{CatalogEntry, ChatMessage, ProjectSummary};
pub use parsers::parse_cards;
