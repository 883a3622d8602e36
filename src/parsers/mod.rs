//! Parsers for the portal's static card configuration
//!
//! # Error Handling Strategy
//!
//! Card parsing follows a **graceful degradation** approach:
//!
//! - **Document-level failures**: Malformed JSON or a document that is not an array is an
//!   error. Callers log it and keep (or fall back to) an empty card set.
//!
//! - **Card-level failures**: A card that does not deserialize, or that lacks a title,
//!   description, url or status, is logged with `tracing::warn!` and skipped. One bad card
//!   never hides the others.

pub mod cards;
pub mod deserializers;

pub use cards::{ParsedCards, parse_cards};
