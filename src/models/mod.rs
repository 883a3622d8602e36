//! Data models for the catalog portal.
//!
//! - [`CardConfig`] - Raw card as written in `cards-config.json`
//! - [`CatalogEntry`] - Validated card shown in the portal grid
//! - [`ChatMessage`] / [`ChatRequest`] / [`ChatResponse`] - Chat API payloads
//! - [`ProjectSummary`] - Project listing returned by the API
//!
//! Wire names follow the JSON the portal backend and the static config use
//! (`lastUpdated`, `project_name`, ...), so the serde attributes matter.

pub mod card;
pub mod chat;
pub mod project;

pub use card::{CardConfig, CardError, CatalogEntry};
pub use chat::{ChatMessage, ChatRequest, ChatResponse, Role};
pub use project::{ProjectSummary, ProjectsResponse};
