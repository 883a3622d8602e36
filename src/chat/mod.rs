//! Chat client: API access, session state and reply formatting
//!
//! # Error Handling Strategy
//!
//! Both failure kinds of [`ApiError`] are recovered where the request was made: the error is
//! logged, one transient notification is shown, and the session goes back to Ready with its
//! history untouched. Nothing here is fatal.

pub mod client;
pub mod direction;
pub mod error;
pub mod format;
pub mod recent;
pub mod session;

use std::sync::Arc;
use std::thread;

pub use client::{HttpPortalClient, PortalApi};
pub use direction::{TextDirection, detect_direction};
pub use error::ApiError;
pub use format::{Block, Inline, format_reply, to_plain_text};
pub use recent::RecentProjects;
pub use session::{ChatSession, ChatState};

use crate::models::{ChatRequest, ProjectSummary};

/// Send `request` on a worker thread and hand the outcome to `on_done`
pub fn spawn_chat<F>(api: Arc<dyn PortalApi>, request: ChatRequest, on_done: F)
where
    F: FnOnce(Result<String, ApiError>) + Send + 'static,
{
    thread::spawn(move || on_done(api.send_chat(&request)));
}

/// Fetch the project list on a worker thread
pub fn spawn_project_listing<F>(api: Arc<dyn PortalApi>, on_done: F)
where
    F: FnOnce(Result<Vec<ProjectSummary>, ApiError>) + Send + 'static,
{
    thread::spawn(move || on_done(api.list_projects()));
}
