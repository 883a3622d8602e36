//! Chat session state machine.
//!
//! ```text
//!   Idle --select_project--> Ready --submit--> Sending --complete--> Ready
//! ```
//!
//! `submit` hands back the request to send instead of sending it, so the caller decides
//! where the network call runs and the session stays a plain value that tests can drive.

use std::time::Instant;

use tracing::{info, warn};

use super::error::ApiError;
use crate::models::{ChatMessage, ChatRequest};
use crate::notification::{Notification, NotificationSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    /// No project selected; input disabled
    Idle,
    /// Project selected; input enabled
    Ready,
    /// Waiting for the reply; loading indicator shown
    Sending,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    project: Option<String>,
    history: Vec<ChatMessage>,
    /// User message in flight
    pending: Option<String>,
    sending: bool,
    error: NotificationSlot,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ChatState {
        if self.sending {
            ChatState::Sending
        } else if self.project.is_some() {
            ChatState::Ready
        } else {
            ChatState::Idle
        }
    }

    pub fn input_enabled(&self) -> bool {
        self.state() == ChatState::Ready
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn error(&self) -> Option<&Notification> {
        self.error.current()
    }

    /// Select the project to talk about. An empty name deselects.
    ///
    /// Ignored while a message is in flight; returns whether the selection changed.
    pub fn select_project(&mut self, name: &str) -> bool {
        if self.sending {
            warn!("Ignoring project change while a message is in flight");
            return false;
        }

        let name = name.trim();
        let next = if name.is_empty() { None } else { Some(name.to_string()) };
        if next == self.project {
            return false;
        }

        info!("Chat project: {}", next.as_deref().unwrap_or("<none>"));
        self.project = next;
        true
    }

    /// Start sending `text`.
    ///
    /// Returns `None` without touching any state unless the session is Ready and `text`
    /// has non-whitespace content.
    pub fn submit(&mut self, text: &str) -> Option<ChatRequest> {
        let message = text.trim();
        if message.is_empty() || self.state() != ChatState::Ready {
            return None;
        }
        let project_name = self.project.clone()?;

        self.sending = true;
        self.pending = Some(message.to_string());

        Some(ChatRequest {
            project_name,
            message: message.to_string(),
            conversation_history: self.history.clone(),
        })
    }

    /// Finish the in-flight request.
    ///
    /// On success the user message and the reply are appended, in that order. On failure
    /// one error notification is shown and the history is left alone.
    pub fn complete(&mut self, result: Result<String, ApiError>, now: Instant) {
        if !self.sending {
            warn!("Dropping chat completion with no request in flight");
            return;
        }
        self.sending = false;
        let message = self.pending.take().unwrap_or_default();

        match result {
            Ok(reply) => {
                self.history.push(ChatMessage::user(message));
                self.history.push(ChatMessage::assistant(reply));
            }
            Err(e) => {
                warn!("Chat request failed: {}", e);
                self.error.show(Notification::error(e.chat_message(), now));
            }
        }
    }

    /// Show an error that did not come from a chat request (e.g. project listing)
    pub fn show_error(&mut self, text: impl Into<String>, now: Instant) {
        self.error.show(Notification::error(text, now));
    }

    pub fn dismiss_error(&mut self) -> bool {
        self.error.dismiss()
    }

    /// Drop an expired error notification; true if one was removed
    pub fn expire_error(&mut self, now: Instant) -> bool {
        self.error.expire(now)
    }

    /// Start a new conversation; the selected project stays
    pub fn reset(&mut self) {
        self.history.clear();
        self.error.dismiss();
    }
}
