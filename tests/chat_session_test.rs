/// Chat session flow tests with an in-process fake API
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use catalog_portal::chat::{ApiError, ChatState, RecentProjects, spawn_chat};
use catalog_portal::models::{ChatRequest, ProjectSummary, Role};
use catalog_portal::notification::ERROR_TIMEOUT;
use catalog_portal::{ChatSession, PortalApi};
use tempfile::TempDir;

/// Replies with a canned result and remembers every request
struct FakeApi {
    reply: Result<String, ApiError>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl FakeApi {
    fn replying(reply: Result<String, ApiError>) -> Arc<Self> {
        Arc::new(Self { reply, requests: Mutex::new(Vec::new()) })
    }
}

impl PortalApi for FakeApi {
    fn list_projects(&self) -> Result<Vec<ProjectSummary>, ApiError> {
        Ok(Vec::new())
    }

    fn send_chat(&self, request: &ChatRequest) -> Result<String, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone()
    }
}

fn round_trip(session: &mut ChatSession, api: &Arc<FakeApi>, text: &str, now: Instant) {
    let request = session.submit(text).expect("session should accept the message");
    assert_eq!(session.state(), ChatState::Sending);

    let (tx, rx) = mpsc::channel();
    let api_dyn: Arc<dyn PortalApi> = api.clone();
    spawn_chat(api_dyn, request, move |result| {
        let _ = tx.send(result);
    });

    let result = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    session.complete(result, now);
}

#[test]
fn test_conversation_accumulates_history() {
    let api = FakeApi::replying(Ok("12 models".to_string()));
    let mut session = ChatSession::new();
    assert!(!session.input_enabled());

    session.select_project("sales_mart");
    let now = Instant::now();
    round_trip(&mut session, &api, "How many models?", now);
    round_trip(&mut session, &api, "  And tests?  ", now);

    assert_eq!(session.state(), ChatState::Ready);
    let roles: Vec<Role> = session.history().iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User, Role::Assistant]);
    assert_eq!(session.history()[2].content, "And tests?");

    let requests = api.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].conversation_history.is_empty());
    assert_eq!(requests[1].conversation_history.len(), 2);
    assert_eq!(requests[1].project_name, "sales_mart");
}

#[test]
fn test_failure_keeps_history_and_shows_one_error() {
    let ok = FakeApi::replying(Ok("hello".to_string()));
    let failing = FakeApi::replying(Err(ApiError::Transport("connection reset".to_string())));
    let mut session = ChatSession::new();
    session.select_project("sales_mart");

    let now = Instant::now();
    round_trip(&mut session, &ok, "hi", now);
    round_trip(&mut session, &failing, "again", now);

    assert_eq!(session.state(), ChatState::Ready);
    assert_eq!(session.history().len(), 2);
    assert!(session.pending().is_none());

    let error = session.error().unwrap();
    assert_eq!(error.text, "Error sending the message. Please try again.");

    assert!(!session.expire_error(now + ERROR_TIMEOUT - Duration::from_millis(1)));
    assert!(session.expire_error(now + ERROR_TIMEOUT));
    assert!(session.error().is_none());
}

#[test]
fn test_blank_and_projectless_messages_are_not_sent() {
    let mut session = ChatSession::new();
    assert!(session.submit("hello").is_none());

    session.select_project("sales_mart");
    assert!(session.submit("   ").is_none());
    assert_eq!(session.state(), ChatState::Ready);
    assert!(session.history().is_empty());
}

#[test]
fn test_recent_projects_persist_across_loads() {
    let dir = TempDir::new().unwrap();

    let mut recent = RecentProjects::load(dir.path());
    for name in ["a", "b", "c", "a"] {
        recent.record(name).unwrap();
    }

    let reloaded = RecentProjects::load(dir.path());
    assert_eq!(reloaded.items(), ["a", "c", "b"]);
}
