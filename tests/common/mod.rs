//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use serde_json::{Value, json};
use tempfile::TempDir;

/// One card of a `cards-config.json`
pub struct CardBuilder {
    value: Value,
}

impl CardBuilder {
    /// A valid card with the required fields filled in
    pub fn new(title: &str) -> Self {
        let slug = title.to_lowercase().replace(' ', "-");
        Self {
            value: json!({
                "title": title,
                "description": format!("{} documentation", title),
                "url": format!("https://docs.example.com/{}", slug),
                "status": "active",
            }),
        }
    }

    pub fn field(mut self, name: &str, value: Value) -> Self {
        self.value[name] = value;
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        if let Some(obj) = self.value.as_object_mut() {
            obj.remove(name);
        }
        self
    }

    pub fn category(self, category: &str) -> Self {
        self.field("category", json!(category))
    }

    pub fn updated(self, last_updated: &str) -> Self {
        self.field("lastUpdated", json!(last_updated))
    }

    pub fn models(self, models: u32) -> Self {
        self.field("models", json!(models))
    }

    pub fn priority(self, priority: i64) -> Self {
        self.field("priority", json!(priority))
    }

    pub fn to_value(&self) -> Value {
        self.value.clone()
    }
}

/// Temp directory holding a cards file and a data directory
pub struct PortalFixture {
    temp_dir: TempDir,
}

impl PortalFixture {
    pub fn new() -> Self {
        Self { temp_dir: TempDir::new().expect("Failed to create temp dir") }
    }

    pub fn with_cards(self, cards: &[CardBuilder]) -> Self {
        let doc = Value::Array(cards.iter().map(CardBuilder::to_value).collect());
        self.with_raw_cards(&doc.to_string())
    }

    pub fn with_raw_cards(self, content: &str) -> Self {
        fs::write(self.cards_path(), content).expect("Failed to write cards-config.json");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn cards_path(&self) -> PathBuf {
        self.temp_dir.path().join("cards-config.json")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.temp_dir.path().join("data")
    }
}

/// The four-card catalog used across tests
pub fn sample_cards() -> Vec<CardBuilder> {
    vec![
        CardBuilder::new("Sales Mart").updated("1h").models(40).priority(1),
        CardBuilder::new("Orders").updated("30h").models(12).priority(2),
        CardBuilder::new("Order History").category("archive").updated("2h").priority(3),
        CardBuilder::new("Customer Orders").updated("5h").models(8).priority(4),
    ]
}

/// Request seen by [`spawn_api_server`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub body: String,
}

/// Serve canned `(status, body)` responses, one per request, on an ephemeral port.
///
/// Returns the API base URL and a handle yielding the recorded requests once every
/// response has been sent.
pub fn spawn_api_server(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<RecordedRequest>>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("Failed to start test server");
    let port = server.server_addr().to_ip().expect("Test server has no IP address").port();

    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for (status, body) in responses {
            let mut request = match server.recv() {
                Ok(request) => request,
                Err(_) => break,
            };

            let mut request_body = String::new();
            let _ = request.as_reader().read_to_string(&mut request_body);
            seen.push(RecordedRequest {
                method: request.method().to_string(),
                url: request.url().to_string(),
                body: request_body,
            });

            let header = tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                .expect("valid header");
            let response = tiny_http::Response::from_string(body).with_status_code(status).with_header(header);
            let _ = request.respond(response);
        }
        seen
    });

    (format!("http://127.0.0.1:{}/api", port), handle)
}
