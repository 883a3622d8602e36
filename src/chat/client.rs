use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::error::ApiError;
use crate::models::{ChatRequest, ChatResponse, ProjectSummary, ProjectsResponse};

/// Chat replies come from a CLI run on the server and can take a while
const CHAT_TIMEOUT: Duration = Duration::from_secs(120);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// The two portal endpoints the client talks to.
///
/// Implementations are called from worker threads, never from the UI loop.
pub trait PortalApi: Send + Sync {
    /// `GET /api/projects`
    fn list_projects(&self) -> Result<Vec<ProjectSummary>, ApiError>;

    /// `POST /api/chat`, returning the assistant's reply text
    fn send_chat(&self, request: &ChatRequest) -> Result<String, ApiError>;
}

/// [`PortalApi`] over HTTP using reqwest's blocking client
pub struct HttpPortalClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HttpPortalClient {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(CHAT_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url: base_url.into().trim_end_matches('/').to_string(), http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Decode a portal response body.
///
/// The body is parsed even for error statuses because the backend reports failures as
/// `{"error": ...}` with a 4xx/5xx code.
fn decode_body<T: DeserializeOwned>(status: reqwest::StatusCode, body: &str) -> Result<T, ApiError> {
    match serde_json::from_str::<T>(body) {
        Ok(parsed) => Ok(parsed),
        Err(e) if status.is_success() => {
            Err(ApiError::Transport(format!("Malformed response body: {}", e)))
        }
        Err(_) => Err(ApiError::Transport(format!("Server returned HTTP {}", status))),
    }
}

fn read_response(
    response: reqwest::Result<reqwest::blocking::Response>,
) -> Result<(reqwest::StatusCode, String), ApiError> {
    let response = response.map_err(|e| {
        error!("API request error: {}", e);
        ApiError::Transport(e.to_string())
    })?;
    let status = response.status();
    let body = response.text().map_err(|e| ApiError::Transport(e.to_string()))?;
    Ok((status, body))
}

impl PortalApi for HttpPortalClient {
    fn list_projects(&self) -> Result<Vec<ProjectSummary>, ApiError> {
        let (status, body) = read_response(self.http.get(self.endpoint("projects")).send())?;
        let parsed: ProjectsResponse = decode_body(status, &body)?;

        if let Some(err) = parsed.error {
            error!("Project listing failed ({}): {}", status, err);
            return Err(ApiError::Application(err));
        }
        if !status.is_success() {
            return Err(ApiError::Transport(format!("Server returned HTTP {}", status)));
        }

        debug!("Loaded {} projects", parsed.projects.len());
        Ok(parsed.projects)
    }

    fn send_chat(&self, request: &ChatRequest) -> Result<String, ApiError> {
        debug!(
            "Sending chat message for {} ({} history entries)",
            request.project_name,
            request.conversation_history.len()
        );

        let (status, body) =
            read_response(self.http.post(self.endpoint("chat")).json(request).send())?;
        let parsed: ChatResponse = decode_body(status, &body)?;

        if let Some(err) = parsed.error {
            error!("Chat request failed ({}): {}", status, err);
            return Err(ApiError::Application(err));
        }
        if !status.is_success() {
            return Err(ApiError::Transport(format!("Server returned HTTP {}", status)));
        }

        parsed
            .response
            .ok_or_else(|| ApiError::Transport("Response is missing the `response` field".to_string()))
    }
}
