/// Failures talking to the portal API.
///
/// `Transport` covers everything that kept us from getting a well-formed reply (connection,
/// HTTP status, undecodable body). `Application` is an `error` field the server sent on
/// purpose.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("{0}")]
    Application(String),
}

impl ApiError {
    /// Message for the chat notification area
    pub fn chat_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "Error sending the message. Please try again.".to_string(),
            ApiError::Application(msg) => msg.clone(),
        }
    }

    /// Message for a failed project listing
    pub fn projects_message(&self) -> String {
        match self {
            ApiError::Transport(_) => {
                "Error loading projects. Make sure the server is running.".to_string()
            }
            ApiError::Application(msg) => msg.clone(),
        }
    }
}
