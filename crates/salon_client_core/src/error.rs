//! Error taxonomy shared by the client, services and screen controllers.

use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// 401 that survived one refresh-and-retry. The session is gone; the UI should log out.
    #[error("Session expired, please sign in again")]
    Unauthorized,

    /// 4xx carrying a `detail` message, surfaced verbatim.
    #[error("{detail}")]
    Validation { status: u16, detail: String },

    #[error("{0}")]
    NotFound(String),

    /// No response at all (connection refused, timeout, DNS).
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Response arrived but did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Rejected client-side before any request was sent.
    #[error("{0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// What the user was doing when an error happened; picks the generic fallback text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Load,
    Save,
    Delete,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Text for a toast or an error state. Messages the server or the validators wrote for the
    /// user pass through unchanged; transport failures collapse into a generic sentence.
    pub fn user_message(&self, action: Action) -> String {
        match self {
            ApiError::Validation { detail, .. } => detail.clone(),
            ApiError::NotFound(msg) | ApiError::InvalidInput(msg) => msg.clone(),
            ApiError::Unauthorized => self.to_string(),
            ApiError::Network(_)
            | ApiError::Server { .. }
            | ApiError::Decode(_)
            | ApiError::Config(_)
            | ApiError::Storage(_) => match action {
                Action::Load => "Failed to load data".to_string(),
                Action::Save => "Failed to save changes".to_string(),
                Action::Delete => "Failed to delete".to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(e: rusqlite::Error) -> Self {
        ApiError::Storage(e.to_string())
    }
}

/// Uniform `{success, data | error}` shape handed to UI bindings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn from_result(result: ApiResult<T>, action: Action) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                error: None,
            },
            Err(e) => Self {
                success: false,
                data: None,
                error: Some(e.user_message(action)),
            },
        }
    }
}
