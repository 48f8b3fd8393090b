use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error body shape the backend uses for non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AppError {
    /// Maps a non-success status plus its raw body onto the error taxonomy.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string()
            });

        match status {
            StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
            StatusCode::FORBIDDEN => AppError::Forbidden(message),
            StatusCode::NOT_FOUND => AppError::NotFound,
            StatusCode::CONFLICT => AppError::Conflict(message),
            s if s.is_client_error() => AppError::BadRequest(message),
            s => AppError::Server {
                status: s.as_u16(),
                message,
            },
        }
    }

    /// The string a page shows in its alert or error banner.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            AppError::Timeout => "The server took too long to respond.".to_string(),
            AppError::Unauthorized(_) => {
                "Your session is invalid or the credentials are wrong. Please log in again."
                    .to_string()
            }
            AppError::Forbidden(_) => "You do not have permission to do that.".to_string(),
            AppError::NotFound => "The requested item does not exist.".to_string(),
            AppError::BadRequest(msg) => format!("The request was rejected: {}", msg),
            AppError::Conflict(msg) => format!("Conflict: {}", msg),
            AppError::Server { status, .. } => {
                format!("The server failed to handle the request ({}).", status)
            }
            AppError::UnexpectedResponse(_) => {
                "The server returned a response this client does not understand.".to_string()
            }
            AppError::Validation(msg) => msg.clone(),
            AppError::Storage(_) | AppError::Json(_) => {
                "Local session data could not be read or written.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::Timeout
        } else if e.is_decode() {
            AppError::UnexpectedResponse(e.to_string())
        } else {
            AppError::Network(e.to_string())
        }
    }
}
