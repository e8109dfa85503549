//! REST client error types.

use thiserror::Error;

/// Boxed error returned by a middleware that refuses a request.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during REST API calls.
#[derive(Debug, Error)]
pub enum RestError {
    /// HTTP error with status code and message.
    #[error("HTTP error: {status} - {message}")]
    HttpError {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        message: String,
    },

    /// Request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Connection error (network issue).
    #[error("Connection error: {0}")]
    Connection(String),

    /// Failed to parse response body as JSON.
    #[error("JSON parse error: {0}")]
    Parse(String),

    /// Failed to build the HTTP request.
    #[error("Request build error: {0}")]
    RequestBuild(String),

    /// A middleware refused the request before it was sent.
    #[error("Request rejected before send: {0}")]
    Middleware(#[source] BoxError),
}

impl RestError {
    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            RestError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body attached to an HTTP error.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            RestError::HttpError { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Check if the request never left the process.
    pub fn is_pre_send(&self) -> bool {
        matches!(self, RestError::Middleware(_) | RestError::RequestBuild(_))
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RestError::Timeout
        } else if err.is_connect() {
            RestError::Connection(err.to_string())
        } else if err.is_decode() {
            RestError::Parse(err.to_string())
        } else if err.is_builder() {
            RestError::RequestBuild(err.to_string())
        } else if let Some(status) = err.status() {
            RestError::HttpError {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            RestError::Connection(err.to_string())
        }
    }
}
