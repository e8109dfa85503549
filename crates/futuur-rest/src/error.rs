//! Futuur client error types.

use auth::AuthError;
use rest_client::RestError;
use thiserror::Error;

/// Errors that can occur when interacting with the Futuur REST API.
#[derive(Debug, Error)]
pub enum FutuurError {
    /// Signing failed: bad credentials or an unencodable parameter.
    /// Nothing was sent.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// REST client error (network, timeout, non-2xx status, etc.).
    #[error("REST client error: {0}")]
    Rest(#[source] RestError),
}

impl FutuurError {
    /// Check if the failure happened on the wire rather than while building the request.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Rest(err) if !err.is_pre_send())
    }

    /// HTTP status returned by the server, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rest(err) => err.status(),
            Self::Auth(_) => None,
        }
    }
}

impl From<RestError> for FutuurError {
    // Signing errors travel through the middleware chain boxed; unwrap them
    // so callers can match on `AuthError` directly.
    fn from(err: RestError) -> Self {
        match err {
            RestError::Middleware(source) => match source.downcast::<AuthError>() {
                Ok(auth) => Self::Auth(*auth),
                Err(source) => Self::Rest(RestError::Middleware(source)),
            },
            other => Self::Rest(other),
        }
    }
}
