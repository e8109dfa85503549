use thiserror::Error;

/// Errors that can occur during authentication operations.
///
/// Every variant is raised before a request leaves the process.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// Credentials are missing or empty.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A parameter value has no stable textual form.
    #[error("Cannot encode parameter '{key}': {reason}")]
    Encoding {
        /// Name of the offending parameter.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The HMAC primitive rejected the key.
    #[error("Invalid API key format")]
    InvalidKeyFormat,
}

impl AuthError {
    pub(crate) fn encoding(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Encoding {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error stems from bad configuration rather than bad input.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AuthError::Configuration(_) | AuthError::MissingEnvVar(_) | AuthError::InvalidKeyFormat
        )
    }
}
