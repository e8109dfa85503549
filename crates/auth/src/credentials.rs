//! Secure API credential management.
//!
//! Uses the `secrecy` crate to prevent accidental logging of the private key
//! and ensures memory is zeroed on drop.

use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};

/// Environment variable holding the public key.
pub const PUBLIC_KEY_ENV: &str = "FUTUUR_PUBLIC_KEY";
/// Environment variable holding the private key.
pub const PRIVATE_KEY_ENV: &str = "FUTUUR_PRIVATE_KEY";

/// API credentials for authenticated requests.
///
/// The public key is sent with every request; the private key only ever
/// feeds the HMAC. Both are validated non-empty at construction, so a
/// `Credentials` value can always sign.
#[derive(Clone)]
pub struct Credentials {
    public_key: String,
    secret_key: SecretString,
}

impl Credentials {
    /// Load credentials from environment variables.
    ///
    /// Looks for:
    /// - `FUTUUR_PUBLIC_KEY` - The public key identifier
    /// - `FUTUUR_PRIVATE_KEY` - The signing key (never transmitted)
    ///
    /// # Errors
    /// Returns `AuthError::MissingEnvVar` if either variable is not set and
    /// `AuthError::Configuration` if either is empty.
    pub fn from_env() -> Result<Self, AuthError> {
        // Load .env file if present (ignores errors if file doesn't exist)
        dotenvy::dotenv().ok();

        let public_key = std::env::var(PUBLIC_KEY_ENV)
            .map_err(|_| AuthError::MissingEnvVar(PUBLIC_KEY_ENV.into()))?;

        let secret_key = std::env::var(PRIVATE_KEY_ENV)
            .map_err(|_| AuthError::MissingEnvVar(PRIVATE_KEY_ENV.into()))?;

        Self::new(public_key, secret_key)
    }

    /// Create credentials from explicit values.
    ///
    /// # Errors
    /// Returns `AuthError::Configuration` if either key is empty or whitespace.
    pub fn new(public_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self, AuthError> {
        let public_key = public_key.into();
        let secret_key = secret_key.into();

        if public_key.trim().is_empty() {
            return Err(AuthError::Configuration("public key is empty".into()));
        }
        if secret_key.trim().is_empty() {
            return Err(AuthError::Configuration("private key is empty".into()));
        }

        Ok(Self {
            public_key,
            secret_key: SecretString::from(secret_key),
        })
    }

    /// Get the public key (safe to log).
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Expose the private key for signing.
    ///
    /// **WARNING**: Only use this for cryptographic operations.
    /// Never log or display the return value.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
