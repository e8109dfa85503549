//! HMAC-SHA512 request signing.

use crate::canonical::{canonicalize, AuthMeta, Params};
use crate::credentials::Credentials;
use crate::error::AuthError;
use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the public key.
pub const HEADER_KEY: &str = "Key";
/// Header carrying the signing timestamp in epoch seconds.
pub const HEADER_TIMESTAMP: &str = "Timestamp";
/// Header carrying the hex HMAC-SHA512 digest.
///
/// Over HTTP/1 the transport title-cases header names, so this goes out on
/// the wire as `Hmac`. Header names are case-insensitive.
pub const HEADER_HMAC: &str = "HMAC";

/// Compute the lowercase hex HMAC-SHA512 of `message` keyed by `secret_key`.
///
/// The output is always 128 characters.
///
/// # Errors
/// Returns `AuthError::Configuration` if the key is empty.
pub fn sign_message(message: &str, secret_key: &str) -> Result<String, AuthError> {
    let mut mac = new_mac(secret_key)?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check a hex signature against `message` in constant time.
///
/// Malformed hex is reported as a mismatch.
///
/// # Errors
/// Returns `AuthError::Configuration` if the key is empty.
pub fn verify_message(message: &str, secret_key: &str, signature: &str) -> Result<bool, AuthError> {
    let Ok(expected) = hex::decode(signature) else {
        return Ok(false);
    };

    let mut mac = new_mac(secret_key)?;
    mac.update(message.as_bytes());
    Ok(mac.verify_slice(&expected).is_ok())
}

fn new_mac(secret_key: &str) -> Result<HmacSha512, AuthError> {
    if secret_key.is_empty() {
        return Err(AuthError::Configuration("private key is empty".into()));
    }
    HmacSha512::new_from_slice(secret_key.as_bytes()).map_err(|_| AuthError::InvalidKeyFormat)
}

/// Credentials produced for one outgoing request.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Public key, sent as `Key`.
    pub key: String,
    /// Epoch seconds included in the signed parameters, sent as `Timestamp`.
    pub timestamp: i64,
    /// Hex digest, sent as `HMAC`.
    pub hmac: String,
    /// The exact string that was signed.
    pub canonical: String,
}

impl SignedHeaders {
    /// Header name/value pairs in the order they are attached.
    pub fn to_pairs(&self) -> [(&'static str, String); 3] {
        [
            (HEADER_KEY, self.key.clone()),
            (HEADER_TIMESTAMP, self.timestamp.to_string()),
            (HEADER_HMAC, self.hmac.clone()),
        ]
    }
}

impl std::fmt::Debug for SignedHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedHeaders")
            .field("key", &self.key)
            .field("timestamp", &self.timestamp)
            .field("canonical", &self.canonical)
            .finish_non_exhaustive()
    }
}

/// Request signer for authenticated Futuur API calls.
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with the given credentials.
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    /// Sign a message and return the hex-encoded signature.
    pub fn sign(&self, message: &str) -> Result<String, AuthError> {
        sign_message(message, self.credentials.expose_secret())
    }

    /// Sign a request's parameters at `timestamp`.
    ///
    /// The public key and timestamp are merged ahead of `query` and `body`
    /// for signing only; the caller's maps are not touched.
    ///
    /// # Errors
    /// Returns `AuthError::Encoding` for values without a stable textual form.
    pub fn sign_params(
        &self,
        query: Option<&Params>,
        body: Option<&Params>,
        timestamp: i64,
    ) -> Result<SignedHeaders, AuthError> {
        let meta = AuthMeta {
            public_key: self.credentials.public_key(),
            timestamp,
        };
        let canonical = canonicalize(&meta, query, body)?;
        let hmac = self.sign(&canonical)?;

        Ok(SignedHeaders {
            key: meta.public_key.to_owned(),
            timestamp,
            hmac,
            canonical,
        })
    }
}
