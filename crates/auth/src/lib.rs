//! Authentication and signing for the Futuur API.
//!
//! This crate provides secure credential management and request signing
//! for authenticated API calls.
//!
//! # Features
//!
//! - **Secure Credentials**: The private key is wrapped in `SecretString` to prevent
//!   accidental logging and ensure memory is zeroed on drop.
//! - **Canonical Strings**: Deterministic `k=v&k=v` serialization of the merged
//!   request parameters, sorted and percent-encoded.
//! - **HMAC-SHA512 Signing**: Hex digest of the canonical string, sent alongside
//!   the public key and timestamp as request headers.
//!
//! Nothing here touches the network; the HTTP side lives in `futuur-rest`.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{Clock, Credentials, RequestSigner, SystemClock};
//!
//! let credentials = Credentials::from_env()?;
//! let signer = RequestSigner::new(&credentials);
//!
//! let query = serde_json::json!({"limit": 5, "offset": 0});
//! let signed = signer.sign_params(query.as_object(), None, SystemClock.now_secs())?;
//! for (name, value) in signed.to_pairs() {
//!     println!("{name}: {value}");
//! }
//! ```

pub mod canonical;
mod clock;
mod credentials;
mod error;
mod signer;

pub use canonical::{
    canonical_string, canonicalize, encode_component, merge_params, scalar_text, AuthMeta, Params,
    COMPONENT_ENCODE_SET,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::{Credentials, PRIVATE_KEY_ENV, PUBLIC_KEY_ENV};
pub use error::AuthError;
pub use signer::{
    sign_message, verify_message, RequestSigner, SignedHeaders, HEADER_HMAC, HEADER_KEY,
    HEADER_TIMESTAMP,
};
