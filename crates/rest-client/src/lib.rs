//! Generic REST client infrastructure.
//!
//! This crate provides a thin wrapper around `reqwest` with:
//!
//! - Consistent error handling via `RestError`
//! - A transport-independent `RequestDescriptor`
//! - `Middleware` hooks around every call (rewrite before send, observe after)
//! - JSON response deserialization
//!
//! There is no retry, backoff or rate limiting; failures go straight back
//! to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_client::{FailureLogger, RequestDescriptor, RestClient};
//!
//! let client = RestClient::with_default_timeout("https://api.futuur.com/api/v1")?
//!     .with_middleware(FailureLogger);
//! let me: serde_json::Value = client.execute(RequestDescriptor::get("/me")).await?;
//! ```

mod client;
mod error;
mod middleware;
mod query;
mod request;

pub use client::RestClient;
pub use error::{BoxError, RestError};
pub use middleware::{FailureLogger, Middleware};
pub use query::encode_query;
pub use request::{RequestBody, RequestDescriptor};
pub use reqwest::{Method, StatusCode};
