//! Request/response interception.
//!
//! A middleware sees every request after its parameters are final and
//! before it is sent, and observes the outcome afterwards. It may rewrite
//! the request or refuse it; it cannot alter the response.

use crate::error::{BoxError, RestError};
use crate::request::RequestDescriptor;
use reqwest::StatusCode;

/// Hook pair wrapped around every call made by [`RestClient`](crate::RestClient).
///
/// Hooks run synchronously and must not block.
pub trait Middleware: Send + Sync {
    /// Rewrite or refuse an outgoing request.
    ///
    /// Returning an error aborts the call before any bytes are sent; the
    /// caller receives it as [`RestError::Middleware`].
    fn on_request(&self, request: RequestDescriptor) -> Result<RequestDescriptor, BoxError> {
        Ok(request)
    }

    /// Observe a response that arrived, whatever its status.
    fn on_response(&self, _request: &RequestDescriptor, _status: StatusCode) {}

    /// Observe a failed call. The error is returned to the caller unchanged.
    fn on_error(&self, _request: &RequestDescriptor, _error: &RestError) {}
}

/// Logs every failed call with the request that caused it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailureLogger;

impl Middleware for FailureLogger {
    fn on_error(&self, request: &RequestDescriptor, error: &RestError) {
        tracing::error!(
            method = %request.method,
            path = %request.path,
            query = ?request.query,
            body = ?request.body,
            status = ?error.status(),
            response = error.response_body().unwrap_or_default(),
            error = %error,
            "Request failed"
        );
    }
}
