//! Transport-independent description of an outgoing request.

use crate::error::RestError;
use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON value, serialized once at send time.
    Json(Value),
    /// Pre-serialized text, sent byte-for-byte.
    Text(String),
}

/// A request as seen by middleware: method, path, parameters and headers.
///
/// Middleware receives the descriptor after the caller has finalized the
/// parameters and before anything is written to the socket.
#[derive(Clone)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the client's base URL, starting with `/`.
    pub path: String,
    /// Query parameters. `null` values are not sent.
    pub query: Map<String, Value>,
    /// Optional body.
    pub body: Option<RequestBody>,
    /// Extra headers.
    pub headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// Create a request with no parameters.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Map::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    /// GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PATCH request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Set query parameters from any serializable struct or map.
    ///
    /// # Errors
    /// Returns `RestError::RequestBuild` if `params` does not serialize to a JSON object.
    pub fn query<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self, RestError> {
        self.query = to_object(params)?;
        Ok(self)
    }

    /// Set a JSON body from any serializable value.
    ///
    /// # Errors
    /// Returns `RestError::RequestBuild` if serialization fails.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, RestError> {
        let value =
            serde_json::to_value(body).map_err(|e| RestError::RequestBuild(e.to_string()))?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    /// Set a pre-serialized text body.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    /// Add a header, replacing any existing header with the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Set a header in place, replacing any existing value (names compare case-insensitively).
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
    }

    /// Look up a header value by case-insensitive name.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl std::fmt::Debug for RequestDescriptor {
    // Header values may carry credentials; only names are printed.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("RequestDescriptor")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("body", &self.body)
            .field("headers", &header_names)
            .finish()
    }
}

fn to_object<T: Serialize + ?Sized>(params: &T) -> Result<Map<String, Value>, RestError> {
    match serde_json::to_value(params) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Ok(Map::new()),
        Ok(other) => Err(RestError::RequestBuild(format!(
            "query parameters must be an object, got {other}"
        ))),
        Err(e) => Err(RestError::RequestBuild(e.to_string())),
    }
}
