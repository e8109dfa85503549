//! Generic REST client wrapper around reqwest.

use crate::error::RestError;
use crate::middleware::Middleware;
use crate::query::encode_query;
use crate::request::{RequestBody, RequestDescriptor};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Generic REST client for making HTTP requests.
///
/// Every call passes through the registered middleware in registration
/// order on the way out, and each middleware observes the outcome.
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl RestClient {
    /// Create a new REST client with the given base URL.
    ///
    /// # Arguments
    /// * `base_url` - Base URL for all requests (e.g., "https://api.futuur.com/api/v1")
    /// * `timeout` - Request timeout duration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RestError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .http1_title_case_headers()
            .build()
            .map_err(|e| RestError::RequestBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            middleware: Vec::new(),
        })
    }

    /// Create a new REST client with default timeout.
    pub fn with_default_timeout(base_url: &str) -> Result<Self, RestError> {
        Self::new(base_url, DEFAULT_TIMEOUT)
    }

    /// Append a middleware to the chain.
    pub fn with_middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and deserialize the JSON response.
    ///
    /// Middleware errors abort before sending. Transport and HTTP errors are
    /// reported to every middleware, then returned unchanged; nothing is retried.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> Result<T, RestError> {
        let request = self.prepare(request)?;

        match self.send(&request).await {
            Ok(value) => Ok(value),
            Err(err) => {
                for middleware in &self.middleware {
                    middleware.on_error(&request, &err);
                }
                Err(err)
            }
        }
    }

    /// Run the outbound hooks without sending.
    pub fn prepare(&self, mut request: RequestDescriptor) -> Result<RequestDescriptor, RestError> {
        for middleware in &self.middleware {
            request = middleware
                .on_request(request)
                .map_err(RestError::Middleware)?;
        }
        Ok(request)
    }

    async fn send<T: DeserializeOwned>(&self, request: &RequestDescriptor) -> Result<T, RestError> {
        let url = self.build_url(&request.path, Some(&encode_query(&request.query)));
        tracing::debug!(method = %request.method, url = %url, "Sending request");

        let mut builder = self.client.request(request.method.clone(), &url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match &request.body {
            Some(RequestBody::Json(value)) => {
                let bytes = serde_json::to_vec(value)
                    .map_err(|e| RestError::RequestBuild(e.to_string()))?;
                builder.body(bytes)
            }
            Some(RequestBody::Text(text)) => builder.body(text.clone()),
            None => builder,
        };

        let response = builder.send().await?;

        for middleware in &self.middleware {
            middleware.on_response(request, response.status());
        }

        self.handle_response(response).await
    }

    /// Build a full URL from path and optional query string.
    fn build_url(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.base_url, path, q),
            _ => format!("{}{}", self.base_url, path),
        }
    }

    /// Handle HTTP response and deserialize JSON body.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, RestError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            // Empty bodies decode as `null` so unit and Option targets work.
            let text = if body.trim().is_empty() { "null" } else { body.as_str() };
            serde_json::from_str(text).map_err(|e| {
                tracing::warn!(body = %body, error = %e, "Failed to parse response");
                RestError::Parse(e.to_string())
            })
        } else {
            let body = response.text().await.unwrap_or_default();

            Err(RestError::HttpError {
                status: status.as_u16(),
                message: body,
            })
        }
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept one connection, capture the raw request, answer with `status` and `body`.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];

            loop {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let content_length = text[..end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + content_length || n == 0 {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).to_string()
        });

        (format!("http://{addr}"), handle)
    }

    #[derive(Default)]
    struct Recorder {
        errors: Mutex<Vec<String>>,
        statuses: Mutex<Vec<u16>>,
    }

    impl Middleware for Arc<Recorder> {
        fn on_request(&self, request: RequestDescriptor) -> Result<RequestDescriptor, BoxError> {
            Ok(request.header("X-Seen", "1"))
        }

        fn on_response(&self, _request: &RequestDescriptor, status: reqwest::StatusCode) {
            self.statuses.lock().unwrap().push(status.as_u16());
        }

        fn on_error(&self, request: &RequestDescriptor, error: &RestError) {
            self.errors
                .lock()
                .unwrap()
                .push(format!("{} {}: {}", request.method, request.path, error));
        }
    }

    struct Refuse;

    impl Middleware for Refuse {
        fn on_request(&self, _request: RequestDescriptor) -> Result<RequestDescriptor, BoxError> {
            Err("refused".into())
        }
    }

    #[test]
    fn test_build_url_no_query() {
        let client = RestClient::with_default_timeout("https://api.example.com").unwrap();
        assert_eq!(
            client.build_url("/api/v1/me", None),
            "https://api.example.com/api/v1/me"
        );
    }

    #[test]
    fn test_build_url_with_query() {
        let client = RestClient::with_default_timeout("https://api.example.com").unwrap();
        assert_eq!(
            client.build_url("/markets", Some("limit=5&offset=0")),
            "https://api.example.com/markets?limit=5&offset=0"
        );
    }

    #[test]
    fn test_build_url_strips_trailing_slash() {
        let client = RestClient::with_default_timeout("https://api.example.com/").unwrap();
        assert_eq!(client.build_url("/me", None), "https://api.example.com/me");
    }

    #[test]
    fn test_build_url_empty_query() {
        let client = RestClient::with_default_timeout("https://api.example.com").unwrap();
        assert_eq!(client.build_url("/me", Some("")), "https://api.example.com/me");
    }

    #[test]
    fn test_prepare_runs_middleware_in_order() {
        let recorder = Arc::new(Recorder::default());
        let client = RestClient::with_default_timeout("https://api.example.com")
            .unwrap()
            .with_middleware(recorder);

        let prepared = client.prepare(RequestDescriptor::get("/me")).unwrap();
        assert_eq!(prepared.header_value("x-seen"), Some("1"));
    }

    #[tokio::test]
    async fn test_refused_request_is_not_sent() {
        let recorder = Arc::new(Recorder::default());
        // Port 9 on localhost: nothing listens and nothing should connect.
        let client = RestClient::with_default_timeout("http://127.0.0.1:9")
            .unwrap()
            .with_middleware(Refuse)
            .with_middleware(recorder.clone());

        let err = client
            .execute::<Value>(RequestDescriptor::get("/me"))
            .await
            .unwrap_err();

        assert!(matches!(err, RestError::Middleware(_)));
        assert!(recorder.errors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let (base_url, server) = serve_once("200 OK", r#"{"ok":true}"#).await;
        let recorder = Arc::new(Recorder::default());
        let client = RestClient::with_default_timeout(&base_url)
            .unwrap()
            .with_middleware(recorder.clone());

        let request = RequestDescriptor::get("/markets")
            .query(&json!({"limit": 5, "categories": [1, 2]}))
            .unwrap();
        let value: Value = client.execute(request).await.unwrap();
        let raw = server.await.unwrap();

        assert_eq!(value, json!({"ok": true}));
        assert!(raw.starts_with(
            "GET /markets?categories%5B%5D=1&categories%5B%5D=2&limit=5 HTTP/1.1\r\n"
        ));
        assert!(raw.contains("X-Seen: 1\r\n"));
        assert!(raw.contains("Content-Type: application/json\r\n"));
        assert_eq!(*recorder.statuses.lock().unwrap(), vec![200]);
        assert!(recorder.errors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_text_body_sent_unchanged() {
        let (base_url, server) = serve_once("200 OK", "").await;
        let client = RestClient::with_default_timeout(&base_url).unwrap();

        let body = r#"{ "outcome": 1,   "shares": 2 }"#;
        let value: Option<Value> = client
            .execute(RequestDescriptor::post("/bets/").text(body))
            .await
            .unwrap();
        let raw = server.await.unwrap();

        assert!(value.is_none());
        assert!(raw.ends_with(body));
    }

    #[tokio::test]
    async fn test_http_error_reported_with_body() {
        let (base_url, server) = serve_once("403 Forbidden", r#"{"detail":"bad hmac"}"#).await;
        let recorder = Arc::new(Recorder::default());
        let client = RestClient::with_default_timeout(&base_url)
            .unwrap()
            .with_middleware(crate::middleware::FailureLogger)
            .with_middleware(recorder.clone());

        let err = client
            .execute::<Value>(RequestDescriptor::get("/me"))
            .await
            .unwrap_err();
        server.await.unwrap();

        assert_eq!(err.status(), Some(403));
        assert_eq!(err.response_body(), Some(r#"{"detail":"bad hmac"}"#));
        assert_eq!(*recorder.statuses.lock().unwrap(), vec![403]);
        let errors = recorder.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("GET /me: HTTP error: 403"));
    }

    #[tokio::test]
    async fn test_connection_error_reported() {
        let recorder = Arc::new(Recorder::default());
        // Bind then drop to get a port with nothing listening.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let client = RestClient::with_default_timeout(&format!("http://{addr}"))
            .unwrap()
            .with_middleware(recorder.clone());

        let err = client
            .execute::<Value>(RequestDescriptor::get("/me"))
            .await
            .unwrap_err();

        assert!(matches!(err, RestError::Connection(_)));
        assert_eq!(recorder.errors.lock().unwrap().len(), 1);
        assert!(recorder.statuses.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let (base_url, server) = serve_once("200 OK", "not json").await;
        let client = RestClient::with_default_timeout(&base_url).unwrap();

        let err = client
            .execute::<Value>(RequestDescriptor::get("/me"))
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, RestError::Parse(_)));
    }
}
