//! Request signing pipeline.
//!
//! Runs on every outgoing request once its parameters are final:
//!
//! 1. Read the timestamp from the clock.
//! 2. Merge `Key`/`Timestamp`, query params and body params (body wins).
//! 3. Canonicalize and HMAC-SHA512 sign.
//! 4. Attach `Key`, `Timestamp` and `HMAC` headers.
//!
//! The query map and body are left exactly as the caller built them; the
//! auth fields travel only in headers.

use auth::{AuthError, Clock, Credentials, Params, RequestSigner, SignedHeaders, SystemClock};
use rest_client::{BoxError, Middleware, RequestBody, RequestDescriptor};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;

/// Middleware that signs each request with the client's credentials.
pub struct SigningMiddleware {
    credentials: Credentials,
    clock: Arc<dyn Clock>,
}

impl SigningMiddleware {
    /// Sign with wall-clock timestamps.
    pub fn new(credentials: Credentials) -> Self {
        Self::with_clock(credentials, Arc::new(SystemClock))
    }

    /// Sign with timestamps from `clock`.
    pub fn with_clock(credentials: Credentials, clock: Arc<dyn Clock>) -> Self {
        Self { credentials, clock }
    }

    /// Compute the headers for `request` without modifying it.
    ///
    /// # Errors
    /// Returns `AuthError::Encoding` if a parameter has no stable textual
    /// form or a text body is not a JSON object.
    pub fn sign(&self, request: &RequestDescriptor) -> Result<SignedHeaders, AuthError> {
        let body = body_params(request.body.as_ref())?;
        let timestamp = self.clock.now_secs();

        RequestSigner::new(&self.credentials).sign_params(
            Some(&request.query),
            body.as_deref(),
            timestamp,
        )
    }
}

impl Middleware for SigningMiddleware {
    fn on_request(&self, mut request: RequestDescriptor) -> Result<RequestDescriptor, BoxError> {
        let signed = self.sign(&request)?;

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            timestamp = signed.timestamp,
            canonical = %signed.canonical,
            "Request signed"
        );

        for (name, value) in signed.to_pairs() {
            request.set_header(name, value);
        }

        Ok(request)
    }
}

impl std::fmt::Debug for SigningMiddleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningMiddleware")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

/// Parameters carried by the body, parsing pre-serialized text when needed.
///
/// Empty and `null` bodies contribute nothing.
fn body_params(body: Option<&RequestBody>) -> Result<Option<Cow<'_, Params>>, AuthError> {
    match body {
        None => Ok(None),
        Some(RequestBody::Json(value)) => json_object(value).map(|p| p.map(Cow::Borrowed)),
        Some(RequestBody::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RequestBody::Text(text)) => {
            let value: Value = serde_json::from_str(text).map_err(|e| AuthError::Encoding {
                key: "body".into(),
                reason: format!("text body is not valid JSON: {e}"),
            })?;
            match value {
                Value::Object(map) => Ok(Some(Cow::Owned(map))),
                Value::Null => Ok(None),
                _ => Err(not_an_object()),
            }
        }
    }
}

fn json_object(value: &Value) -> Result<Option<&Params>, AuthError> {
    match value {
        Value::Object(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        _ => Err(not_an_object()),
    }
}

fn not_an_object() -> AuthError {
    AuthError::Encoding {
        key: "body".into(),
        reason: "body must be a JSON object".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::{canonicalize, verify_message, AuthMeta, FixedClock};
    use serde_json::json;

    const TS: i64 = 1_700_000_000;

    fn middleware() -> SigningMiddleware {
        let creds = Credentials::new("PUB", "SECRET").unwrap();
        SigningMiddleware::with_clock(creds, Arc::new(FixedClock(TS)))
    }

    #[test]
    fn test_get_with_query_fixture() {
        let request = RequestDescriptor::get("/markets")
            .query(&json!({"limit": 5, "offset": 0}))
            .unwrap();
        let signed = middleware().on_request(request).unwrap();

        assert_eq!(signed.header_value("Key"), Some("PUB"));
        assert_eq!(signed.header_value("Timestamp"), Some("1700000000"));
        assert_eq!(
            signed.header_value("HMAC"),
            Some(
                "9a37ef7cdf02061f5f3380f28e39ea5d6eb3268905491344872d900926cdf48c\
                 42f8dab401b68442be3bd51ae6b383b7440aa2dfdcb4f6540bf5bc46534854e4"
            )
        );
    }

    #[test]
    fn test_plain_get_signs_auth_meta_only() {
        let signed = middleware().sign(&RequestDescriptor::get("/me")).unwrap();
        assert_eq!(signed.canonical, "Key=PUB&Timestamp=1700000000");
    }

    #[test]
    fn test_caller_params_not_mutated() {
        let request = RequestDescriptor::post("/bets/")
            .query(&json!({"limit": 5}))
            .unwrap()
            .json(&json!({"outcome": 42}))
            .unwrap();
        let original_query = request.query.clone();
        let original_body = request.body.clone();

        let signed = middleware().on_request(request).unwrap();

        assert_eq!(signed.query, original_query);
        assert_eq!(signed.body, original_body);
        assert!(!signed.query.contains_key("Key"));
        assert!(!signed.query.contains_key("Timestamp"));
        assert_eq!(signed.headers.len(), 3);
    }

    #[test]
    fn test_body_overrides_query() {
        let request = RequestDescriptor::post("/bets/")
            .query(&json!({"limit": 10}))
            .unwrap()
            .json(&json!({"limit": 20}))
            .unwrap();
        let signed = middleware().sign(&request).unwrap();

        assert_eq!(signed.canonical, "Key=PUB&Timestamp=1700000000&limit=20");
    }

    #[test]
    fn test_text_body_parsed_for_signing_only() {
        let text = r#"{"position":"l","outcome":42,"amount":12.5}"#;
        let request = RequestDescriptor::post("/bets/").text(text);
        let signed = middleware().on_request(request).unwrap();

        assert_eq!(signed.body, Some(RequestBody::Text(text.to_string())));
        assert_eq!(
            signed.header_value("HMAC"),
            Some(
                "aa736a84842725b75493d334d48652307d97e439ae58702bbc36594bc42ec420\
                 5298387073192ba80e3fb1d4c9e8bf1475f57ad77733fc77763e82aacf5820ed"
            )
        );
    }

    #[test]
    fn test_text_and_json_bodies_sign_identically() {
        let mw = middleware();
        let from_text = mw
            .sign(&RequestDescriptor::post("/bets/").text(r#"{"shares": 3, "outcome": 7}"#))
            .unwrap();
        let from_json = mw
            .sign(
                &RequestDescriptor::post("/bets/")
                    .json(&json!({"outcome": 7, "shares": 3}))
                    .unwrap(),
            )
            .unwrap();

        assert_eq!(from_text.hmac, from_json.hmac);
    }

    #[test]
    fn test_invalid_text_body_rejected() {
        let err = middleware()
            .sign(&RequestDescriptor::post("/bets/").text("outcome=1"))
            .unwrap_err();
        assert!(matches!(err, AuthError::Encoding { ref key, .. } if key == "body"));

        let err = middleware()
            .sign(&RequestDescriptor::post("/bets/").text("[1,2]"))
            .unwrap_err();
        assert!(matches!(err, AuthError::Encoding { .. }));
    }

    #[test]
    fn test_empty_and_null_bodies_ignored() {
        let mw = middleware();
        for request in [
            RequestDescriptor::patch("/bets/1").text(""),
            RequestDescriptor::patch("/bets/1").text("null"),
            RequestDescriptor::patch("/bets/1").json(&Value::Null).unwrap(),
        ] {
            assert_eq!(mw.sign(&request).unwrap().canonical, "Key=PUB&Timestamp=1700000000");
        }
    }

    #[test]
    fn test_unencodable_query_fails_before_send() {
        let request = RequestDescriptor::get("/markets")
            .query(&json!({"filter": {"a": 1}}))
            .unwrap();
        let err = middleware().on_request(request).unwrap_err();

        let auth = err.downcast::<AuthError>().unwrap();
        assert!(matches!(*auth, AuthError::Encoding { ref key, .. } if key == "filter"));
    }

    #[test]
    fn test_verifier_recomputes_signature() {
        let request = RequestDescriptor::get("/bets")
            .query(&json!({"currency_mode": "real_money", "active": true, "user": null}))
            .unwrap();
        let signed = middleware().on_request(request).unwrap();

        // What a server does: rebuild from headers + received params.
        let timestamp: i64 = signed.header_value("Timestamp").unwrap().parse().unwrap();
        let meta = AuthMeta {
            public_key: signed.header_value("Key").unwrap(),
            timestamp,
        };
        let canonical = canonicalize(&meta, Some(&signed.query), None).unwrap();

        assert!(verify_message(&canonical, "SECRET", signed.header_value("HMAC").unwrap()).unwrap());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", middleware());
        assert!(debug.contains("PUB"));
        assert!(!debug.contains("SECRET"));
    }
}
