//! Query-string encoding for the wire.
//!
//! Scalars go out as `k=v`, arrays as repeated `k[]=v` pairs, `null` is
//! skipped. Keys keep their insertion order.
//!
//! Values and the percent-encoding alphabet are the ones used for signing,
//! so a server rebuilding the canonical string from the received query gets
//! the same bytes.

use auth::{encode_component, scalar_text};
use serde_json::{Map, Value};

/// Encode query parameters without a leading `?`.
pub fn encode_query(params: &Map<String, Value>) -> String {
    let mut parts = Vec::with_capacity(params.len());

    for (key, value) in params {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                let array_key = format!("{key}[]");
                for item in items.iter().filter(|v| !v.is_null()) {
                    parts.push(pair(&array_key, &wire_text(item)));
                }
            }
            other => parts.push(pair(key, &wire_text(other))),
        }
    }

    parts.join("&")
}

fn pair(key: &str, value: &str) -> String {
    format!("{}={}", encode_component(key), encode_component(value))
}

// Objects are refused by the signer before send; JSON text is a fallback.
fn wire_text(value: &Value) -> String {
    scalar_text(value).unwrap_or_else(|| value.to_string())
}
