//! Canonical parameter strings.
//!
//! The canonical string is the exact byte sequence fed to the HMAC. The
//! server rebuilds it from the headers plus the request parameters, so every
//! step below is a compatibility contract:
//!
//! 1. Merge `Key` and `Timestamp`, then query params, then body params.
//!    Later sources overwrite earlier keys.
//! 2. Drop `null` values entirely.
//! 3. Stringify the remaining values (see [`value_text`]).
//! 4. Sort by key, byte-wise ascending.
//! 5. Percent-encode key and value with [`COMPONENT_ENCODE_SET`] and join as
//!    `k=v&k=v`.
//!
//! ```text
//! {"b": 2, "a": 1, "Key": "pub", "Timestamp": 1700000000}
//!   => Key=pub&Timestamp=1700000000&a=1&b=2
//! ```

use crate::error::AuthError;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{Map, Number, Value};

/// Flat parameter mapping as it appears in a query string or JSON body.
pub type Params = Map<String, Value>;

/// Parameter name carrying the public key.
pub const KEY_PARAM: &str = "Key";
/// Parameter name carrying the signing timestamp.
pub const TIMESTAMP_PARAM: &str = "Timestamp";

/// Bytes left unescaped in keys and values.
///
/// Unreserved: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`. Everything else, including
/// space, is emitted as `%XX` with uppercase hex over the UTF-8 bytes.
pub const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Authentication metadata folded into every signed parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthMeta<'a> {
    /// Public key identifier.
    pub public_key: &'a str,
    /// Integer seconds since the Unix epoch.
    pub timestamp: i64,
}

/// Merge auth metadata, query and body parameters into one mapping.
///
/// A key present in both query and body resolves to the body's value.
pub fn merge_params(meta: &AuthMeta<'_>, query: Option<&Params>, body: Option<&Params>) -> Params {
    let mut merged = Params::new();
    merged.insert(KEY_PARAM.to_owned(), Value::from(meta.public_key));
    merged.insert(TIMESTAMP_PARAM.to_owned(), Value::from(meta.timestamp));

    for source in [query, body].into_iter().flatten() {
        for (key, value) in source {
            merged.insert(key.clone(), value.clone());
        }
    }

    merged
}

/// Build the canonical string for an already merged parameter mapping.
///
/// # Errors
/// Returns `AuthError::Encoding` if a value is an object or a nested array.
pub fn canonical_string(params: &Params) -> Result<String, AuthError> {
    let mut pairs: Vec<(&str, String)> = Vec::with_capacity(params.len());

    for (key, value) in params {
        if let Some(text) = value_text(key, value, false)? {
            pairs.push((key.as_str(), text));
        }
    }

    // Ordinal comparison on UTF-8 bytes, uppercase before lowercase.
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    Ok(pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&"))
}

/// Merge and canonicalize in one step.
///
/// # Errors
/// Returns `AuthError::Encoding` if any merged value cannot be stringified.
pub fn canonicalize(
    meta: &AuthMeta<'_>,
    query: Option<&Params>,
    body: Option<&Params>,
) -> Result<String, AuthError> {
    canonical_string(&merge_params(meta, query, body))
}

/// Percent-encode a single key or value.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT_ENCODE_SET).to_string()
}

/// Textual form of a scalar: string, boolean or number.
///
/// Returns `None` for `null`, arrays and objects. The transport writes query
/// values with this too, so the bytes sent match the bytes signed.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(number_text(n)),
        Value::String(s) => Some(s.clone()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Textual form of a parameter value, `None` when the key must be dropped.
///
/// Arrays of scalars join with `,`; `null` elements inside an array become
/// empty strings.
fn value_text(key: &str, value: &Value, nested: bool) -> Result<Option<String>, AuthError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(scalar_text(value)),
        Value::Array(_) if nested => Err(AuthError::encoding(
            key,
            "nested arrays have no stable textual form",
        )),
        Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                parts.push(value_text(key, item, true)?.unwrap_or_default());
            }
            Ok(Some(parts.join(",")))
        }
        Value::Object(_) => Err(AuthError::encoding(
            key,
            "objects have no stable textual form",
        )),
    }
}

/// Integers print as plain digits. Floats use the shortest round-trip
/// decimal without exponent; integral floats drop the fraction.
fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        // -0 prints as "0"
        Some(f) if f == 0.0 => "0".to_owned(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
