//! Response-shape normalization.
//!
//! The backend usually wraps payloads as `{ "data": ... }`, but bare arrays and bare
//! records are accepted too. Collections are located in this order:
//!
//! 1. unwrap one `data` envelope if the body is an object that has one;
//! 2. the result itself, if it is an array;
//! 3. the first of the caller's keys (e.g. `hotels`, then `data`) holding an array;
//! 4. otherwise an empty collection.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Keys searched for an embedded list of hotels.
pub const HOTEL_COLLECTION_KEYS: &[&str] = &["hotels", "data"];

/// Keys searched for an embedded list of any other collection.
pub const DEFAULT_COLLECTION_KEYS: &[&str] = &["data"];

/// Strip a `data` envelope, or return the body unchanged.
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(_) | None => Value::Object(map),
        },
        other => other,
    }
}

/// Extract the item list from a response body.
pub fn collection(body: Value, keys: &[&str]) -> Vec<Value> {
    match unwrap_envelope(body) {
        Value::Array(items) => items,
        Value::Object(mut map) => keys
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Decode every item of a collection, dropping the ones that do not fit `T`.
pub fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping malformed record: {}", e);
                None
            }
        })
        .collect();

    if decoded.len() != total {
        tracing::warn!("Decoded {} of {} records", decoded.len(), total);
    }
    decoded
}
