//! Route Fingerprint Module
//!
//! Derives the stable cache key for a route.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::route::{Body, Route};

/// Computes a 64-char hex SHA-256 digest over the route's method, endpoint,
/// key-sorted params and body.
///
/// Every field is length-prefixed so adjacent fields can't bleed into each
/// other (`a` + `bc` never collides with `ab` + `c`). Params are sorted by key
/// only; values repeated under one key keep their send order. JSON bodies are
/// hashed with object keys sorted at every depth.
pub fn fingerprint(route: &Route) -> String {
    let mut hasher = Sha256::new();

    write_field(&mut hasher, route.method().as_str().as_bytes());
    write_field(&mut hasher, route.endpoint().as_bytes());

    let mut params: Vec<&(String, String)> = route.params().iter().collect();
    params.sort_by(|a, b| a.0.cmp(&b.0));
    hasher.update((params.len() as u64).to_be_bytes());
    for (key, value) in params {
        write_field(&mut hasher, key.as_bytes());
        write_field(&mut hasher, value.as_bytes());
    }

    match route.body() {
        None => hasher.update([0u8]),
        Some(Body::Raw(data)) => {
            hasher.update([1u8]);
            write_field(&mut hasher, data.as_bytes());
        }
        Some(Body::Json(json)) => {
            hasher.update([2u8]);
            write_field(&mut hasher, canonical_json(json).to_string().as_bytes());
        }
    }

    hex::encode(hasher.finalize())
}

/// Rebuilds `value` with object keys inserted in sorted order, so the
/// serialization is key-sorted whether or not `preserve_order` is enabled.
fn canonical_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k.clone(), canonical_json(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical_json).collect()),
        other => other.clone(),
    }
}

fn write_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_be_bytes());
    hasher.update(bytes);
}
