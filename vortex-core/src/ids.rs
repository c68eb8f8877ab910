//! Deterministic content-hash ids.
//!
//! `doc_hash_id` is a pure function of the normalized document JSON, so
//! re-ingesting identical content maps to the same id. `point_id` derives a
//! stable per-chunk id independent of any particular store's id format.

use serde_json::Value;

/// Serialize a JSON value with object keys sorted recursively, so that two
/// semantically identical documents hash identically regardless of key order.
pub fn canonical_json(value: &Value) -> String {
    fn write(value: &Value, out: &mut String) {
        match value {
            Value::Object(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                out.push('{');
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(&serde_json::to_string(key).unwrap_or_default());
                    out.push(':');
                    write(&map[*key], out);
                }
                out.push('}');
            }
            Value::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write(item, out);
                }
                out.push(']');
            }
            other => out.push_str(&other.to_string()),
        }
    }

    let mut out = String::new();
    write(value, &mut out);
    out
}

/// Content-hash id of a document: blake3 over the canonical JSON form.
pub fn doc_hash_id(normalized: &Value) -> String {
    blake3::hash(canonical_json(normalized).as_bytes())
        .to_hex()
        .to_string()
}

/// Stable chunk point id derived from `(db_id, chunk_index)`.
pub fn point_id(db_id: &str, chunk_index: usize) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(db_id.as_bytes());
    hasher.update(b":");
    hasher.update(chunk_index.to_string().as_bytes());
    hasher.finalize().to_hex().to_string()
}
