//! Raw JSON → typed [`Document`], with documented key-priority lists and
//! deterministic fallbacks instead of duck-typed field guessing.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};

use vortex_core::errors::{VortexError, VortexResult};
use vortex_core::ids::doc_hash_id;
use vortex_core::models::{AccessLevel, Document};

/// Key priority for each typed column. First present, non-empty key wins.
const TITLE_KEYS: &[&str] = &["title", "name", "subject", "headline"];
const BODY_KEYS: &[&str] = &["content", "text", "body", "description"];
const URL_KEYS: &[&str] = &["url", "link", "source_url"];
const DATE_KEYS: &[&str] = &["date", "published_at", "created_at", "updated_at"];

fn first_string(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Fall back to a plain date prefix (YYYY-MM-DD).
    let prefix: String = raw.chars().take(10).collect();
    NaiveDate::parse_from_str(&prefix, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Normalize one raw record into a typed document.
///
/// The content hash is taken over the whole raw record in canonical form, so
/// identical source data always produces the same `db_id` regardless of key
/// order.
pub fn normalize_document(raw: &Value) -> VortexResult<Document> {
    let map = raw
        .as_object()
        .ok_or_else(|| VortexError::Validation("document must be a JSON object".to_string()))?;

    let body = first_string(map, BODY_KEYS).ok_or_else(|| {
        VortexError::Validation(format!(
            "document has no body field (expected one of {BODY_KEYS:?})"
        ))
    })?;
    let title = first_string(map, TITLE_KEYS).unwrap_or_else(|| "(untitled)".to_string());
    let url = first_string(map, URL_KEYS);
    let date = first_string(map, DATE_KEYS).and_then(|raw| parse_date(&raw));

    let tenant_id = first_string(map, &["tenant_id"]).unwrap_or_else(|| "public".to_string());
    let access_level = map
        .get("access_level")
        .and_then(Value::as_i64)
        .and_then(AccessLevel::try_new)
        .unwrap_or_default();

    // Everything not consumed by a typed column is retained as metadata.
    let consumed: Vec<&str> = TITLE_KEYS
        .iter()
        .chain(BODY_KEYS)
        .chain(URL_KEYS)
        .chain(DATE_KEYS)
        .copied()
        .chain(["tenant_id", "access_level"])
        .collect();
    let metadata: Map<String, Value> = map
        .iter()
        .filter(|(k, _)| !consumed.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(Document {
        db_id: doc_hash_id(raw),
        title,
        body,
        url,
        tenant_id,
        access_level,
        date,
        metadata,
    })
}
