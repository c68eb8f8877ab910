//! Corpus builders for tests.

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use vortex_core::models::{AccessLevel, ChunkPayload, Document};

/// A raw scraped record, as it would arrive at the ingest boundary.
pub fn raw_document(title: &str, content: &str) -> Value {
    json!({
        "title": title,
        "content": content,
        "url": format!("https://example.org/{}", title.replace(' ', "-")),
    })
}

/// A normalized document with the given ownership attributes.
pub fn document(
    db_id: &str,
    title: &str,
    body: &str,
    tenant: &str,
    level: u8,
    date: Option<DateTime<Utc>>,
) -> Document {
    Document {
        db_id: db_id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        url: None,
        tenant_id: tenant.to_string(),
        access_level: AccessLevel::new(level),
        date,
        metadata: Map::new(),
    }
}

/// A chunk payload with the given ownership attributes.
pub fn chunk_payload(db_id: &str, tenant: &str, level: u8) -> ChunkPayload {
    ChunkPayload {
        db_id: db_id.to_string(),
        chunk_index: 0,
        title: format!("title-{db_id}"),
        text: format!("text for {db_id}"),
        url: None,
        tenant_id: tenant.to_string(),
        access_level: AccessLevel::new(level),
        date: None,
        extra: Map::new(),
    }
}
