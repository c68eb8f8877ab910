use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::constants::{MAX_ACCESS_LEVEL, MIN_ACCESS_LEVEL};

/// Document visibility tier clamped to [1, 4]. Higher = more restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessLevel(u8);

impl AccessLevel {
    /// Publicly visible to everyone, including guests.
    pub const PUBLIC: AccessLevel = AccessLevel(1);

    /// Create a new level, clamping to the valid range.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(MIN_ACCESS_LEVEL, MAX_ACCESS_LEVEL))
    }

    /// Create a level only if `value` is already in range.
    pub fn try_new(value: i64) -> Option<Self> {
        if (MIN_ACCESS_LEVEL as i64..=MAX_ACCESS_LEVEL as i64).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for AccessLevel {
    fn default() -> Self {
        Self::PUBLIC
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A logical unit of content, before chunking.
///
/// `db_id` is a pure function of the normalized document content, so
/// re-ingesting identical content always maps to the same id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub db_id: String,
    pub title: String,
    pub body: String,
    pub url: Option<String>,
    /// Owner scope: `"public"` or a specific user id.
    pub tenant_id: String,
    pub access_level: AccessLevel,
    pub date: Option<DateTime<Utc>>,
    /// Fields of the source record not covered by the typed columns.
    pub metadata: Map<String, Value>,
}

impl Document {
    pub fn is_public(&self) -> bool {
        self.tenant_id == "public"
    }
}

/// Payload stored with every indexed chunk. Chunks share the parent
/// document's `db_id` and access attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkPayload {
    pub db_id: String,
    pub chunk_index: usize,
    pub title: String,
    pub text: String,
    pub url: Option<String>,
    pub tenant_id: String,
    pub access_level: AccessLevel,
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl ChunkPayload {
    /// Look up a string field by key, covering both typed columns and extras.
    pub fn field_str(&self, key: &str) -> Option<String> {
        match key {
            "db_id" => Some(self.db_id.clone()),
            "title" => Some(self.title.clone()),
            "text" => Some(self.text.clone()),
            "url" => self.url.clone(),
            "tenant_id" => Some(self.tenant_id.clone()),
            "date" => self.date.map(|d| d.to_rfc3339()),
            _ => self.extra.get(key).and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }),
        }
    }

    /// Look up a numeric field by key.
    pub fn field_num(&self, key: &str) -> Option<f64> {
        match key {
            "access_level" => Some(self.access_level.value() as f64),
            "chunk_index" => Some(self.chunk_index as f64),
            _ => self.extra.get(key).and_then(Value::as_f64),
        }
    }
}
