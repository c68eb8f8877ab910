use serde::{Deserialize, Serialize};

use super::document::ChunkPayload;

/// A single payload condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Exact string match on a payload field. The key `"id"` matches the
    /// point id rather than a payload field.
    MatchStr { key: String, value: String },
    /// Match any of the given values.
    MatchAny { key: String, values: Vec<String> },
    /// Numeric field less-than-or-equal.
    RangeLte { key: String, value: f64 },
}

/// Store-agnostic payload filter: every `must` condition is required,
/// and at least one `should` condition (when any are present).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default)]
    pub must: Vec<Condition>,
    #[serde(default)]
    pub should: Vec<Condition>,
}

impl Filter {
    pub fn must(conditions: Vec<Condition>) -> Self {
        Self {
            must: conditions,
            should: Vec::new(),
        }
    }

    pub fn should(conditions: Vec<Condition>) -> Self {
        Self {
            must: Vec::new(),
            should: conditions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.should.is_empty()
    }

    /// Evaluate this filter against a point.
    pub fn matches(&self, point_id: &str, payload: &ChunkPayload) -> bool {
        if !self.must.iter().all(|c| eval(c, point_id, payload)) {
            return false;
        }
        if self.should.is_empty() {
            return true;
        }
        self.should.iter().any(|c| eval(c, point_id, payload))
    }

    /// Stable textual form used in cache keys. Condition order is
    /// significant to the caller, so it is preserved as-is.
    pub fn fingerprint(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn eval(condition: &Condition, point_id: &str, payload: &ChunkPayload) -> bool {
    match condition {
        Condition::MatchStr { key, value } => {
            if key == "id" {
                return point_id == value;
            }
            payload.field_str(key).as_deref() == Some(value.as_str())
        }
        Condition::MatchAny { key, values } => {
            if key == "id" {
                return values.iter().any(|v| v == point_id);
            }
            match payload.field_str(key) {
                Some(actual) => values.iter().any(|v| *v == actual),
                None => false,
            }
        }
        Condition::RangeLte { key, value } => match payload.field_num(key) {
            Some(actual) => actual <= *value,
            None => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccessLevel;
    use serde_json::Map;

    fn payload(db_id: &str, tenant: &str, level: u8) -> ChunkPayload {
        ChunkPayload {
            db_id: db_id.to_string(),
            chunk_index: 0,
            title: "t".to_string(),
            text: "x".to_string(),
            url: None,
            tenant_id: tenant.to_string(),
            access_level: AccessLevel::new(level),
            date: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn must_conditions_all_required() {
        let f = Filter::must(vec![
            Condition::MatchStr {
                key: "tenant_id".into(),
                value: "public".into(),
            },
            Condition::RangeLte {
                key: "access_level".into(),
                value: 2.0,
            },
        ]);
        assert!(f.matches("p0", &payload("d1", "public", 2)));
        assert!(!f.matches("p0", &payload("d1", "public", 3)));
        assert!(!f.matches("p0", &payload("d1", "alice", 1)));
    }

    #[test]
    fn should_matches_either_id_or_db_id() {
        let f = Filter::should(vec![
            Condition::MatchStr {
                key: "id".into(),
                value: "doc-1".into(),
            },
            Condition::MatchStr {
                key: "db_id".into(),
                value: "doc-1".into(),
            },
        ]);
        // Point whose payload db_id matches.
        assert!(f.matches("chunk-9", &payload("doc-1", "public", 1)));
        // Point whose point id matches directly.
        assert!(f.matches("doc-1", &payload("other", "public", 1)));
        assert!(!f.matches("chunk-9", &payload("other", "public", 1)));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let f = Filter::default();
        assert!(f.matches("any", &payload("d", "public", 4)));
    }
}
