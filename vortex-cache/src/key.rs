//! Cache key construction.
//!
//! A key covers everything that determines the pre-access-control ranking:
//! normalized query text, active filters, the collection set with each
//! collection's epoch, and the weight profile. Caller identity is
//! deliberately excluded — cached lists are role-agnostic and access control
//! re-runs on every request.

use vortex_core::models::Filter;

use crate::epoch::EpochRegistry;

/// The assembled inputs of one cache key.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn build(
        normalized_query: &str,
        filter: Option<&Filter>,
        collections: &[String],
        epochs: &EpochRegistry,
        profile_name: &str,
    ) -> Self {
        let mut cols: Vec<&String> = collections.iter().collect();
        cols.sort();
        let epoch_part: String = cols
            .iter()
            .map(|c| format!("{}:{}", c, epochs.current(c)))
            .collect::<Vec<_>>()
            .join(",");
        let cols_part: String = cols
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let filter_part = filter.map(Filter::fingerprint).unwrap_or_default();

        let raw = format!(
            "q:{normalized_query}|f:{filter_part}|cols:{cols_part}|epochs:{epoch_part}|w:{profile_name}"
        );
        QueryKey(format!("query:{}", blake3::hash(raw.as_bytes()).to_hex()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
