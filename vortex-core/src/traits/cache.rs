use std::time::Duration;

/// The cross-instance cache tier. Implementations may be backed by a
/// networked store; callers must treat every operation as fallible-by-miss
/// (fail-open) and writes as last-writer-wins.
pub trait SharedCache: Send + Sync {
    /// Fetch a value. A backend error behaves as a miss.
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value with a TTL. Backend errors are swallowed.
    fn set(&self, key: &str, value: String, ttl: Duration);

    fn delete(&self, key: &str);

    /// Atomically increment a counter key, returning the new value.
    /// Used for collection epochs.
    fn incr(&self, key: &str) -> i64;

    /// Read a counter key, defaulting to 0 when absent.
    fn counter(&self, key: &str) -> i64;

    /// Whether the backend is currently reachable.
    fn healthy(&self) -> bool;
}
