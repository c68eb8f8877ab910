//! In-memory implementation of the shared L2 tier.
//!
//! Stands in for a networked backend in single-instance deployments and
//! tests. Writes are last-writer-wins; expiry is checked lazily on read.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;

use vortex_core::traits::SharedCache;

enum Entry {
    Value { data: String, expires: Instant },
    Counter(i64),
}

#[derive(Default)]
pub struct InMemoryShared {
    entries: DashMap<String, Entry>,
    down: AtomicBool,
}

impl InMemoryShared {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a backend outage: every operation behaves as a miss/no-op.
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn is_down(&self) -> bool {
        self.down.load(Ordering::SeqCst)
    }
}

impl SharedCache for InMemoryShared {
    fn get(&self, key: &str) -> Option<String> {
        if self.is_down() {
            return None;
        }
        let expired = match self.entries.get(key) {
            Some(entry) => match &*entry {
                Entry::Value { data, expires } => {
                    if *expires > Instant::now() {
                        return Some(data.clone());
                    }
                    true
                }
                Entry::Counter(_) => return None,
            },
            None => return None,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    fn set(&self, key: &str, value: String, ttl: Duration) {
        if self.is_down() {
            return;
        }
        self.entries.insert(
            key.to_string(),
            Entry::Value {
                data: value,
                expires: Instant::now() + ttl,
            },
        );
    }

    fn delete(&self, key: &str) {
        if self.is_down() {
            return;
        }
        self.entries.remove(key);
    }

    fn incr(&self, key: &str) -> i64 {
        if self.is_down() {
            return 0;
        }
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert(Entry::Counter(0));
        match entry.value_mut() {
            Entry::Counter(n) => {
                *n += 1;
                *n
            }
            other => {
                *other = Entry::Counter(1);
                1
            }
        }
    }

    fn counter(&self, key: &str) -> i64 {
        if self.is_down() {
            return 0;
        }
        match self.entries.get(key).as_deref() {
            Some(Entry::Counter(n)) => *n,
            _ => 0,
        }
    }

    fn healthy(&self) -> bool {
        !self.is_down()
    }
}
