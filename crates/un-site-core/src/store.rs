//! Key-value persistence boundary.
//!
//! Browser local storage is modelled as an infallible get/set pair:
//! reads that fail yield `None`, writes are best-effort. Components own
//! disjoint keys, so read-modify-write without coordination is fine on
//! the single-threaded browser executor.

use std::cell::RefCell;
use std::collections::HashMap;

pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-memory store, used by tests and as the degraded mode when the
/// browser denies storage access.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("theme"), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = MemoryStore::new();
        store.set("theme", "light");
        assert_eq!(store.get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn set_overwrites() {
        let store = MemoryStore::new();
        store.set("theme", "light");
        store.set("theme", "system");
        assert_eq!(store.get("theme").as_deref(), Some("system"));
    }
}
