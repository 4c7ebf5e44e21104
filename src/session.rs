//! Session-scoped variable storage
//!
//! Each session key owns one [`Bindings`] map, created lazily on first
//! access and kept for the life of the store. Callers take the per-session
//! lock for the duration of one batch, so two batches for the same key never
//! interleave while batches for different keys proceed independently.
//!
//! There is no eviction, TTL or capacity bound; unbounded growth is an
//! accepted limitation of this store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Variable bindings for one session: name to last assigned value.
pub type Bindings = HashMap<String, f64>;

/// Owns every session's bindings, keyed by a caller-supplied session key.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Arc<Mutex<Bindings>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the bindings for `key`, creating an empty map on first use.
    ///
    /// The outer map lock is only held long enough to fetch the handle;
    /// callers lock the returned bindings themselves and hold that lock
    /// across the whole batch they evaluate.
    pub fn get_or_create(&self, key: &str) -> Arc<Mutex<Bindings>> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.entry(key.to_string()).or_default().clone()
    }

    /// Empty the bindings for `key` in place. The key itself stays in the
    /// store: a later `get_or_create` sees the same, now-empty map.
    pub fn clear(&self, key: &str) {
        let session = self.get_or_create(key);
        let mut bindings = session.lock().unwrap();
        bindings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn bindings_persist_across_lookups() {
        let store = SessionStore::new();
        store
            .get_or_create("alice")
            .lock()
            .unwrap()
            .insert("x".to_string(), 5.0);
        let value = store.get_or_create("alice").lock().unwrap().get("x").copied();
        assert_eq!(value, Some(5.0));
    }

    #[test]
    fn sessions_are_isolated() {
        let store = SessionStore::new();
        store
            .get_or_create("alice")
            .lock()
            .unwrap()
            .insert("x".to_string(), 1.0);
        assert!(store.get_or_create("bob").lock().unwrap().get("x").is_none());
    }

    #[test]
    fn clear_empties_but_preserves_the_session() {
        let store = SessionStore::new();
        let session = store.get_or_create("alice");
        session.lock().unwrap().insert("x".to_string(), 5.0);

        store.clear("alice");

        // Same map, now empty: the original handle observes the clear.
        assert!(session.lock().unwrap().is_empty());
        assert!(store.get_or_create("alice").lock().unwrap().is_empty());
    }

    #[test]
    fn clear_on_unknown_key_creates_an_empty_session() {
        let store = SessionStore::new();
        store.clear("ghost");
        assert!(store.get_or_create("ghost").lock().unwrap().is_empty());
    }

    #[test]
    fn concurrent_batches_on_different_keys() {
        let store = Arc::new(SessionStore::new());
        let mut handles = Vec::new();

        for key in ["a", "b", "c", "d"] {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    let session = store.get_or_create(key);
                    let mut bindings = session.lock().unwrap();
                    bindings.insert("n".to_string(), i as f64);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        for key in ["a", "b", "c", "d"] {
            let session = store.get_or_create(key);
            let bindings = session.lock().unwrap();
            assert_eq!(bindings.get("n"), Some(&99.0));
        }
    }

    #[test]
    fn same_key_mutations_serialize() {
        let store = Arc::new(SessionStore::new());
        let mut handles = Vec::new();

        for _ in 0..4 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for _ in 0..250 {
                    let session = store.get_or_create("shared");
                    let mut bindings = session.lock().unwrap();
                    let n = bindings.get("n").copied().unwrap_or(0.0);
                    bindings.insert("n".to_string(), n + 1.0);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let session = store.get_or_create("shared");
        assert_eq!(session.lock().unwrap().get("n"), Some(&1000.0));
    }
}
