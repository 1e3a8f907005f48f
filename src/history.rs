use crate::storage::{HISTORY_KEY, KeyValueStore};

pub const HISTORY_LIMIT: usize = 10;

/// Most recently copied greetings, newest first, no duplicates.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<String>,
}

impl HistoryLog {
    /// Reads the persisted log. Anything unparseable counts as no history.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut entries: Vec<String> = match store.get(HISTORY_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "discarding unreadable history");
                Vec::new()
            }),
            None => Vec::new(),
        };
        entries.truncate(HISTORY_LIMIT);
        Self { entries }
    }

    /// Returns false when `text` was already present.
    pub fn add(&mut self, text: &str, store: &mut dyn KeyValueStore) -> bool {
        if self.entries.iter().any(|e| e == text) {
            return false;
        }
        self.entries.insert(0, text.to_string());
        self.entries.truncate(HISTORY_LIMIT);
        self.persist(store);
        true
    }

    pub fn clear(&mut self, store: &mut dyn KeyValueStore) {
        self.entries.clear();
        if let Err(e) = store.remove(HISTORY_KEY) {
            tracing::warn!(error = %e, "failed to remove stored history");
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self, store: &mut dyn KeyValueStore) {
        let raw = match serde_json::to_string(&self.entries) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode history");
                return;
            }
        };
        // storage full or blocked: the in-memory log stays authoritative
        if let Err(e) = store.set(HISTORY_KEY, &raw) {
            tracing::warn!(error = %e, "failed to persist history");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GreetingError, Result};
    use crate::storage::MemoryStore;

    #[test]
    fn newest_first_and_persisted() {
        let mut store = MemoryStore::new();
        let mut log = HistoryLog::default();
        log.add("one", &mut store);
        log.add("two", &mut store);
        assert_eq!(log.entries(), ["two", "one"]);
        assert_eq!(store.get(HISTORY_KEY).as_deref(), Some(r#"["two","one"]"#));
        assert_eq!(HistoryLog::load(&store), log);
    }

    #[test]
    fn duplicate_is_ignored() {
        let mut store = MemoryStore::new();
        let mut log = HistoryLog::default();
        assert!(log.add("same", &mut store));
        log.add("other", &mut store);
        assert!(!log.add("same", &mut store));
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0], "other");
    }

    #[test]
    fn never_exceeds_limit() {
        let mut store = MemoryStore::new();
        let mut log = HistoryLog::default();
        for i in 0..25 {
            log.add(&format!("greeting {i}"), &mut store);
            assert!(log.len() <= HISTORY_LIMIT);
        }
        assert_eq!(log.len(), HISTORY_LIMIT);
        assert_eq!(log.entries()[0], "greeting 24");
        assert_eq!(log.entries()[9], "greeting 15");
        assert_eq!(HistoryLog::load(&store).len(), HISTORY_LIMIT);
    }

    #[test]
    fn clear_removes_stored_key() {
        let mut store = MemoryStore::new();
        let mut log = HistoryLog::default();
        log.add("x", &mut store);
        log.clear(&mut store);
        assert!(log.is_empty());
        assert!(store.get(HISTORY_KEY).is_none());
    }

    #[test]
    fn corrupt_state_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, "{\"oops\": 1").unwrap();
        assert!(HistoryLog::load(&store).is_empty());
        store.set(HISTORY_KEY, "42").unwrap();
        assert!(HistoryLog::load(&store).is_empty());
    }

    #[test]
    fn oversized_state_is_truncated_on_load() {
        let mut store = MemoryStore::new();
        let many: Vec<String> = (0..14).map(|i| i.to_string()).collect();
        store.set(HISTORY_KEY, &serde_json::to_string(&many).unwrap()).unwrap();
        assert_eq!(HistoryLog::load(&store).len(), HISTORY_LIMIT);
    }

    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(GreetingError::Io(std::io::Error::other("quota exceeded")))
        }
        fn remove(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_keeps_memory_log() {
        let mut store = FullStore;
        let mut log = HistoryLog::default();
        assert!(log.add("kept", &mut store));
        assert_eq!(log.entries(), ["kept"]);
    }
}
