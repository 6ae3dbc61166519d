use std::collections::HashMap;
use std::sync::Mutex;

use super::storage::ConversationStore;

/// Key for the single pointer slot; kept as a map entry so per-session
/// keys can be added later without changing the storage shape.
const CURRENT_KEY: &str = "current";

/// In-memory pointer store. The mutex makes concurrent tool invocations
/// safe; last writer wins.
#[derive(Default)]
pub struct MemoryConversationStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStore for MemoryConversationStore {
    fn current(&self) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(CURRENT_KEY).cloned())
    }

    fn set_current(&self, id: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(CURRENT_KEY.to_string(), id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let store = MemoryConversationStore::new();
        assert!(store.current().is_none());
    }

    #[test]
    fn set_current_overwrites() {
        let store = MemoryConversationStore::new();
        store.set_current("first");
        store.set_current("second");
        assert_eq!(store.current(), Some("second".to_string()));
    }
}
