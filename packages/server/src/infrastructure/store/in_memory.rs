//! In-memory key-value store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{KeyValueStore, StoreError};

/// Process-local store backed by a map. Countdown state kept here does not
/// survive the process and is invisible to other nodes; use the Redis store
/// for multi-process deployments.
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().await;
        Ok(entries.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get_returns_value() {
        // Test: a stored value is readable under its key
        // given:
        let store = InMemoryStore::new();

        // when:
        store.set("timer:timer_lobby", "30").await.unwrap();

        // then:
        assert_eq!(
            store.get("timer:timer_lobby").await.unwrap(),
            Some("30".to_string())
        );
    }

    #[tokio::test]
    async fn test_get_missing_key_returns_none() {
        // Test: reading an absent key yields None
        // given:
        let store = InMemoryStore::new();

        // when:
        let value = store.get("timer:timer_lobby").await.unwrap();

        // then:
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_value() {
        // Test: a second set replaces the stored value
        // given:
        let store = InMemoryStore::new();
        store.set("timer:timer_lobby", "30").await.unwrap();

        // when:
        store.set("timer:timer_lobby", "29").await.unwrap();

        // then:
        assert_eq!(
            store.get("timer:timer_lobby").await.unwrap(),
            Some("29".to_string())
        );
    }

    #[tokio::test]
    async fn test_delete_removes_key_and_is_idempotent() {
        // Test: delete removes the key; deleting again is a no-op
        // given:
        let store = InMemoryStore::new();
        store.set("timer:timer_lobby", "30").await.unwrap();

        // when:
        store.delete("timer:timer_lobby").await.unwrap();

        // then:
        assert_eq!(store.get("timer:timer_lobby").await.unwrap(), None);
        assert!(store.delete("timer:timer_lobby").await.is_ok());
    }
}
