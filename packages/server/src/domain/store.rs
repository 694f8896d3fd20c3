//! Shared key-value store interface.

use async_trait::async_trait;

use super::error::StoreError;

/// Network-accessible key-value store with per-key atomicity and no
/// transaction semantics. Used to persist a room's countdown state so it is
/// readable by any server process.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
