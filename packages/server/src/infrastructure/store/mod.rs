//! Key-value store implementations.
//!
//! - `in_memory`: process-local map for single-node deployments and tests
//! - `redis`: the shared store countdown state is persisted to in production

mod in_memory;
mod redis;

pub use in_memory::InMemoryStore;
pub use redis::RedisStore;
