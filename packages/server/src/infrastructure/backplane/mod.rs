//! Pub/sub backplane implementations.
//!
//! - `in_process`: channel-based fan-out for single-node deployments and
//!   tests
//! - `redis`: Redis pub/sub, for horizontal scaling across OS processes

mod in_process;
mod redis;

pub use in_process::InProcessBackplane;
pub use redis::RedisBackplane;
