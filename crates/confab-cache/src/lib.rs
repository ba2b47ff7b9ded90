//! Caching infrastructure for the Confab read path.
//!
//! This crate provides the cache-store abstraction with Redis and in-memory
//! implementations, the deterministic cache-key registry, the per-namespace
//! TTL policy table, and the event-driven invalidation dispatcher.

mod invalidation;
pub mod keys;
mod memory;
mod redis;
mod store;
mod ttl;

pub use invalidation::{keys_for, InvalidationDispatcher};
pub use memory::MemoryCacheStore;
pub use redis::RedisCacheStore;
pub use store::{CacheStore, CacheStoreExt};
pub use ttl::Namespace;
