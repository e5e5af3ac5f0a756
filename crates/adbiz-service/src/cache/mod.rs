//! Caching infrastructure for the service layer.
//!
//! [`CacheInterface`] is the raw key-value client (Redis or in-process).
//! [`EntityCache`] sits on top of it and holds user snapshots and staged
//! registrations in two disjoint key namespaces. The cache is never a source
//! of truth: a miss or an error means "ask the store".

mod cache_interface;
pub mod cache_keys;
mod entity_cache;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
#[cfg(test)]
pub use cache_interface::MockCacheInterface;
pub use entity_cache::{CacheSettings, EntityCache};
pub use memory_cache::MemoryCacheService;
pub use redis_cache::{create_redis_pool, RedisCacheService};
