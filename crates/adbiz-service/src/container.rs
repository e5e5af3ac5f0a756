//! Service wiring.
//!
//! Builds the store, the cache backend and every service from an
//! [`AppConfig`]. The HTTP layer resolves its services from here.

use crate::cache::{
    create_redis_pool, CacheInterface, EntityCache, MemoryCacheService, RedisCacheService,
};
use crate::r#impl::{RelationshipServiceImpl, ShopServiceImpl, UserServiceImpl};
use crate::relationship_service::RelationshipService;
use crate::shop_service::ShopService;
use crate::user_service::UserService;
use adbiz_config::{AppConfig, CacheConfig};
use adbiz_core::AdbizResult;
use adbiz_repository::{
    create_pool, DatabasePoolInterface, SqliteRelationshipLedger, SqliteShopRepository,
    SqliteUserRepository,
};
use std::sync::Arc;
use tracing::info;

/// Fully wired services sharing one pool and one cache.
#[derive(Clone)]
pub struct ServiceContainer {
    pool: Arc<dyn DatabasePoolInterface>,
    cache: EntityCache,
    users: Arc<dyn UserService>,
    shops: Arc<dyn ShopService>,
    relationships: Arc<dyn RelationshipService>,
}

impl ServiceContainer {
    /// Opens the database (running migrations) and the cache, then wires
    /// the services.
    ///
    /// With Redis disabled the in-process cache is used instead, so staged
    /// registrations still work on a single node.
    pub async fn build(config: &AppConfig) -> AdbizResult<Self> {
        let pool: Arc<dyn DatabasePoolInterface> = create_pool(&config.database).await?;

        let backend: Arc<dyn CacheInterface> = match create_redis_pool(&config.redis)? {
            Some(redis) => Arc::new(RedisCacheService::new(redis)),
            None => {
                info!("Using in-process entity cache");
                Arc::new(MemoryCacheService::new())
            }
        };

        Ok(Self::from_parts(pool, backend, &config.cache))
    }

    /// Wires the services over an existing pool and cache backend.
    #[must_use]
    pub fn from_parts(
        pool: Arc<dyn DatabasePoolInterface>,
        backend: Arc<dyn CacheInterface>,
        cache_config: &CacheConfig,
    ) -> Self {
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let shop_repository = Arc::new(SqliteShopRepository::new(pool.clone()));
        let ledger = Arc::new(SqliteRelationshipLedger::new(pool.clone()));
        let cache = EntityCache::from_config(backend, cache_config);

        let users = Arc::new(UserServiceImpl::new(user_repository.clone(), cache.clone()));
        let shops = Arc::new(ShopServiceImpl::new(
            user_repository.clone(),
            shop_repository,
        ));
        let relationships = Arc::new(RelationshipServiceImpl::new(user_repository, ledger));

        Self {
            pool,
            cache,
            users,
            shops,
            relationships,
        }
    }

    #[must_use]
    pub fn users(&self) -> Arc<dyn UserService> {
        self.users.clone()
    }

    #[must_use]
    pub fn shops(&self) -> Arc<dyn ShopService> {
        self.shops.clone()
    }

    #[must_use]
    pub fn relationships(&self) -> Arc<dyn RelationshipService> {
        self.relationships.clone()
    }

    #[must_use]
    pub fn cache(&self) -> &EntityCache {
        &self.cache
    }

    /// Checks that the store answers.
    pub async fn health_check(&self) -> AdbizResult<()> {
        self.pool.health_check().await
    }

    /// Closes the database pool.
    pub async fn shutdown(&self) {
        self.pool.close().await;
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
