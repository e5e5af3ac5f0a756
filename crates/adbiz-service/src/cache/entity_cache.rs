//! Entity cache: user snapshots and staged registrations.
//!
//! Every method reports cache failures as `AdbizError::Cache`. Callers log
//! them and carry on against the store; nothing here is authoritative.

use super::cache_keys::KeySpace;
use super::{CacheExt, CacheInterface};
use adbiz_config::{
    CacheConfig, DEFAULT_STAGING_TTL_SECS, DEFAULT_USER_TTL_SECS, MAX_CACHE_TTL_SECS,
};
use adbiz_core::{AdbizError, AdbizResult, MobileNumber, User, UserDraft, UserId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Normalized cache settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub user_ttl: Duration,
    pub staging_ttl: Duration,
    pub keys: KeySpace,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            user_ttl: Duration::from_secs(DEFAULT_USER_TTL_SECS),
            staging_ttl: Duration::from_secs(DEFAULT_STAGING_TTL_SECS),
            keys: KeySpace::default(),
        }
    }
}

impl CacheSettings {
    /// Builds settings from configuration.
    ///
    /// A zero TTL, or one longer than `MAX_CACHE_TTL_SECS`, falls back to
    /// its default (30 minutes for users, 15 for staging). Empty or
    /// overlapping prefixes fall back to the default pair.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        let defaults = Self::default();

        let user_ttl = ttl_or_default(
            "cache.user_ttl_secs",
            config.user_ttl_secs,
            defaults.user_ttl,
        );
        let staging_ttl = ttl_or_default(
            "cache.staging_ttl_secs",
            config.staging_ttl_secs,
            defaults.staging_ttl,
        );

        let keys = KeySpace::new(
            config.user_key_prefix.as_str(),
            config.staging_key_prefix.as_str(),
        )
        .unwrap_or_else(|| {
            warn!(
                "Cache key prefixes '{}' and '{}' are empty or overlap; using defaults",
                config.user_key_prefix, config.staging_key_prefix
            );
            defaults.keys
        });

        Self {
            user_ttl,
            staging_ttl,
            keys,
        }
    }
}

fn ttl_or_default(name: &str, secs: u64, default: Duration) -> Duration {
    if secs == 0 || secs > MAX_CACHE_TTL_SECS {
        warn!("{} is {}; using {}s", name, secs, default.as_secs());
        default
    } else {
        Duration::from_secs(secs)
    }
}

/// Typed cache for the entities the services read hot.
#[derive(Clone)]
pub struct EntityCache {
    cache: Arc<dyn CacheInterface>,
    settings: CacheSettings,
}

impl EntityCache {
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>, settings: CacheSettings) -> Self {
        Self { cache, settings }
    }

    #[must_use]
    pub fn from_config(cache: Arc<dyn CacheInterface>, config: &CacheConfig) -> Self {
        Self::new(cache, CacheSettings::from_config(config))
    }

    #[must_use]
    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// Stores a snapshot of `user` under its ID, replacing any previous one.
    pub async fn put_user(&self, user: &User) -> AdbizResult<()> {
        let key = self.settings.keys.user(user.id);
        self.cache
            .set(&key, user, self.settings.user_ttl)
            .await
            .map_err(into_cache_error)
    }

    /// Returns the cached snapshot, or `None` when it is not cached.
    ///
    /// `None` says nothing about whether the user exists.
    pub async fn get_user(&self, id: UserId) -> AdbizResult<Option<User>> {
        let key = self.settings.keys.user(id);
        self.cache.get::<User>(&key).await.map_err(into_cache_error)
    }

    /// Drops the cached snapshot of a user.
    pub async fn invalidate_user(&self, id: UserId) -> AdbizResult<()> {
        let key = self.settings.keys.user(id);
        let removed = self.cache.delete(&key).await.map_err(into_cache_error)?;
        debug!("Invalidated cached user {} (present: {})", id, removed);
        Ok(())
    }

    /// Stages a registration draft under its mobile number.
    pub async fn put_staging(&self, draft: &UserDraft) -> AdbizResult<()> {
        let key = self.settings.keys.staging(&draft.mobile_number);
        self.cache
            .set(&key, draft, self.settings.staging_ttl)
            .await
            .map_err(into_cache_error)
    }

    /// Returns the staged draft for a mobile number, if it has not expired.
    pub async fn get_staging(&self, mobile: &MobileNumber) -> AdbizResult<Option<UserDraft>> {
        let key = self.settings.keys.staging(mobile);
        self.cache
            .get::<UserDraft>(&key)
            .await
            .map_err(into_cache_error)
    }

    /// Removes a staged draft.
    pub async fn remove_staging(&self, mobile: &MobileNumber) -> AdbizResult<()> {
        let key = self.settings.keys.staging(mobile);
        self.cache.delete(&key).await.map_err(into_cache_error)?;
        Ok(())
    }
}

impl std::fmt::Debug for EntityCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityCache")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Undecodable entries and the like count as cache failures too.
fn into_cache_error(err: AdbizError) -> AdbizError {
    match err {
        AdbizError::Cache(_) => err,
        other => AdbizError::Cache(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryCacheService, MockCacheInterface};
    use adbiz_core::UserRole;
    use chrono::Utc;

    fn user(id: i64, mobile: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(id),
            mobile_number: MobileNumber::new_unchecked(mobile),
            name: "Asha".to_string(),
            email: None,
            role: UserRole::Buyer,
            profile_photo: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn memory_cache(settings: CacheSettings) -> (Arc<MemoryCacheService>, EntityCache) {
        let backend = Arc::new(MemoryCacheService::new());
        let cache = EntityCache::new(backend.clone(), settings);
        (backend, cache)
    }

    #[test]
    fn test_settings_fall_back_on_zero_ttl() {
        let settings = CacheSettings::from_config(&CacheConfig {
            user_ttl_secs: 0,
            staging_ttl_secs: 0,
            ..CacheConfig::default()
        });
        assert_eq!(settings.user_ttl, Duration::from_secs(1800));
        assert_eq!(settings.staging_ttl, Duration::from_secs(900));
    }

    #[tokio::test]
    async fn test_settings_fall_back_on_oversized_ttl() {
        let settings = CacheSettings::from_config(&CacheConfig {
            user_ttl_secs: u64::MAX,
            staging_ttl_secs: MAX_CACHE_TTL_SECS + 1,
            ..CacheConfig::default()
        });
        assert_eq!(settings.user_ttl, Duration::from_secs(1800));
        assert_eq!(settings.staging_ttl, Duration::from_secs(900));

        let (_, cache) = memory_cache(settings);
        let user = user(8, "9998887777");
        cache.put_user(&user).await.unwrap();
        assert_eq!(cache.get_user(user.id).await.unwrap(), Some(user));
    }

    #[test]
    fn test_settings_fall_back_on_overlapping_prefixes() {
        let settings = CacheSettings::from_config(&CacheConfig {
            user_key_prefix: "user:".to_string(),
            staging_key_prefix: "user:".to_string(),
            ..CacheConfig::default()
        });
        assert_eq!(settings.keys, KeySpace::default());
    }

    #[test]
    fn test_settings_keep_valid_values() {
        let settings = CacheSettings::from_config(&CacheConfig {
            user_ttl_secs: 60,
            staging_ttl_secs: 30,
            user_key_prefix: "u:".to_string(),
            staging_key_prefix: "s:".to_string(),
        });
        assert_eq!(settings.user_ttl, Duration::from_secs(60));
        assert_eq!(settings.keys.user(UserId::new(1)), "u:1");
    }

    #[tokio::test]
    async fn test_put_then_get_user() {
        let (_, cache) = memory_cache(CacheSettings::default());
        let user = user(5, "9998887777");

        cache.put_user(&user).await.unwrap();
        assert_eq!(cache.get_user(user.id).await.unwrap(), Some(user));
    }

    #[tokio::test(start_paused = true)]
    async fn test_user_snapshot_expires() {
        let (_, cache) = memory_cache(CacheSettings {
            user_ttl: Duration::from_secs(1),
            ..CacheSettings::default()
        });
        let user = user(5, "9998887777");

        cache.put_user(&user).await.unwrap();
        tokio::time::advance(Duration::from_secs(2)).await;

        assert!(cache.get_user(user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalidate_user_then_miss() {
        let (_, cache) = memory_cache(CacheSettings::default());
        let user = user(5, "9998887777");

        cache.put_user(&user).await.unwrap();
        cache.invalidate_user(user.id).await.unwrap();
        assert!(cache.get_user(user.id).await.unwrap().is_none());

        // Invalidating a missing entry is fine.
        cache.invalidate_user(user.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_staging_and_user_namespaces_are_disjoint() {
        let (backend, cache) = memory_cache(CacheSettings::default());
        let mobile = MobileNumber::new_unchecked("9998887777");
        let draft = UserDraft::new(mobile.clone(), "Draft", UserRole::Seller);
        let committed = user(9_998_887_777, "1112223333");

        cache.put_staging(&draft).await.unwrap();
        cache.put_user(&committed).await.unwrap();

        assert_eq!(backend.len(), 2);
        assert_eq!(cache.get_staging(&mobile).await.unwrap(), Some(draft));
        assert_eq!(cache.get_user(committed.id).await.unwrap(), Some(committed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_staging_expires_and_can_be_removed() {
        let (_, cache) = memory_cache(CacheSettings::default());
        let mobile = MobileNumber::new_unchecked("9998887777");
        let draft = UserDraft::new(mobile.clone(), "Draft", UserRole::Buyer);

        cache.put_staging(&draft).await.unwrap();
        cache.remove_staging(&mobile).await.unwrap();
        assert!(cache.get_staging(&mobile).await.unwrap().is_none());

        cache.put_staging(&draft).await.unwrap();
        tokio::time::advance(Duration::from_secs(14 * 60)).await;
        assert!(cache.get_staging(&mobile).await.unwrap().is_some());
        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(cache.get_staging(&mobile).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_a_cache_error() {
        let (backend, cache) = memory_cache(CacheSettings::default());
        backend
            .set_raw("adbiz:user:5", "not json", Duration::from_secs(60))
            .await
            .unwrap();

        let err = cache.get_user(UserId::new(5)).await.unwrap_err();
        assert!(matches!(err, AdbizError::Cache(_)));
    }

    #[tokio::test]
    async fn test_backend_failure_surfaces_as_cache_error() {
        let mut backend = MockCacheInterface::new();
        backend
            .expect_get_raw()
            .returning(|_| Err(AdbizError::cache("connection refused")));

        let cache = EntityCache::new(Arc::new(backend), CacheSettings::default());
        let err = cache.get_user(UserId::new(5)).await.unwrap_err();
        assert!(matches!(err, AdbizError::Cache(_)));
    }
}
