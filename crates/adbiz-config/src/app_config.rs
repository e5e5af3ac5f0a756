//! Application configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Relational store configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Redis configuration.
    #[serde(default)]
    pub redis: RedisConfig,

    /// Entity cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "adbiz".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database URL.
    pub url: String,
    /// Minimum connection pool size.
    pub min_connections: u32,
    /// Maximum connection pool size.
    pub max_connections: u32,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds.
    pub idle_timeout_secs: u64,
    /// How long a connection waits on a locked database before failing.
    pub busy_timeout_secs: u64,
    /// Enable SQL statement logging.
    pub log_queries: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://adbiz.db".to_string(),
            min_connections: 1,
            max_connections: 10,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            busy_timeout_secs: 5,
            log_queries: false,
        }
    }
}

impl DatabaseConfig {
    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the idle timeout as a Duration.
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Returns the busy timeout as a Duration.
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }
}

/// Redis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Redis URL.
    pub url: String,
    /// Connection pool size.
    pub pool_size: u32,
    /// Enable Redis (can be disabled for local development).
    pub enabled: bool,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            pool_size: 10,
            enabled: true,
        }
    }
}

/// Default user snapshot TTL: 30 minutes.
pub const DEFAULT_USER_TTL_SECS: u64 = 30 * 60;

/// Default staging registration TTL: 15 minutes.
pub const DEFAULT_STAGING_TTL_SECS: u64 = 15 * 60;

/// Longest TTL the cache accepts for either namespace: 7 days.
pub const MAX_CACHE_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Default key prefix for cached user snapshots.
pub const DEFAULT_USER_KEY_PREFIX: &str = "adbiz:user:";

/// Default key prefix for staged registrations.
pub const DEFAULT_STAGING_KEY_PREFIX: &str = "adbiz:staging:user:";

/// Entity cache configuration.
///
/// Zero or over-long TTLs and empty or overlapping prefixes are tolerated here; the
/// cache layer replaces them with the defaults above.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Freshness window of a cached user snapshot, in seconds.
    pub user_ttl_secs: u64,
    /// Lifetime of a staged registration, in seconds.
    pub staging_ttl_secs: u64,
    /// Key prefix for user snapshots (keyed by user ID).
    pub user_key_prefix: String,
    /// Key prefix for staged registrations (keyed by mobile number).
    pub staging_key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            user_ttl_secs: DEFAULT_USER_TTL_SECS,
            staging_ttl_secs: DEFAULT_STAGING_TTL_SECS,
            user_key_prefix: DEFAULT_USER_KEY_PREFIX.to_string(),
            staging_key_prefix: DEFAULT_STAGING_KEY_PREFIX.to_string(),
        }
    }
}

impl CacheConfig {
    /// True when neither prefix is empty and neither is a prefix of the
    /// other, so an ID key and a mobile-number key can never coincide.
    #[must_use]
    pub fn prefixes_disjoint(&self) -> bool {
        let user = self.user_key_prefix.as_str();
        let staging = self.staging_key_prefix.as_str();
        !user.is_empty()
            && !staging.is_empty()
            && !user.starts_with(staging)
            && !staging.starts_with(user)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format (json, pretty).
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}
