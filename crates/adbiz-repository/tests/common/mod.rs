//! Common test infrastructure for database integration tests.

#![allow(dead_code)]

use adbiz_config::DatabaseConfig;
use adbiz_core::telemetry::{init_tracing, LogFormat};
use adbiz_core::{MobileNumber, User, UserDraft, UserRole};
use adbiz_repository::{
    DatabasePool, DatabasePoolInterface, SqliteRelationshipLedger, SqliteShopRepository,
    SqliteUserRepository, UserRepository,
};
use std::sync::Arc;
use tempfile::TempDir;

/// Test database wrapper.
///
/// Owns a fresh SQLite database file in a temporary directory; the file is
/// removed when the wrapper is dropped.
pub struct TestDatabase {
    _dir: TempDir,
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    /// Creates a new migrated test database.
    pub async fn new() -> Self {
        Self::with_max_connections(5).await
    }

    /// Creates a new migrated test database with a pool of the given size.
    pub async fn with_max_connections(max_connections: u32) -> Self {
        let _ = init_tracing("debug", LogFormat::Pretty);

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("adbiz_test.db").display()),
            min_connections: 1,
            max_connections,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            busy_timeout_secs: 10,
            log_queries: true,
        };

        let pool = DatabasePool::new(&config)
            .await
            .expect("Failed to open test database");
        pool.run_migrations()
            .await
            .expect("Failed to run migrations");

        Self {
            _dir: dir,
            pool: Arc::new(pool),
        }
    }

    /// Returns the database pool.
    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }

    pub fn users(&self) -> SqliteUserRepository {
        SqliteUserRepository::new(self.pool.clone())
    }

    pub fn shops(&self) -> SqliteShopRepository {
        SqliteShopRepository::new(self.pool.clone())
    }

    pub fn ledger(&self) -> SqliteRelationshipLedger {
        SqliteRelationshipLedger::new(self.pool.clone())
    }

    /// Inserts an active user with the given mobile number.
    pub async fn seed_user(&self, number: &str, role: UserRole) -> User {
        self.users()
            .insert(&UserDraft::new(mobile(number), format!("User {}", number), role))
            .await
            .expect("Failed to seed user")
    }
}

pub fn mobile(s: &str) -> MobileNumber {
    MobileNumber::new(s).expect("Invalid test mobile number")
}
