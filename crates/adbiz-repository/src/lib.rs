//! # Adbiz Repository
//!
//! SQLite-backed entity store for users, shops and relationship lists.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository> / Arc<dyn RelationshipLedger>
//! SqliteUserRepository, SqliteRelationshipLedger, ...
//!   ↓  Arc<dyn DatabasePoolInterface>
//! SQLite (WAL)
//! ```

pub mod pool;
pub mod sqlite;
pub mod traits;

pub use pool::*;
pub use sqlite::*;
pub use traits::*;
