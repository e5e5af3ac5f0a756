//! SQLite repository implementations.

mod relationship_ledger;
mod shop_repository;
mod user_repository;

pub use relationship_ledger::SqliteRelationshipLedger;
pub use shop_repository::SqliteShopRepository;
pub use user_repository::SqliteUserRepository;
