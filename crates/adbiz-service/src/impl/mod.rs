//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `user_service.rs`).

pub mod relationship_service_impl;
pub mod shop_service_impl;
pub mod user_service_impl;

pub use relationship_service_impl::RelationshipServiceImpl;
pub use shop_service_impl::ShopServiceImpl;
pub use user_service_impl::UserServiceImpl;
