//! # Adbiz Service
//!
//! Application services for the Adbiz marketplace backend: user lifecycle,
//! shops and follow relationships, plus the entity cache that fronts the
//! user store.

pub mod cache;
pub mod container;
pub mod dto;
pub mod r#impl;
pub mod relationship_service;
pub mod shop_service;
pub mod user_service;

#[cfg(test)]
mod test_support;

pub use cache::*;
pub use container::ServiceContainer;
pub use dto::*;
pub use r#impl::*;
pub use relationship_service::*;
pub use shop_service::*;
pub use user_service::*;
