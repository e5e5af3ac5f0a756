//! Domain entities.

mod relationship;
mod shop;
mod user;

pub use relationship::*;
pub use shop::*;
pub use user::*;
