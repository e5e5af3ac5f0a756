//! Value objects.

mod mobile_number;
mod role;

pub use mobile_number::*;
pub use role::*;
