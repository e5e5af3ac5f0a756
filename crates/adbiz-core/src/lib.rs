//! # Adbiz Core
//!
//! Core types, domain entities, and error definitions for the Adbiz
//! marketplace backend. Every other crate in the workspace builds on the
//! error taxonomy and the entities defined here.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;
