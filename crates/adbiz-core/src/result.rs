//! Result type aliases for Adbiz.

use crate::AdbizError;

/// A specialized `Result` type for Adbiz operations.
pub type AdbizResult<T> = Result<T, AdbizError>;
