//! Mobile number value object.
//!
//! The mobile number is the public identity of a user: registration, lookups
//! and both relationship lists are keyed by it.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Minimum number of digits accepted.
const MIN_DIGITS: usize = 7;

/// Maximum number of digits accepted (E.164).
const MAX_DIGITS: usize = 15;

/// Error type for mobile number validation.
#[derive(Debug, Error)]
#[error("Invalid mobile number: {0}")]
pub struct MobileNumberError(String);

/// Mobile number value object with validation.
///
/// Accepts an optional leading `+` followed by 7 to 15 ASCII digits.
/// Surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Creates a new mobile number after validating the format.
    pub fn new(mobile: impl Into<String>) -> Result<Self, MobileNumberError> {
        let mobile = mobile.into().trim().to_string();
        let digits = mobile.strip_prefix('+').unwrap_or(&mobile);

        let valid_length = (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len());
        if !valid_length || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MobileNumberError(mobile));
        }

        Ok(Self(mobile))
    }

    /// Creates a mobile number without validation (for trusted sources).
    ///
    /// Only use this for values read back from the store, where the number
    /// was validated on the way in.
    #[must_use]
    pub fn new_unchecked(mobile: impl Into<String>) -> Self {
        Self(mobile.into())
    }

    /// Returns the mobile number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for MobileNumber {
    type Error = MobileNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MobileNumber> for String {
    fn from(mobile: MobileNumber) -> Self {
        mobile.0
    }
}

impl AsRef<str> for MobileNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
