//! Data Transfer Objects (DTOs).

mod relationship_dto;
mod shop_dto;
mod user_dto;

pub use relationship_dto::*;
pub use shop_dto::*;
pub use user_dto::*;

use adbiz_core::MobileNumber;
use validator::ValidationError;

/// Field validator for mobile numbers carried as plain strings.
pub(crate) fn validate_mobile(value: &str) -> Result<(), ValidationError> {
    MobileNumber::new(value).map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("invalid_mobile");
        error.message = Some("Invalid mobile number".into());
        error
    })
}
