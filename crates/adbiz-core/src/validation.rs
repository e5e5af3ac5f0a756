//! Validation utilities.

use crate::{AdbizError, FieldError, MobileNumber};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns an `AdbizError` on failure.
    fn validate_request(&self) -> Result<(), AdbizError> {
        self.validate().map_err(validation_errors_to_adbiz_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `AdbizError`.
#[must_use]
pub fn validation_errors_to_adbiz_error(errors: ValidationErrors) -> AdbizError {
    let field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect();

    let message = field_errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    AdbizError::Validation(message)
}

/// Parses a mobile number supplied by a caller, mapping failures to
/// `AdbizError::Validation`.
pub fn parse_mobile(raw: &str) -> Result<MobileNumber, AdbizError> {
    MobileNumber::new(raw).map_err(|e| AdbizError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
    }

    #[test]
    fn test_validate_request_maps_to_validation_error() {
        let err = Probe { name: String::new() }.validate_request().unwrap_err();
        match err {
            AdbizError::Validation(message) => assert!(message.contains("Name is required")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_mobile() {
        assert!(parse_mobile("9998887777").is_ok());
        assert!(matches!(parse_mobile("abc"), Err(AdbizError::Validation(_))));
    }
}
