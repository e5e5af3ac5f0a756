//! User-related DTOs.

use super::validate_mobile;
use adbiz_core::{User, UserId, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration input, used for both the staged and the single-step flow.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(custom(function = "validate_mobile"))]
    pub mobile_number: String,

    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[serde(default)]
    pub role: UserRole,

    pub profile_photo: Option<String>,
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    pub profile_photo: Option<String>,

    #[validate(custom(function = "validate_mobile"))]
    pub mobile_number: Option<String>,

    pub role: Option<UserRole>,
}

/// User response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub mobile_number: String,
    pub name: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub profile_photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            mobile_number: user.mobile_number.into(),
            name: user.name,
            email: user.email,
            role: user.role,
            profile_photo: user.profile_photo,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self::from(user.clone())
    }
}

/// Result of a mobile number check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyMobileResponse {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

/// Acknowledges a staged registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedRegistrationResponse {
    pub mobile_number: String,
    /// Seconds until the staged draft expires.
    pub expires_in_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbiz_core::MobileNumber;
    use validator::Validate;

    fn register_request(mobile: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            mobile_number: mobile.to_string(),
            name: "Asha".to_string(),
            email: None,
            role: UserRole::Buyer,
            profile_photo: None,
        }
    }

    #[test]
    fn test_register_request_valid() {
        assert!(register_request("9998887777").validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_bad_mobile() {
        assert!(register_request("99-88").validate().is_err());
    }

    #[test]
    fn test_register_request_rejects_bad_email() {
        let mut request = register_request("9998887777");
        request.email = Some("not-an-email".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_role_defaults_to_buyer() {
        let request: RegisterUserRequest =
            serde_json::from_str(r#"{"mobile_number":"9998887777","name":"Asha","email":null,"profile_photo":null}"#)
                .unwrap();
        assert_eq!(request.role, UserRole::Buyer);
    }

    #[test]
    fn test_update_request_validates_present_fields_only() {
        assert!(UpdateUserRequest::default().validate().is_ok());

        let request = UpdateUserRequest {
            mobile_number: Some("abc".to_string()),
            ..UpdateUserRequest::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_user_response_from_user() {
        let now = Utc::now();
        let user = User {
            id: UserId::new(4),
            mobile_number: MobileNumber::new_unchecked("9998887777"),
            name: "Asha".to_string(),
            email: Some("asha@example.com".to_string()),
            role: UserRole::Seller,
            profile_photo: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let response = UserResponse::from(&user);
        assert_eq!(response.id, UserId::new(4));
        assert_eq!(response.mobile_number, "9998887777");
        assert_eq!(response.role, UserRole::Seller);
    }
}
