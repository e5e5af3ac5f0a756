//! User entity.

use super::super::value_objects::{MobileNumber, UserRole};
use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity: the identity record of a buyer or seller.
///
/// Users are never hard-deleted. `deleted_at` is set by a soft delete and
/// cleared again on reactivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier, immutable.
    pub id: UserId,

    /// Unique mobile number.
    pub mobile_number: MobileNumber,

    /// Display name.
    pub name: String,

    /// Optional email address.
    pub email: Option<String>,

    /// Marketplace role.
    pub role: UserRole,

    /// Optional profile photo reference.
    pub profile_photo: Option<String>,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,

    /// Soft-delete timestamp (`None` = active).
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Checks if the user is active (not soft-deleted).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Checks if the user is a seller.
    #[must_use]
    pub const fn is_seller(&self) -> bool {
        matches!(self.role, UserRole::Seller)
    }

    /// Checks if `actor` is this user.
    #[must_use]
    pub fn is_owned_by(&self, actor: UserId) -> bool {
        self.id == actor
    }

    /// Applies a partial update. Absent fields are left untouched.
    pub fn apply_changes(&mut self, changes: UserChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = Some(email);
        }
        if let Some(photo) = changes.profile_photo {
            self.profile_photo = Some(photo);
        }
        if let Some(mobile) = changes.mobile_number {
            self.mobile_number = mobile;
        }
        if let Some(role) = changes.role {
            self.role = role;
        }
        self.updated_at = Utc::now();
    }
}

/// A user that has not been committed to the store yet.
///
/// Doubles as the staging record held in the cache between registration
/// steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub mobile_number: MobileNumber,
    pub name: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub profile_photo: Option<String>,
}

impl UserDraft {
    /// Creates a draft with the mandatory registration fields.
    #[must_use]
    pub fn new(mobile_number: MobileNumber, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            mobile_number,
            name: name.into(),
            email: None,
            role,
            profile_photo: None,
        }
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }
}

/// Partial update of a user's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile_photo: Option<String>,
    pub mobile_number: Option<MobileNumber>,
    pub role: Option<UserRole>,
}
