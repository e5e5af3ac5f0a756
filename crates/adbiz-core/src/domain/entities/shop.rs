//! Shop entity.

use super::super::value_objects::MobileNumber;
use crate::{ShopId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A seller's shop. Each seller owns at most one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    /// Store-assigned row identifier.
    pub id: ShopId,

    /// Derived public identifier, unique across shops.
    pub shop_id: String,

    pub shop_name: String,
    pub shop_username: String,
    pub product_type: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub shop_photo: Option<String>,

    /// Owning seller.
    pub user_id: UserId,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Soft-delete timestamp (`None` = active).
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Shop {
    /// Checks if the shop is active (not soft-deleted).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Applies a partial update. Absent fields are left untouched.
    pub fn apply_changes(&mut self, changes: ShopChanges) {
        if let Some(bio) = changes.bio {
            self.bio = Some(bio);
        }
        if let Some(location) = changes.location {
            self.location = Some(location);
        }
        if let Some(photo) = changes.shop_photo {
            self.shop_photo = Some(photo);
        }
        if let Some(username) = changes.shop_username {
            self.shop_username = username;
        }
        if let Some(name) = changes.shop_name {
            self.shop_name = name;
        }
        if let Some(product_type) = changes.product_type {
            self.product_type = product_type;
        }
        self.updated_at = Utc::now();
    }
}

/// A shop that has not been committed to the store yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopDraft {
    pub shop_id: String,
    pub shop_name: String,
    pub shop_username: String,
    pub product_type: String,
    pub user_id: UserId,
}

impl ShopDraft {
    /// Creates a draft, deriving the public shop identifier from the
    /// product type, the owner's mobile number, the username and the name.
    #[must_use]
    pub fn new(
        user_id: UserId,
        owner_mobile: &MobileNumber,
        shop_name: String,
        shop_username: String,
        product_type: String,
    ) -> Self {
        let shop_id = format!(
            "{}{}{}{}",
            product_type,
            owner_mobile.as_str(),
            shop_username,
            shop_name
        );
        Self {
            shop_id,
            shop_name,
            shop_username,
            product_type,
            user_id,
        }
    }
}

/// Partial update of a shop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopChanges {
    pub bio: Option<String>,
    pub location: Option<String>,
    pub shop_photo: Option<String>,
    pub shop_username: Option<String>,
    pub shop_name: Option<String>,
    pub product_type: Option<String>,
}
