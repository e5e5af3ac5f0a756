//! Shop-related DTOs.

use super::validate_mobile;
use adbiz_core::{Shop, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to open a shop for an existing seller.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterShopRequest {
    #[validate(custom(function = "validate_mobile"))]
    pub mobile_number: String,

    #[validate(length(min = 1, max = 128, message = "Shop name must be 1-128 characters"))]
    pub shop_name: String,

    #[validate(length(min = 1, max = 64, message = "Shop username must be 1-64 characters"))]
    pub shop_username: String,

    #[validate(length(min = 1, max = 64, message = "Product type is required"))]
    pub product_type: String,
}

/// Partial shop update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateShopRequest {
    #[validate(length(max = 500))]
    pub bio: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    pub shop_photo: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub shop_username: Option<String>,

    #[validate(length(min = 1, max = 128))]
    pub shop_name: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub product_type: Option<String>,
}

/// Shop response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopResponse {
    pub shop_id: String,
    pub shop_name: String,
    pub shop_username: String,
    pub product_type: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub shop_photo: Option<String>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Shop> for ShopResponse {
    fn from(shop: Shop) -> Self {
        Self {
            shop_id: shop.shop_id,
            shop_name: shop.shop_name,
            shop_username: shop.shop_username,
            product_type: shop.product_type,
            bio: shop.bio,
            location: shop.location,
            shop_photo: shop.shop_photo,
            user_id: shop.user_id,
            created_at: shop.created_at,
            updated_at: shop.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_shop_request_requires_fields() {
        let request = RegisterShopRequest {
            mobile_number: "9998887777".to_string(),
            shop_name: String::new(),
            shop_username: "spicehub".to_string(),
            product_type: "food".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_shop_request_rejects_empty_name() {
        let request = UpdateShopRequest {
            shop_name: Some(String::new()),
            ..UpdateShopRequest::default()
        };
        assert!(request.validate().is_err());
        assert!(UpdateShopRequest::default().validate().is_ok());
    }
}
