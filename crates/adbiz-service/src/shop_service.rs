//! Shop service trait definition.

use crate::dto::{RegisterShopRequest, ShopResponse, UpdateShopRequest};
use adbiz_core::{AdbizResult, UserId};
use async_trait::async_trait;

/// Shop service. Only sellers own shops, one each.
#[async_trait]
pub trait ShopService: Send + Sync {
    /// Opens a shop for an existing seller.
    async fn register_shop(&self, request: RegisterShopRequest) -> AdbizResult<ShopResponse>;

    /// Gets the acting user's shop.
    async fn get_shop(&self, mobile: &str, acting_user: UserId) -> AdbizResult<ShopResponse>;

    /// Updates the acting user's shop.
    async fn update_shop(
        &self,
        mobile: &str,
        acting_user: UserId,
        request: UpdateShopRequest,
    ) -> AdbizResult<ShopResponse>;

    /// Soft-deletes the acting user's shop.
    async fn delete_shop(&self, mobile: &str, acting_user: UserId) -> AdbizResult<()>;

    /// Reactivates a seller's soft-deleted shop.
    async fn reactivate_shop(&self, mobile: &str) -> AdbizResult<ShopResponse>;
}
