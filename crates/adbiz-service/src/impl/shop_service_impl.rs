//! Shop service implementation.

use crate::dto::{RegisterShopRequest, ShopResponse, UpdateShopRequest};
use crate::shop_service::ShopService;
use adbiz_core::{
    parse_mobile, AdbizError, AdbizResult, Shop, ShopChanges, ShopDraft, User, UserId,
    ValidateExt,
};
use adbiz_repository::{ShopRepository, UserRepository};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Shop service backed by the user and shop repositories.
#[derive(Clone)]
pub struct ShopServiceImpl {
    users: Arc<dyn UserRepository>,
    shops: Arc<dyn ShopRepository>,
}

impl ShopServiceImpl {
    /// Creates a new shop service.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, shops: Arc<dyn ShopRepository>) -> Self {
        Self { users, shops }
    }

    async fn seller(&self, mobile: &str) -> AdbizResult<User> {
        let mobile = parse_mobile(mobile)?;
        let user = self
            .users
            .find_by_mobile(&mobile)
            .await?
            .ok_or_else(|| AdbizError::not_found("user", &mobile))?;

        if !user.is_seller() {
            return Err(AdbizError::validation(format!(
                "User '{}' is not a seller",
                mobile
            )));
        }
        Ok(user)
    }

    async fn owned_shop(&self, mobile: &str, acting_user: UserId) -> AdbizResult<Shop> {
        let mobile = parse_mobile(mobile)?;
        let user = self
            .users
            .find_by_mobile(&mobile)
            .await?
            .ok_or_else(|| AdbizError::not_found("user", &mobile))?;

        if !user.is_owned_by(acting_user) {
            return Err(AdbizError::forbidden(format!(
                "User {} may not act on the shop of {}",
                acting_user, mobile
            )));
        }

        self.shops
            .find_by_owner(user.id)
            .await?
            .ok_or_else(|| AdbizError::not_found("shop", &mobile))
    }
}

#[async_trait]
impl ShopService for ShopServiceImpl {
    async fn register_shop(&self, request: RegisterShopRequest) -> AdbizResult<ShopResponse> {
        debug!("Registering shop for: {}", request.mobile_number);

        request.validate_request()?;
        let owner = self.seller(&request.mobile_number).await?;

        if self
            .shops
            .find_by_owner_including_deleted(owner.id)
            .await?
            .is_some()
        {
            return Err(AdbizError::conflict(format!(
                "User '{}' already owns a shop",
                owner.mobile_number
            )));
        }

        let draft = ShopDraft::new(
            owner.id,
            &owner.mobile_number,
            request.shop_name,
            request.shop_username,
            request.product_type,
        );
        let shop = self.shops.insert(&draft).await?;

        info!("Shop registered: {} for user {}", shop.shop_id, owner.id);
        Ok(ShopResponse::from(shop))
    }

    async fn get_shop(&self, mobile: &str, acting_user: UserId) -> AdbizResult<ShopResponse> {
        debug!("Getting shop of: {}", mobile);

        let shop = self.owned_shop(mobile, acting_user).await?;
        Ok(ShopResponse::from(shop))
    }

    async fn update_shop(
        &self,
        mobile: &str,
        acting_user: UserId,
        request: UpdateShopRequest,
    ) -> AdbizResult<ShopResponse> {
        debug!("Updating shop of: {}", mobile);

        request.validate_request()?;
        let mut shop = self.owned_shop(mobile, acting_user).await?;

        shop.apply_changes(ShopChanges {
            bio: request.bio,
            location: request.location,
            shop_photo: request.shop_photo,
            shop_username: request.shop_username,
            shop_name: request.shop_name,
            product_type: request.product_type,
        });

        let updated = self.shops.update(&shop).await?;

        info!("Shop updated: {}", updated.shop_id);
        Ok(ShopResponse::from(updated))
    }

    async fn delete_shop(&self, mobile: &str, acting_user: UserId) -> AdbizResult<()> {
        debug!("Deleting shop of: {}", mobile);

        self.seller(mobile).await?;
        let shop = self.owned_shop(mobile, acting_user).await?;
        self.shops.soft_delete(shop.id).await?;

        info!("Shop soft-deleted: {}", shop.shop_id);
        Ok(())
    }

    async fn reactivate_shop(&self, mobile: &str) -> AdbizResult<ShopResponse> {
        debug!("Reactivating shop of: {}", mobile);

        let owner = self.seller(mobile).await?;
        let shop = self
            .shops
            .find_by_owner_including_deleted(owner.id)
            .await?
            .ok_or_else(|| AdbizError::not_found("shop", &owner.mobile_number))?;

        if shop.is_active() {
            return Err(AdbizError::validation(format!(
                "Shop '{}' is already active",
                shop.shop_id
            )));
        }

        self.shops.reactivate(shop.id).await?;
        let shop = self
            .shops
            .find_by_owner(owner.id)
            .await?
            .ok_or_else(|| AdbizError::not_found("shop", &owner.mobile_number))?;

        info!("Shop reactivated: {}", shop.shop_id);
        Ok(ShopResponse::from(shop))
    }
}

impl std::fmt::Debug for ShopServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopServiceImpl").finish_non_exhaustive()
    }
}
