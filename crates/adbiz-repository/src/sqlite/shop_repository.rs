//! SQLite shop repository implementation.

use crate::{traits::ShopRepository, DatabasePoolInterface};
use adbiz_core::{AdbizError, AdbizResult, Shop, ShopDraft, ShopId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::{debug, info};

const SHOP_COLUMNS: &str = "id, shop_id, shop_name, shop_username, product_type, bio, location, \
                            shop_photo, user_id, created_at, updated_at, deleted_at";

/// SQLite shop repository implementation.
#[derive(Clone)]
pub struct SqliteShopRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteShopRepository {
    /// Creates a new SQLite shop repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn set_deleted_at(
        &self,
        id: ShopId,
        deleted_at: Option<DateTime<Utc>>,
    ) -> AdbizResult<u64> {
        let guard = if deleted_at.is_some() {
            "deleted_at IS NULL"
        } else {
            "deleted_at IS NOT NULL"
        };
        let sql = format!(
            "UPDATE shops SET deleted_at = ?, updated_at = ? WHERE id = ? AND {}",
            guard
        );

        let result = sqlx::query(&sql)
            .bind(deleted_at)
            .bind(Utc::now())
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }
}

/// Database row representation of a shop.
#[derive(Debug, FromRow)]
struct ShopRow {
    id: i64,
    shop_id: String,
    shop_name: String,
    shop_username: String,
    product_type: String,
    bio: Option<String>,
    location: Option<String>,
    shop_photo: Option<String>,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<ShopRow> for Shop {
    fn from(row: ShopRow) -> Self {
        Shop {
            id: ShopId::new(row.id),
            shop_id: row.shop_id,
            shop_name: row.shop_name,
            shop_username: row.shop_username,
            product_type: row.product_type,
            bio: row.bio,
            location: row.location,
            shop_photo: row.shop_photo,
            user_id: UserId::new(row.user_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

#[async_trait]
impl ShopRepository for SqliteShopRepository {
    async fn find_by_owner(&self, user_id: UserId) -> AdbizResult<Option<Shop>> {
        debug!("Finding shop by owner: {}", user_id);

        let sql = format!(
            "SELECT {} FROM shops WHERE user_id = ? AND deleted_at IS NULL",
            SHOP_COLUMNS
        );
        let row = sqlx::query_as::<_, ShopRow>(&sql)
            .bind(user_id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Shop::from))
    }

    async fn find_by_owner_including_deleted(&self, user_id: UserId) -> AdbizResult<Option<Shop>> {
        debug!("Finding shop by owner, including deleted: {}", user_id);

        let sql = format!("SELECT {} FROM shops WHERE user_id = ?", SHOP_COLUMNS);
        let row = sqlx::query_as::<_, ShopRow>(&sql)
            .bind(user_id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Shop::from))
    }

    async fn insert(&self, draft: &ShopDraft) -> AdbizResult<Shop> {
        debug!("Inserting shop {} for user {}", draft.shop_id, draft.user_id);
        let now = Utc::now();

        let sql = format!(
            "INSERT INTO shops (shop_id, shop_name, shop_username, product_type, user_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {}",
            SHOP_COLUMNS
        );
        let row = sqlx::query_as::<_, ShopRow>(&sql)
            .bind(&draft.shop_id)
            .bind(&draft.shop_name)
            .bind(&draft.shop_username)
            .bind(&draft.product_type)
            .bind(draft.user_id.into_inner())
            .bind(now)
            .bind(now)
            .fetch_one(self.pool.inner())
            .await
            .map_err(|e| match AdbizError::from(e) {
                AdbizError::Conflict(_) => AdbizError::conflict(format!(
                    "User {} already has a shop",
                    draft.user_id
                )),
                other => other,
            })?;

        let shop = Shop::from(row);
        info!("Shop {} registered for user {}", shop.shop_id, shop.user_id);
        Ok(shop)
    }

    async fn update(&self, shop: &Shop) -> AdbizResult<Shop> {
        debug!("Updating shop: {}", shop.id);

        let result = sqlx::query(
            r#"
            UPDATE shops
            SET shop_name = ?, shop_username = ?, product_type = ?, bio = ?, location = ?,
                shop_photo = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&shop.shop_name)
        .bind(&shop.shop_username)
        .bind(&shop.product_type)
        .bind(&shop.bio)
        .bind(&shop.location)
        .bind(&shop.shop_photo)
        .bind(shop.updated_at)
        .bind(shop.id.into_inner())
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AdbizError::not_found("shop", shop.id));
        }

        Ok(shop.clone())
    }

    async fn soft_delete(&self, id: ShopId) -> AdbizResult<()> {
        debug!("Soft-deleting shop: {}", id);
        if self.set_deleted_at(id, Some(Utc::now())).await? == 0 {
            return Err(AdbizError::not_found("shop", id));
        }
        info!("Shop {} soft-deleted", id);
        Ok(())
    }

    async fn reactivate(&self, id: ShopId) -> AdbizResult<()> {
        debug!("Reactivating shop: {}", id);
        if self.set_deleted_at(id, None).await? == 0 {
            return Err(AdbizError::not_found("deleted shop", id));
        }
        info!("Shop {} reactivated", id);
        Ok(())
    }
}
