//! SQLite user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use adbiz_core::{AdbizError, AdbizResult, MobileNumber, User, UserDraft, UserId, UserRole};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::{debug, info};

const USER_COLUMNS: &str = "id, mobile_number, name, email, role, profile_photo, \
                            created_at, updated_at, deleted_at";

/// SQLite user repository implementation.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteUserRepository {
    /// Creates a new SQLite user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(&self, predicate: &str, mobile_or_id: Bind<'_>) -> AdbizResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE {}", USER_COLUMNS, predicate);
        let query = sqlx::query_as::<_, UserRow>(&sql);
        let query = match mobile_or_id {
            Bind::Id(id) => query.bind(id),
            Bind::Mobile(mobile) => query.bind(mobile),
        };

        let row = query.fetch_optional(self.pool.inner()).await?;
        row.map(User::try_from).transpose()
    }
}

enum Bind<'a> {
    Id(i64),
    Mobile(&'a str),
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    mobile_number: String,
    name: String,
    email: Option<String>,
    role: String,
    profile_photo: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = AdbizError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = UserRole::parse(&row.role)
            .ok_or_else(|| AdbizError::Internal(format!("Invalid role in database: {}", row.role)))?;

        Ok(User {
            id: UserId::new(row.id),
            mobile_number: MobileNumber::new_unchecked(row.mobile_number),
            name: row.name,
            email: row.email,
            role,
            profile_photo: row.profile_photo,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: UserId) -> AdbizResult<Option<User>> {
        debug!("Finding user by id: {}", id);
        self.fetch_one_where("id = ? AND deleted_at IS NULL", Bind::Id(id.into_inner()))
            .await
    }

    async fn find_by_mobile(&self, mobile: &MobileNumber) -> AdbizResult<Option<User>> {
        debug!("Finding user by mobile: {}", mobile);
        self.fetch_one_where(
            "mobile_number = ? AND deleted_at IS NULL",
            Bind::Mobile(mobile.as_str()),
        )
        .await
    }

    async fn find_by_mobile_including_deleted(
        &self,
        mobile: &MobileNumber,
    ) -> AdbizResult<Option<User>> {
        debug!("Finding user by mobile, including deleted: {}", mobile);
        self.fetch_one_where("mobile_number = ?", Bind::Mobile(mobile.as_str()))
            .await
    }

    async fn exists_by_mobile(&self, mobile: &MobileNumber) -> AdbizResult<bool> {
        let result: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM users WHERE mobile_number = ? LIMIT 1")
                .bind(mobile.as_str())
                .fetch_optional(self.pool.inner())
                .await?;

        Ok(result.is_some())
    }

    async fn insert(&self, draft: &UserDraft) -> AdbizResult<User> {
        debug!("Inserting user: {}", draft.mobile_number);
        let now = Utc::now();

        let sql = format!(
            "INSERT INTO users (mobile_number, name, email, role, profile_photo, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(draft.mobile_number.as_str())
            .bind(&draft.name)
            .bind(&draft.email)
            .bind(draft.role.as_str())
            .bind(&draft.profile_photo)
            .bind(now)
            .bind(now)
            .fetch_one(self.pool.inner())
            .await
            .map_err(|e| match AdbizError::from(e) {
                AdbizError::Conflict(_) => AdbizError::conflict(format!(
                    "Mobile number {} is already registered",
                    draft.mobile_number
                )),
                other => other,
            })?;

        let user = User::try_from(row)?;
        info!("User {} registered with mobile {}", user.id, user.mobile_number);
        Ok(user)
    }

    async fn update(&self, user: &User) -> AdbizResult<User> {
        debug!("Updating user: {}", user.id);

        let result = sqlx::query(
            r#"
            UPDATE users
            SET mobile_number = ?, name = ?, email = ?, role = ?, profile_photo = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(user.mobile_number.as_str())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(&user.profile_photo)
        .bind(user.updated_at)
        .bind(user.id.into_inner())
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AdbizError::not_found("user", user.id));
        }

        Ok(user.clone())
    }

    async fn soft_delete(&self, id: UserId) -> AdbizResult<()> {
        debug!("Soft-deleting user: {}", id);
        let now = Utc::now();
        // Dropping the transaction on an early return rolls it back.
        let mut tx = self.pool.inner().begin().await?;

        let result = sqlx::query(
            "UPDATE users SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(now)
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AdbizError::not_found("user", id));
        }

        let shops = sqlx::query(
            "UPDATE shops SET deleted_at = ?, updated_at = ? WHERE user_id = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(now)
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(
            "User {} soft-deleted ({} shop(s) deactivated)",
            id,
            shops.rows_affected()
        );
        Ok(())
    }

    async fn reactivate(&self, id: UserId) -> AdbizResult<()> {
        debug!("Reactivating user: {}", id);
        let now = Utc::now();
        let mut tx = self.pool.inner().begin().await?;

        let result = sqlx::query(
            "UPDATE users SET deleted_at = NULL, updated_at = ? WHERE id = ? AND deleted_at IS NOT NULL",
        )
        .bind(now)
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AdbizError::not_found("deleted user", id));
        }

        sqlx::query(
            "UPDATE shops SET deleted_at = NULL, updated_at = ? WHERE user_id = ? AND deleted_at IS NOT NULL",
        )
        .bind(now)
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("User {} reactivated", id);
        Ok(())
    }
}
