//! SQLite relationship ledger.
//!
//! A follow edge lives in two rows of `relationship_lists`: the follower's
//! `following` row and the target's `followers` row. Both are read, changed
//! and written inside one `BEGIN IMMEDIATE` transaction, so concurrent
//! follows touching the same row are serialized by the database write lock
//! and a failure on either side leaves neither side changed.

use crate::{traits::RelationshipLedger, DatabasePoolInterface};
use adbiz_core::{
    AdbizError, AdbizResult, FollowOutcome, ListChange, MobileNumber, RelationshipDirection,
    RelationshipList, UserId,
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, SqliteConnection};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// SQLite relationship ledger.
#[derive(Clone)]
pub struct SqliteRelationshipLedger {
    pool: Arc<dyn DatabasePoolInterface>,
}

/// Database row representation of a relationship list.
#[derive(Debug, FromRow)]
struct ListRow {
    id: i64,
    entry_count: i64,
    mobile_numbers: String,
}

/// A list row as found inside the transaction.
enum ListSlot {
    Existing { row_id: i64, list: RelationshipList },
    Vacant,
}

impl SqliteRelationshipLedger {
    /// Creates a new ledger over the given pool.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn apply_follow(
        conn: &mut SqliteConnection,
        follower: &MobileNumber,
        target: &MobileNumber,
    ) -> AdbizResult<FollowOutcome> {
        let follower_id = Self::active_user_id(conn, follower).await?;
        let target_id = Self::active_user_id(conn, target).await?;

        let following =
            Self::append(conn, follower_id, RelationshipDirection::Following, target).await?;
        let followers =
            Self::append(conn, target_id, RelationshipDirection::Followers, follower).await?;

        Ok(FollowOutcome {
            following,
            followers,
        })
    }

    async fn active_user_id(
        conn: &mut SqliteConnection,
        mobile: &MobileNumber,
    ) -> AdbizResult<UserId> {
        let id: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM users WHERE mobile_number = ? AND deleted_at IS NULL",
        )
        .bind(mobile.as_str())
        .fetch_optional(&mut *conn)
        .await
        .map_err(ledger_error)?;

        id.map(UserId::new)
            .ok_or_else(|| AdbizError::not_found("user", mobile))
    }

    async fn append(
        conn: &mut SqliteConnection,
        owner: UserId,
        direction: RelationshipDirection,
        peer: &MobileNumber,
    ) -> AdbizResult<ListChange> {
        match Self::load_slot(conn, owner, direction).await? {
            ListSlot::Vacant => {
                let list = RelationshipList::first(owner, direction, peer.clone());
                Self::insert_list(conn, &list).await?;
                debug!("Created {} list for user {}", direction, owner);
                Ok(ListChange::Created)
            }
            ListSlot::Existing { row_id, mut list } => {
                if !list.insert(peer.clone()) {
                    return Ok(ListChange::AlreadyPresent);
                }
                Self::store_entries(conn, row_id, &list).await?;
                debug!(
                    "Appended {} to {} list of user {} (count {})",
                    peer,
                    direction,
                    owner,
                    list.count()
                );
                Ok(ListChange::Appended)
            }
        }
    }

    async fn load_slot(
        conn: &mut SqliteConnection,
        owner: UserId,
        direction: RelationshipDirection,
    ) -> AdbizResult<ListSlot> {
        let row = Self::fetch_row(conn, owner, direction)
            .await
            .map_err(ledger_error)?;

        Ok(match row {
            Some(row) => ListSlot::Existing {
                row_id: row.id,
                list: decode_list(owner, direction, row)?,
            },
            None => ListSlot::Vacant,
        })
    }

    async fn fetch_row(
        conn: &mut SqliteConnection,
        owner: UserId,
        direction: RelationshipDirection,
    ) -> sqlx::Result<Option<ListRow>> {
        sqlx::query_as::<_, ListRow>(
            r#"
            SELECT id, entry_count, mobile_numbers
            FROM relationship_lists
            WHERE user_id = ? AND direction = ?
            "#,
        )
        .bind(owner.into_inner())
        .bind(direction.as_str())
        .fetch_optional(&mut *conn)
        .await
    }

    async fn insert_list(conn: &mut SqliteConnection, list: &RelationshipList) -> AdbizResult<()> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO relationship_lists
                (user_id, direction, entry_count, mobile_numbers, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(list.user_id.into_inner())
        .bind(list.direction.as_str())
        .bind(i64::from(list.count()))
        .bind(serde_json::to_string(list.entries())?)
        .bind(now)
        .bind(now)
        .execute(&mut *conn)
        .await
        .map_err(ledger_error)?;

        Ok(())
    }

    async fn store_entries(
        conn: &mut SqliteConnection,
        row_id: i64,
        list: &RelationshipList,
    ) -> AdbizResult<()> {
        sqlx::query(
            "UPDATE relationship_lists SET entry_count = ?, mobile_numbers = ?, updated_at = ? WHERE id = ?",
        )
        .bind(i64::from(list.count()))
        .bind(serde_json::to_string(list.entries())?)
        .bind(Utc::now())
        .bind(row_id)
        .execute(&mut *conn)
        .await
        .map_err(ledger_error)?;

        Ok(())
    }
}

/// Store errors inside the ledger transaction: uniqueness violations are
/// conflicts, everything else is a transaction failure.
fn ledger_error(err: sqlx::Error) -> AdbizError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AdbizError::Conflict(db_err.message().to_string())
        }
        _ => AdbizError::Transaction(err.to_string()),
    }
}

fn decode_list(
    owner: UserId,
    direction: RelationshipDirection,
    row: ListRow,
) -> AdbizResult<RelationshipList> {
    let stored: Vec<String> = serde_json::from_str(&row.mobile_numbers)?;
    let list = RelationshipList::from_entries(
        owner,
        direction,
        stored.into_iter().map(MobileNumber::new_unchecked).collect(),
    );

    if i64::from(list.count()) != row.entry_count {
        warn!(
            "Stored count {} of {} list for user {} disagrees with its {} entries",
            row.entry_count,
            direction,
            owner,
            list.count()
        );
    }

    Ok(list)
}

#[async_trait]
impl RelationshipLedger for SqliteRelationshipLedger {
    async fn record_follow(
        &self,
        follower: &MobileNumber,
        target: &MobileNumber,
    ) -> AdbizResult<FollowOutcome> {
        debug!("Recording follow: {} -> {}", follower, target);

        let mut tx = self.pool.begin_immediate().await?;

        match Self::apply_follow(&mut tx, follower, target).await {
            Ok(outcome) => {
                tx.commit()
                    .await
                    .map_err(|e| AdbizError::Transaction(format!("Commit failed: {}", e)))?;
                if outcome.is_noop() {
                    debug!("Follow {} -> {} already recorded", follower, target);
                } else {
                    info!("Recorded follow {} -> {}", follower, target);
                }
                Ok(outcome)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(
                        "Rollback of follow {} -> {} failed: {}",
                        follower, target, rollback_err
                    );
                }
                Err(err)
            }
        }
    }

    async fn find_list(
        &self,
        user_id: UserId,
        direction: RelationshipDirection,
    ) -> AdbizResult<Option<RelationshipList>> {
        debug!("Loading {} list of user {}", direction, user_id);

        let mut conn = self.pool.inner().acquire().await?;
        let row = Self::fetch_row(&mut conn, user_id, direction).await?;

        row.map(|row| decode_list(user_id, direction, row))
            .transpose()
    }
}
