//! Repository trait definitions.

use adbiz_core::{
    AdbizResult, FollowOutcome, MobileNumber, RelationshipDirection, RelationshipList, Shop,
    ShopDraft, ShopId, User, UserDraft, UserId,
};
use async_trait::async_trait;

/// User repository trait.
///
/// Lookups skip soft-deleted users unless the method says otherwise.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds an active user by ID.
    async fn find_by_id(&self, id: UserId) -> AdbizResult<Option<User>>;

    /// Finds an active user by mobile number.
    async fn find_by_mobile(&self, mobile: &MobileNumber) -> AdbizResult<Option<User>>;

    /// Finds a user by mobile number, soft-deleted or not.
    async fn find_by_mobile_including_deleted(
        &self,
        mobile: &MobileNumber,
    ) -> AdbizResult<Option<User>>;

    /// Checks whether any row, soft-deleted or not, holds the mobile number.
    async fn exists_by_mobile(&self, mobile: &MobileNumber) -> AdbizResult<bool>;

    /// Inserts a new user. A taken mobile number is a `Conflict`.
    async fn insert(&self, draft: &UserDraft) -> AdbizResult<User>;

    /// Updates an active user.
    async fn update(&self, user: &User) -> AdbizResult<User>;

    /// Soft-deletes a user together with their shop, in one transaction.
    async fn soft_delete(&self, id: UserId) -> AdbizResult<()>;

    /// Reactivates a soft-deleted user together with their shop, in one transaction.
    async fn reactivate(&self, id: UserId) -> AdbizResult<()>;
}

/// Shop repository trait.
#[async_trait]
pub trait ShopRepository: Send + Sync {
    /// Finds the active shop owned by a user.
    async fn find_by_owner(&self, user_id: UserId) -> AdbizResult<Option<Shop>>;

    /// Finds the shop owned by a user, soft-deleted or not.
    async fn find_by_owner_including_deleted(&self, user_id: UserId) -> AdbizResult<Option<Shop>>;

    /// Inserts a new shop. A second shop for the same owner is a `Conflict`.
    async fn insert(&self, draft: &ShopDraft) -> AdbizResult<Shop>;

    /// Updates an active shop.
    async fn update(&self, shop: &Shop) -> AdbizResult<Shop>;

    /// Soft-deletes a shop.
    async fn soft_delete(&self, id: ShopId) -> AdbizResult<()>;

    /// Reactivates a soft-deleted shop.
    async fn reactivate(&self, id: ShopId) -> AdbizResult<()>;
}

/// The relationship ledger: keeps both sides of every follow edge in step.
#[async_trait]
pub trait RelationshipLedger: Send + Sync {
    /// Records that `follower` follows `target`.
    ///
    /// Appends `target` to the follower's following list and `follower` to
    /// the target's followers list in a single transaction, creating either
    /// list on first use. Both users must exist and be active, otherwise the
    /// call fails with `NotFound` and writes nothing. Replaying a recorded
    /// follow changes nothing.
    async fn record_follow(
        &self,
        follower: &MobileNumber,
        target: &MobileNumber,
    ) -> AdbizResult<FollowOutcome>;

    /// Loads one of a user's lists, if it has been created.
    async fn find_list(
        &self,
        user_id: UserId,
        direction: RelationshipDirection,
    ) -> AdbizResult<Option<RelationshipList>>;
}
