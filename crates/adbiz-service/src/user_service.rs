//! User service trait definition.

use crate::dto::{
    RegisterUserRequest, StagedRegistrationResponse, UpdateUserRequest, UserResponse,
    VerifyMobileResponse,
};
use adbiz_core::{AdbizResult, UserId};
use async_trait::async_trait;

/// User lifecycle service.
///
/// Mobile numbers arrive as caller-supplied strings and are validated here.
/// Owner-only operations take the acting user's ID as established by the
/// caller's token verifier.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Checks whether an active user holds the mobile number.
    async fn verify_mobile(&self, mobile: &str) -> AdbizResult<VerifyMobileResponse>;

    /// Holds a registration draft in the staging cache until it is completed.
    async fn stage_registration(
        &self,
        request: RegisterUserRequest,
    ) -> AdbizResult<StagedRegistrationResponse>;

    /// Commits a staged draft to the store.
    async fn complete_registration(&self, mobile: &str) -> AdbizResult<UserResponse>;

    /// Registers a user in one step.
    async fn register(&self, request: RegisterUserRequest) -> AdbizResult<UserResponse>;

    /// Gets a user by ID, served from the cache when possible.
    async fn get_user(&self, id: UserId) -> AdbizResult<UserResponse>;

    /// Gets the acting user's own record.
    async fn get_user_by_mobile(&self, mobile: &str, acting_user: UserId)
        -> AdbizResult<UserResponse>;

    /// Updates the acting user's profile.
    ///
    /// A new mobile number is not propagated into relationship lists: peers
    /// that already follow, or are followed by, this user keep the old number.
    async fn update_user(
        &self,
        mobile: &str,
        acting_user: UserId,
        request: UpdateUserRequest,
    ) -> AdbizResult<UserResponse>;

    /// Soft-deletes the acting user and their shop.
    async fn delete_user(&self, mobile: &str, acting_user: UserId) -> AdbizResult<()>;

    /// Reactivates a soft-deleted user and their shop.
    async fn reactivate_user(&self, mobile: &str) -> AdbizResult<UserResponse>;
}
