//! Relationship service trait definition.

use crate::dto::{FollowRequest, FollowResponse, RelationshipListResponse};
use adbiz_core::AdbizResult;
use async_trait::async_trait;

/// Follow edges and the per-user lists they produce.
#[async_trait]
pub trait RelationshipService: Send + Sync {
    /// Records a follow. Replaying it is harmless.
    async fn follow(&self, request: FollowRequest) -> AdbizResult<FollowResponse>;

    /// The users `mobile` follows.
    async fn following(&self, mobile: &str) -> AdbizResult<RelationshipListResponse>;

    /// The users following `mobile`.
    async fn followers(&self, mobile: &str) -> AdbizResult<RelationshipListResponse>;
}
