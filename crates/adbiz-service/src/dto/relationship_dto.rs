//! Follow/follower DTOs.

use super::validate_mobile;
use adbiz_core::{FollowOutcome, ListChange, RelationshipDirection, RelationshipList};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request for `follower_mobile` to follow `target_mobile`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FollowRequest {
    #[validate(custom(function = "validate_mobile"))]
    pub follower_mobile: String,

    #[validate(custom(function = "validate_mobile"))]
    pub target_mobile: String,
}

/// Outcome of a follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowResponse {
    pub following: ListChange,
    pub followers: ListChange,
    /// `false` when the edge was already recorded.
    pub changed: bool,
}

impl From<FollowOutcome> for FollowResponse {
    fn from(outcome: FollowOutcome) -> Self {
        Self {
            following: outcome.following,
            followers: outcome.followers,
            changed: !outcome.is_noop(),
        }
    }
}

/// One side of a user's relationships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipListResponse {
    pub mobile_number: String,
    pub direction: RelationshipDirection,
    pub count: u32,
    pub entries: Vec<String>,
}

impl RelationshipListResponse {
    #[must_use]
    pub fn new(mobile_number: String, list: RelationshipList) -> Self {
        let direction = list.direction;
        let count = list.count();
        Self {
            mobile_number,
            direction,
            count,
            entries: list.into_entries().into_iter().map(String::from).collect(),
        }
    }
}
