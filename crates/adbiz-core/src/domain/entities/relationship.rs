//! Relationship lists: the two denormalized sides of a follow edge.
//!
//! A follow from A to B is stored twice: B's mobile number in A's
//! *following* list and A's mobile number in B's *followers* list. Each user
//! owns at most one list per direction.

use super::super::value_objects::MobileNumber;
use crate::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the follow edge a list records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipDirection {
    /// Peers the owner follows.
    Following,
    /// Peers that follow the owner.
    Followers,
}

impl RelationshipDirection {
    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Following => "following",
            Self::Followers => "followers",
        }
    }

    /// Returns the opposite side of the edge.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Following => Self::Followers,
            Self::Followers => Self::Following,
        }
    }
}

impl fmt::Display for RelationshipDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user's list for one direction.
///
/// Invariants: no mobile number appears twice, and `count` always equals
/// `entries.len()`. Entry order is insertion order but carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipList {
    pub user_id: UserId,
    pub direction: RelationshipDirection,
    count: u32,
    entries: Vec<MobileNumber>,
}

impl RelationshipList {
    /// Creates the list for a user's first entry.
    #[must_use]
    pub fn first(user_id: UserId, direction: RelationshipDirection, peer: MobileNumber) -> Self {
        Self {
            user_id,
            direction,
            count: 1,
            entries: vec![peer],
        }
    }

    /// Rebuilds a list from stored entries, dropping duplicates and
    /// recomputing the count.
    #[must_use]
    pub fn from_entries(
        user_id: UserId,
        direction: RelationshipDirection,
        stored: Vec<MobileNumber>,
    ) -> Self {
        let mut list = Self {
            user_id,
            direction,
            count: 0,
            entries: Vec::with_capacity(stored.len()),
        };
        for peer in stored {
            list.insert(peer);
        }
        list
    }

    /// Checks whether `peer` is already on the list.
    #[must_use]
    pub fn contains(&self, peer: &MobileNumber) -> bool {
        self.entries.iter().any(|entry| entry == peer)
    }

    /// Adds `peer` unless already present. Returns `true` if the list changed.
    pub fn insert(&mut self, peer: MobileNumber) -> bool {
        if self.contains(&peer) {
            return false;
        }
        self.entries.push(peer);
        self.count += 1;
        true
    }

    /// Number of entries.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// The peer mobile numbers.
    #[must_use]
    pub fn entries(&self) -> &[MobileNumber] {
        &self.entries
    }

    /// Consumes the list, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<MobileNumber> {
        self.entries
    }
}

/// What happened to one side of the edge during a follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListChange {
    /// The list row did not exist and was created with the peer as its only entry.
    Created,
    /// The peer was appended to an existing list.
    Appended,
    /// The peer was already present; nothing was written.
    AlreadyPresent,
}

impl ListChange {
    /// Whether the store was written.
    #[must_use]
    pub const fn is_write(&self) -> bool {
        !matches!(self, Self::AlreadyPresent)
    }
}

/// Result of recording a follow: the change applied to each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowOutcome {
    pub following: ListChange,
    pub followers: ListChange,
}

impl FollowOutcome {
    /// True when the edge already existed on both sides.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        !self.following.is_write() && !self.followers.is_write()
    }
}
