//! Relationship service implementation.

use crate::dto::{FollowRequest, FollowResponse, RelationshipListResponse};
use crate::relationship_service::RelationshipService;
use adbiz_core::{parse_mobile, AdbizError, AdbizResult, RelationshipDirection, ValidateExt};
use adbiz_repository::{RelationshipLedger, UserRepository};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Relationship service over the ledger.
#[derive(Clone)]
pub struct RelationshipServiceImpl {
    users: Arc<dyn UserRepository>,
    ledger: Arc<dyn RelationshipLedger>,
}

impl RelationshipServiceImpl {
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, ledger: Arc<dyn RelationshipLedger>) -> Self {
        Self { users, ledger }
    }

    async fn list(
        &self,
        mobile: &str,
        direction: RelationshipDirection,
    ) -> AdbizResult<RelationshipListResponse> {
        let mobile = parse_mobile(mobile)?;
        debug!("Loading {} list of: {}", direction, mobile);

        // Lists of soft-deleted users stay readable.
        let owner = self
            .users
            .find_by_mobile_including_deleted(&mobile)
            .await?
            .ok_or_else(|| AdbizError::not_found("user", &mobile))?;

        let list = self
            .ledger
            .find_list(owner.id, direction)
            .await?
            .ok_or_else(|| AdbizError::not_found("relationship list", &mobile))?;

        Ok(RelationshipListResponse::new(mobile.into(), list))
    }
}

#[async_trait]
impl RelationshipService for RelationshipServiceImpl {
    async fn follow(&self, request: FollowRequest) -> AdbizResult<FollowResponse> {
        request.validate_request()?;
        let follower = parse_mobile(&request.follower_mobile)?;
        let target = parse_mobile(&request.target_mobile)?;

        let outcome = self.ledger.record_follow(&follower, &target).await?;

        if outcome.is_noop() {
            debug!("{} already follows {}", follower, target);
        } else {
            info!("{} now follows {}", follower, target);
        }
        Ok(FollowResponse::from(outcome))
    }

    async fn following(&self, mobile: &str) -> AdbizResult<RelationshipListResponse> {
        self.list(mobile, RelationshipDirection::Following).await
    }

    async fn followers(&self, mobile: &str) -> AdbizResult<RelationshipListResponse> {
        self.list(mobile, RelationshipDirection::Followers).await
    }
}

impl std::fmt::Debug for RelationshipServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationshipServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryStore;
    use adbiz_core::{ListChange, UserRole};

    fn service() -> (Arc<InMemoryStore>, RelationshipServiceImpl) {
        let store = Arc::new(InMemoryStore::new());
        let service = RelationshipServiceImpl::new(store.clone(), store.clone());
        (store, service)
    }

    fn follow(follower: &str, target: &str) -> FollowRequest {
        FollowRequest {
            follower_mobile: follower.to_string(),
            target_mobile: target.to_string(),
        }
    }

    #[tokio::test]
    async fn test_follow_shows_on_both_sides() {
        let (store, service) = service();
        store.seed_user("9998887777", UserRole::Buyer);
        store.seed_user("1112223333", UserRole::Seller);

        let response = service.follow(follow("9998887777", "1112223333")).await.unwrap();
        assert_eq!(response.following, ListChange::Created);
        assert_eq!(response.followers, ListChange::Created);
        assert!(response.changed);

        let following = service.following("9998887777").await.unwrap();
        assert_eq!(following.entries, vec!["1112223333"]);
        assert_eq!(following.count, 1);

        let followers = service.followers("1112223333").await.unwrap();
        assert_eq!(followers.entries, vec!["9998887777"]);
    }

    #[tokio::test]
    async fn test_replayed_follow_changes_nothing() {
        let (store, service) = service();
        store.seed_user("9998887777", UserRole::Buyer);
        store.seed_user("1112223333", UserRole::Seller);

        service.follow(follow("9998887777", "1112223333")).await.unwrap();
        let replay = service.follow(follow("9998887777", "1112223333")).await.unwrap();

        assert!(!replay.changed);
        assert_eq!(service.following("9998887777").await.unwrap().count, 1);
        assert_eq!(service.followers("1112223333").await.unwrap().count, 1);
    }

    #[tokio::test]
    async fn test_follow_unknown_user() {
        let (store, service) = service();
        store.seed_user("9998887777", UserRole::Buyer);

        let err = service
            .follow(follow("9998887777", "1112223333"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(service.following("9998887777").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_follow_rejects_malformed_mobile() {
        let (_, service) = service();
        let err = service
            .follow(follow("9998887777", "not-a-mobile"))
            .await
            .unwrap_err();
        assert!(matches!(err, AdbizError::Validation(_)));
    }

    #[tokio::test]
    async fn test_lists_of_deleted_users_stay_readable() {
        let (store, service) = service();
        let follower = store.seed_user("9998887777", UserRole::Buyer);
        store.seed_user("1112223333", UserRole::Seller);
        service.follow(follow("9998887777", "1112223333")).await.unwrap();

        UserRepository::soft_delete(store.as_ref(), follower.id)
            .await
            .unwrap();

        let following = service.following("9998887777").await.unwrap();
        assert_eq!(following.entries, vec!["1112223333"]);
    }

    #[tokio::test]
    async fn test_missing_list_is_not_found() {
        let (store, service) = service();
        store.seed_user("9998887777", UserRole::Buyer);

        assert!(service.followers("9998887777").await.unwrap_err().is_not_found());
        assert!(service.following("5550001111").await.unwrap_err().is_not_found());
    }
}
