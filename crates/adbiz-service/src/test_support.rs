//! In-memory store shared by the service tests.
//!
//! One `InMemoryStore` implements all three repository traits over a single
//! mutex, so cascades and follow edges behave like the SQL store's
//! transactions.

use adbiz_core::{
    AdbizError, AdbizResult, FollowOutcome, ListChange, MobileNumber, RelationshipDirection,
    RelationshipList, Shop, ShopDraft, ShopId, User, UserDraft, UserId, UserRole,
};
use adbiz_repository::{RelationshipLedger, ShopRepository, UserRepository};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct State {
    users: Vec<User>,
    shops: Vec<Shop>,
    lists: HashMap<(UserId, RelationshipDirection), RelationshipList>,
}

impl State {
    fn active_user_id(&self, mobile: &MobileNumber) -> AdbizResult<UserId> {
        self.users
            .iter()
            .find(|u| &u.mobile_number == mobile && u.is_active())
            .map(|u| u.id)
            .ok_or_else(|| AdbizError::not_found("user", mobile))
    }

    fn append(
        &mut self,
        owner: UserId,
        direction: RelationshipDirection,
        peer: &MobileNumber,
    ) -> ListChange {
        match self.lists.get_mut(&(owner, direction)) {
            Some(list) => {
                if list.insert(peer.clone()) {
                    ListChange::Appended
                } else {
                    ListChange::AlreadyPresent
                }
            }
            None => {
                self.lists.insert(
                    (owner, direction),
                    RelationshipList::first(owner, direction, peer.clone()),
                );
                ListChange::Created
            }
        }
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    id_lookups: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an active user directly.
    pub fn seed_user(&self, mobile: &str, role: UserRole) -> User {
        let mut state = self.state.lock();
        let now = Utc::now();
        let user = User {
            id: UserId::new(state.users.len() as i64 + 1),
            mobile_number: MobileNumber::new_unchecked(mobile),
            name: format!("user {mobile}"),
            email: None,
            role,
            profile_photo: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        state.users.push(user.clone());
        user
    }

    /// Number of `find_by_id` calls that reached the store.
    pub fn id_lookups(&self) -> usize {
        self.id_lookups.load(Ordering::SeqCst)
    }

    pub fn stored_user(&self, id: UserId) -> Option<User> {
        self.state.lock().users.iter().find(|u| u.id == id).cloned()
    }

    pub fn stored_shop(&self, owner: UserId) -> Option<Shop> {
        self.state.lock().shops.iter().find(|s| s.user_id == owner).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> AdbizResult<Option<User>> {
        self.id_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .state
            .lock()
            .users
            .iter()
            .find(|u| u.id == id && u.is_active())
            .cloned())
    }

    async fn find_by_mobile(&self, mobile: &MobileNumber) -> AdbizResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .users
            .iter()
            .find(|u| &u.mobile_number == mobile && u.is_active())
            .cloned())
    }

    async fn find_by_mobile_including_deleted(
        &self,
        mobile: &MobileNumber,
    ) -> AdbizResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .users
            .iter()
            .find(|u| &u.mobile_number == mobile)
            .cloned())
    }

    async fn exists_by_mobile(&self, mobile: &MobileNumber) -> AdbizResult<bool> {
        Ok(self
            .state
            .lock()
            .users
            .iter()
            .any(|u| &u.mobile_number == mobile))
    }

    async fn insert(&self, draft: &UserDraft) -> AdbizResult<User> {
        let mut state = self.state.lock();
        if state.users.iter().any(|u| u.mobile_number == draft.mobile_number) {
            return Err(AdbizError::conflict(format!(
                "Mobile number '{}' is already registered",
                draft.mobile_number
            )));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(state.users.len() as i64 + 1),
            mobile_number: draft.mobile_number.clone(),
            name: draft.name.clone(),
            email: draft.email.clone(),
            role: draft.role,
            profile_photo: draft.profile_photo.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> AdbizResult<User> {
        let mut state = self.state.lock();
        if state
            .users
            .iter()
            .any(|u| u.id != user.id && u.mobile_number == user.mobile_number)
        {
            return Err(AdbizError::conflict("Mobile number is already registered"));
        }

        let stored = state
            .users
            .iter_mut()
            .find(|u| u.id == user.id && u.is_active())
            .ok_or_else(|| AdbizError::not_found("user", user.id))?;
        *stored = user.clone();
        Ok(user.clone())
    }

    async fn soft_delete(&self, id: UserId) -> AdbizResult<()> {
        let mut state = self.state.lock();
        let now = Utc::now();

        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id && u.is_active())
            .ok_or_else(|| AdbizError::not_found("user", id))?;
        user.deleted_at = Some(now);

        for shop in state.shops.iter_mut().filter(|s| s.user_id == id && s.is_active()) {
            shop.deleted_at = Some(now);
        }
        Ok(())
    }

    async fn reactivate(&self, id: UserId) -> AdbizResult<()> {
        let mut state = self.state.lock();

        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id && !u.is_active())
            .ok_or_else(|| AdbizError::not_found("deleted user", id))?;
        user.deleted_at = None;

        for shop in state.shops.iter_mut().filter(|s| s.user_id == id) {
            shop.deleted_at = None;
        }
        Ok(())
    }
}

#[async_trait]
impl ShopRepository for InMemoryStore {
    async fn find_by_owner(&self, user_id: UserId) -> AdbizResult<Option<Shop>> {
        Ok(self
            .state
            .lock()
            .shops
            .iter()
            .find(|s| s.user_id == user_id && s.is_active())
            .cloned())
    }

    async fn find_by_owner_including_deleted(&self, user_id: UserId) -> AdbizResult<Option<Shop>> {
        Ok(self.stored_shop(user_id))
    }

    async fn insert(&self, draft: &ShopDraft) -> AdbizResult<Shop> {
        let mut state = self.state.lock();
        if state
            .shops
            .iter()
            .any(|s| s.user_id == draft.user_id || s.shop_id == draft.shop_id)
        {
            return Err(AdbizError::conflict(format!(
                "User {} already owns a shop",
                draft.user_id
            )));
        }

        let now = Utc::now();
        let shop = Shop {
            id: ShopId::new(state.shops.len() as i64 + 1),
            shop_id: draft.shop_id.clone(),
            shop_name: draft.shop_name.clone(),
            shop_username: draft.shop_username.clone(),
            product_type: draft.product_type.clone(),
            bio: None,
            location: None,
            shop_photo: None,
            user_id: draft.user_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        state.shops.push(shop.clone());
        Ok(shop)
    }

    async fn update(&self, shop: &Shop) -> AdbizResult<Shop> {
        let mut state = self.state.lock();
        let stored = state
            .shops
            .iter_mut()
            .find(|s| s.id == shop.id && s.is_active())
            .ok_or_else(|| AdbizError::not_found("shop", shop.id))?;
        *stored = shop.clone();
        Ok(shop.clone())
    }

    async fn soft_delete(&self, id: ShopId) -> AdbizResult<()> {
        let mut state = self.state.lock();
        let shop = state
            .shops
            .iter_mut()
            .find(|s| s.id == id && s.is_active())
            .ok_or_else(|| AdbizError::not_found("shop", id))?;
        shop.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn reactivate(&self, id: ShopId) -> AdbizResult<()> {
        let mut state = self.state.lock();
        let shop = state
            .shops
            .iter_mut()
            .find(|s| s.id == id && !s.is_active())
            .ok_or_else(|| AdbizError::not_found("deleted shop", id))?;
        shop.deleted_at = None;
        Ok(())
    }
}

#[async_trait]
impl RelationshipLedger for InMemoryStore {
    async fn record_follow(
        &self,
        follower: &MobileNumber,
        target: &MobileNumber,
    ) -> AdbizResult<FollowOutcome> {
        let mut state = self.state.lock();
        let follower_id = state.active_user_id(follower)?;
        let target_id = state.active_user_id(target)?;

        let following = state.append(follower_id, RelationshipDirection::Following, target);
        let followers = state.append(target_id, RelationshipDirection::Followers, follower);

        Ok(FollowOutcome {
            following,
            followers,
        })
    }

    async fn find_list(
        &self,
        user_id: UserId,
        direction: RelationshipDirection,
    ) -> AdbizResult<Option<RelationshipList>> {
        Ok(self.state.lock().lists.get(&(user_id, direction)).cloned())
    }
}
