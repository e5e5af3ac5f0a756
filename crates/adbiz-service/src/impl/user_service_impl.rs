//! User service implementation.

use crate::cache::EntityCache;
use crate::dto::{
    RegisterUserRequest, StagedRegistrationResponse, UpdateUserRequest, UserResponse,
    VerifyMobileResponse,
};
use crate::user_service::UserService;
use adbiz_core::{
    parse_mobile, AdbizError, AdbizResult, MobileNumber, User, UserChanges, UserDraft, UserId,
    ValidateExt,
};
use adbiz_repository::UserRepository;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// User service backed by a user repository and the entity cache.
///
/// Cache writes and invalidations are best-effort: a failure is logged and
/// the store result is returned as if the cache were empty.
#[derive(Clone)]
pub struct UserServiceImpl {
    users: Arc<dyn UserRepository>,
    cache: EntityCache,
}

impl UserServiceImpl {
    /// Creates a new user service.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, cache: EntityCache) -> Self {
        Self { users, cache }
    }

    async fn owned_user(&self, mobile: &str, acting_user: UserId) -> AdbizResult<User> {
        let mobile = parse_mobile(mobile)?;
        let user = self
            .users
            .find_by_mobile(&mobile)
            .await?
            .ok_or_else(|| AdbizError::not_found("user", &mobile))?;

        if !user.is_owned_by(acting_user) {
            return Err(AdbizError::forbidden(format!(
                "User {} may not act on {}",
                acting_user, mobile
            )));
        }
        Ok(user)
    }

    async fn ensure_unregistered(&self, mobile: &MobileNumber) -> AdbizResult<()> {
        if self.users.exists_by_mobile(mobile).await? {
            return Err(AdbizError::conflict(format!(
                "Mobile number '{}' is already registered",
                mobile
            )));
        }
        Ok(())
    }

    async fn cache_user(&self, user: &User) {
        if let Err(e) = self.cache.put_user(user).await {
            warn!("Failed to cache user {}: {}", user.id, e);
        }
    }

    async fn forget_user(&self, id: UserId) {
        if let Err(e) = self.cache.invalidate_user(id).await {
            warn!("Failed to invalidate cached user {}: {}", id, e);
        }
    }
}

fn draft_from_request(request: RegisterUserRequest) -> AdbizResult<UserDraft> {
    request.validate_request()?;
    let mobile_number = parse_mobile(&request.mobile_number)?;

    Ok(UserDraft {
        mobile_number,
        name: request.name,
        email: request.email,
        role: request.role,
        profile_photo: request.profile_photo,
    })
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn verify_mobile(&self, mobile: &str) -> AdbizResult<VerifyMobileResponse> {
        let mobile = parse_mobile(mobile)?;
        debug!("Verifying mobile: {}", mobile);

        match self.users.find_by_mobile(&mobile).await? {
            Some(user) => {
                self.cache_user(&user).await;
                Ok(VerifyMobileResponse {
                    exists: true,
                    user: Some(UserResponse::from(user)),
                })
            }
            None => Ok(VerifyMobileResponse {
                exists: false,
                user: None,
            }),
        }
    }

    async fn stage_registration(
        &self,
        request: RegisterUserRequest,
    ) -> AdbizResult<StagedRegistrationResponse> {
        let draft = draft_from_request(request)?;
        debug!("Staging registration for: {}", draft.mobile_number);

        self.ensure_unregistered(&draft.mobile_number).await?;

        // The staged draft lives only in the cache, so a failure here fails the step.
        self.cache.put_staging(&draft).await?;

        info!("Registration staged: {}", draft.mobile_number);
        Ok(StagedRegistrationResponse {
            mobile_number: draft.mobile_number.into(),
            expires_in_secs: self.cache.settings().staging_ttl.as_secs(),
        })
    }

    async fn complete_registration(&self, mobile: &str) -> AdbizResult<UserResponse> {
        let mobile = parse_mobile(mobile)?;
        debug!("Completing registration for: {}", mobile);

        let draft = self
            .cache
            .get_staging(&mobile)
            .await?
            .ok_or_else(|| AdbizError::not_found("staged registration", &mobile))?;

        let user = self.users.insert(&draft).await?;

        self.cache_user(&user).await;
        if let Err(e) = self.cache.remove_staging(&mobile).await {
            warn!("Failed to remove staged registration {}: {}", mobile, e);
        }

        info!("User registered: {} ({})", user.id, user.mobile_number);
        Ok(UserResponse::from(user))
    }

    async fn register(&self, request: RegisterUserRequest) -> AdbizResult<UserResponse> {
        let draft = draft_from_request(request)?;
        debug!("Registering user: {}", draft.mobile_number);

        self.ensure_unregistered(&draft.mobile_number).await?;
        let user = self.users.insert(&draft).await?;

        self.cache_user(&user).await;

        info!("User registered: {} ({})", user.id, user.mobile_number);
        Ok(UserResponse::from(user))
    }

    async fn get_user(&self, id: UserId) -> AdbizResult<UserResponse> {
        debug!("Getting user: {}", id);

        match self.cache.get_user(id).await {
            Ok(Some(user)) => {
                debug!("Cache hit for user: {}", id);
                return Ok(UserResponse::from(user));
            }
            Ok(None) => {}
            Err(e) => warn!("Cache lookup for user {} failed, reading store: {}", id, e),
        }

        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AdbizError::not_found("user", id))?;

        self.cache_user(&user).await;
        Ok(UserResponse::from(user))
    }

    async fn get_user_by_mobile(
        &self,
        mobile: &str,
        acting_user: UserId,
    ) -> AdbizResult<UserResponse> {
        debug!("Getting user by mobile: {}", mobile);

        let user = self.owned_user(mobile, acting_user).await?;
        Ok(UserResponse::from(user))
    }

    async fn update_user(
        &self,
        mobile: &str,
        acting_user: UserId,
        request: UpdateUserRequest,
    ) -> AdbizResult<UserResponse> {
        debug!("Updating user: {}", mobile);

        request.validate_request()?;
        let mut user = self.owned_user(mobile, acting_user).await?;

        let new_mobile = request
            .mobile_number
            .as_deref()
            .map(parse_mobile)
            .transpose()?;
        if let Some(new_mobile) = &new_mobile {
            if *new_mobile != user.mobile_number {
                self.ensure_unregistered(new_mobile).await?;
            }
        }

        user.apply_changes(UserChanges {
            name: request.name,
            email: request.email,
            profile_photo: request.profile_photo,
            mobile_number: new_mobile,
            role: request.role,
        });

        let updated = self.users.update(&user).await?;
        self.cache_user(&updated).await;

        info!("User updated: {}", updated.id);
        Ok(UserResponse::from(updated))
    }

    async fn delete_user(&self, mobile: &str, acting_user: UserId) -> AdbizResult<()> {
        debug!("Deleting user: {}", mobile);

        let user = self.owned_user(mobile, acting_user).await?;
        self.users.soft_delete(user.id).await?;
        self.forget_user(user.id).await;

        info!("User soft-deleted: {}", user.id);
        Ok(())
    }

    async fn reactivate_user(&self, mobile: &str) -> AdbizResult<UserResponse> {
        let mobile = parse_mobile(mobile)?;
        debug!("Reactivating user: {}", mobile);

        let user = self
            .users
            .find_by_mobile_including_deleted(&mobile)
            .await?
            .ok_or_else(|| AdbizError::not_found("user", &mobile))?;

        if user.is_active() {
            return Err(AdbizError::validation(format!(
                "User '{}' is already active",
                mobile
            )));
        }

        self.users.reactivate(user.id).await?;
        self.forget_user(user.id).await;

        let user = self
            .users
            .find_by_id(user.id)
            .await?
            .ok_or_else(|| AdbizError::not_found("user", user.id))?;

        info!("User reactivated: {}", user.id);
        Ok(UserResponse::from(user))
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
