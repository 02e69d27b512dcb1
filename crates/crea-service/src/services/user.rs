//! User service
//!
//! Profile management for the signed-in user and account administration.

use crea_common::auth::{hash_password, validate_password_strength, verify_password};
use crea_core::entities::{User, UserRole};
use crea_core::traits::{PageQuery, UserFilter};
use crea_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{ChangePasswordRequest, PageOrder, PaginatedResponse, UpdateProfileRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::probe;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }

    /// Get the current user
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self.load(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Update the current user's profile
    #[instrument(skip(self, request))]
    pub async fn update_current_user(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.load(user_id).await?;

        if let Some(name) = request.name {
            user.name = name.trim().to_string();
        }
        if let Some(phone) = request.phone {
            user.phone = phone;
        }
        if let Some(designation) = request.designation {
            user.designation = designation;
        }
        if let Some(division) = request.division {
            user.division = division;
        }
        if let Some(department) = request.department {
            user.department = department;
        }
        user.touch();

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user_id, "Profile updated");
        Ok(UserResponse::from(&user))
    }

    /// Change the current user's password after checking the old one
    #[instrument(skip(self, request))]
    pub async fn change_password(&self, user_id: Snowflake, request: ChangePasswordRequest) -> ServiceResult<()> {
        validate_password_strength(&request.new_password)?;

        let current_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        if !verify_password(&request.current_password, &current_hash)? {
            warn!(user_id = %user_id, "Password change refused: wrong current password");
            return Err(ServiceError::validation("Current password is incorrect"));
        }

        let new_hash = hash_password(&request.new_password)?;
        self.ctx.user_repo().update_password(user_id, &new_hash).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// List accounts, newest first
    #[instrument(skip(self))]
    pub async fn list_users(&self, filter: UserFilter, page: PageQuery) -> ServiceResult<PaginatedResponse<UserResponse>> {
        let rows = self.ctx.user_repo().list(&filter, probe(page)).await?;
        Ok(PaginatedResponse::from_rows(
            rows,
            page,
            PageOrder::NewestFirst,
            |u| u.id,
            |u| UserResponse::from(&u),
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self.load(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Change an account's role; admins cannot demote themselves
    #[instrument(skip(self))]
    pub async fn update_role(&self, actor_id: Snowflake, user_id: Snowflake, role: &str) -> ServiceResult<UserResponse> {
        let role: UserRole = role.parse()?;
        if actor_id == user_id && role != UserRole::Admin {
            return Err(DomainError::CannotModifySelf("demote").into());
        }

        let mut user = self.load(user_id).await?;
        self.ctx.user_repo().set_role(user_id, role).await?;
        user.role = role;
        user.touch();

        info!(user_id = %user_id, role = %role, actor_id = %actor_id, "Role updated");
        Ok(UserResponse::from(&user))
    }

    /// Enable or disable an account; disabling ends every session
    #[instrument(skip(self))]
    pub async fn set_active(&self, actor_id: Snowflake, user_id: Snowflake, is_active: bool) -> ServiceResult<UserResponse> {
        if actor_id == user_id && !is_active {
            return Err(DomainError::CannotModifySelf("disable").into());
        }

        let mut user = self.load(user_id).await?;
        self.ctx.user_repo().set_active(user_id, is_active).await?;
        if !is_active {
            self.ctx.refresh_token_store().revoke_all_for_user(user_id).await?;
        }
        user.is_active = is_active;
        user.touch();

        info!(user_id = %user_id, is_active, actor_id = %actor_id, "Account status updated");
        Ok(UserResponse::from(&user))
    }

    /// Soft delete an account and revoke its sessions
    #[instrument(skip(self))]
    pub async fn delete_user(&self, actor_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        if actor_id == user_id {
            return Err(DomainError::CannotModifySelf("delete").into());
        }

        self.load(user_id).await?;
        self.ctx.user_repo().delete(user_id).await?;
        self.ctx.refresh_token_store().revoke_all_for_user(user_id).await?;

        info!(user_id = %user_id, actor_id = %actor_id, "User deleted");
        Ok(())
    }
}
