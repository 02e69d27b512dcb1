//! First administrator account
//!
//! Runs at startup when admin credentials are configured. An existing member
//! with that email is promoted; an existing admin is left alone.

use crea_common::auth::{hash_password, validate_password_strength};
use crea_common::config::AdminBootstrap;
use crea_core::entities::{User, UserRole};
use crea_core::normalize_email;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// What the bootstrap did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    NotConfigured,
    Created,
    Promoted,
    Unchanged,
}

pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, bootstrap))]
    pub async fn ensure_admin(&self, bootstrap: &AdminBootstrap) -> ServiceResult<BootstrapOutcome> {
        let Some((email, password)) = bootstrap.credentials() else {
            return Ok(BootstrapOutcome::NotConfigured);
        };
        let email = normalize_email(email);

        if let Some(user) = self.ctx.user_repo().find_by_email(&email).await? {
            if user.role == UserRole::Admin {
                return Ok(BootstrapOutcome::Unchanged);
            }
            self.ctx.user_repo().set_role(user.id, UserRole::Admin).await?;
            info!(user_id = %user.id, "Existing account promoted to admin");
            return Ok(BootstrapOutcome::Promoted);
        }

        validate_password_strength(password)?;
        let password_hash = hash_password(password)?;

        let mut user = User::new(self.ctx.generate_id(), bootstrap.name.clone(), &email);
        user.role = UserRole::Admin;
        user.email_verified = true;
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "Admin account created");
        Ok(BootstrapOutcome::Created)
    }
}
