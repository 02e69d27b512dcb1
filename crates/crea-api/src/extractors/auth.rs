//! Authentication extractors
//!
//! Extract and validate the bearer access token. The role travels in the
//! token, so admin checks need no database round trip.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use crea_core::{DomainError, Snowflake};
use crea_service::services::Actor;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from the access token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Snowflake,
    pub is_admin: bool,
}

impl AuthUser {
    pub fn new(user_id: Snowflake, is_admin: bool) -> Self {
        Self { user_id, is_admin }
    }

    /// The same caller, as the forum services see it
    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.user_id,
            is_admin: self.is_admin,
        }
    }
}

fn authenticate(state: &AppState, token: &str) -> Result<AuthUser, ApiError> {
    let claims = state.jwt_service().validate_access_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Invalid access token");
        ApiError::InvalidAuth
    })?;

    let user_id = claims.user_id().map_err(|e| {
        tracing::warn!(error = %e, "Invalid user ID in token");
        ApiError::InvalidAuth
    })?;

    Ok(AuthUser::new(user_id, claims.is_admin()))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        authenticate(&AppState::from_ref(state), bearer.token())
    }
}

/// Authenticated administrator
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub AuthUser);

impl AdminUser {
    pub fn user_id(&self) -> Snowflake {
        self.0.user_id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            tracing::warn!(user_id = %user.user_id, "Admin route refused");
            return Err(DomainError::AdminRequired.into());
        }
        Ok(AdminUser(user))
    }
}

/// Optional authenticated user
///
/// `None` when no authorization header is present; a present but invalid
/// token is still rejected.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn is_admin(&self) -> bool {
        self.0.is_some_and(|user| user.is_admin)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => {
                let user = authenticate(&AppState::from_ref(state), bearer.token())?;
                Ok(OptionalAuthUser(Some(user)))
            }
            Err(_) => Ok(OptionalAuthUser(None)),
        }
    }
}
