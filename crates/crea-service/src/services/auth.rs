//! Authentication service
//!
//! Handles one-time codes, registration, login, token rotation, logout and
//! password reset. Refresh tokens are tracked in Redis by their `jti`.

use crea_cache::{generate_code, OtpIssue, OtpPurpose, OtpVerdict, RefreshTokenData};
use crea_common::auth::{
    equalize_verification_time, hash_password, validate_password_strength, verify_password,
};
use crea_common::AppError;
use crea_core::entities::User;
use crea_core::{normalize_email, DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    AuthResponse, LoginRequest, OtpSentResponse, RefreshTokenRequest, RegisterRequest,
    ResetPasswordRequest, SendOtpRequest, UserResponse,
};
use crate::integrations::mailer::otp_email;

use super::context::ServiceContext;
use super::error::ServiceResult;

const OTP_SENT_MESSAGE: &str = "If the address can receive a code, one has been sent";

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Email a one-time code for signup or password reset
    #[instrument(skip(self, request), fields(purpose = %request.purpose))]
    pub async fn send_otp(&self, request: SendOtpRequest) -> ServiceResult<OtpSentResponse> {
        let email = normalize_email(&request.email);
        let policy = self.ctx.otp_store().policy();
        let response = OtpSentResponse {
            message: OTP_SENT_MESSAGE.to_string(),
            expires_in: policy.ttl_seconds,
        };

        match request.purpose {
            OtpPurpose::Signup => {
                if self.ctx.user_repo().email_exists(&email).await? {
                    return Err(DomainError::EmailAlreadyExists.into());
                }
            }
            OtpPurpose::PasswordReset => {
                let deliverable = self
                    .ctx
                    .user_repo()
                    .find_by_email(&email)
                    .await?
                    .is_some_and(|user| user.is_active);
                if !deliverable {
                    info!("Password reset requested for unknown or disabled account");
                    return Ok(response);
                }
            }
        }

        let code = generate_code();
        if let OtpIssue::Cooldown { retry_after } =
            self.ctx.otp_store().issue(request.purpose, &email, &code).await?
        {
            return Err(DomainError::OtpCooldown { retry_after }.into());
        }

        let message = otp_email(&email, &code, request.purpose, policy.ttl_seconds);
        if let Err(e) = self.ctx.mailer().send(&message).await {
            // Let the user ask again straight away.
            self.ctx.otp_store().clear(request.purpose, &email).await?;
            return Err(e.into());
        }

        info!("One-time code sent");
        Ok(response)
    }

    /// Register a new member with a signup code
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password)?;

        let email = normalize_email(&request.email);
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        self.consume_otp(OtpPurpose::Signup, &email, &request.otp).await?;

        let password_hash = hash_password(&request.password)?;

        let mut user = User::new(self.ctx.generate_id(), request.name.trim().to_string(), &email);
        user.phone = request.phone;
        user.designation = request.designation;
        user.division = request.division;
        user.department = request.department;
        user.employee_id = request.employee_id;
        user.email_verified = true;

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");

        self.issue_tokens(&user).await
    }

    /// Login with email and password
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let email = normalize_email(&request.email);

        let Some(user) = self.ctx.user_repo().find_by_email(&email).await? else {
            equalize_verification_time(&request.password);
            warn!("Login failed: unknown email");
            return Err(AppError::InvalidCredentials.into());
        };

        let Some(password_hash) = self.ctx.user_repo().get_password_hash(user.id).await? else {
            warn!(user_id = %user.id, "Login failed: no password hash");
            return Err(AppError::InvalidCredentials.into());
        };

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        if !user.is_active {
            warn!(user_id = %user.id, "Login refused: account disabled");
            return Err(DomainError::AccountDisabled.into());
        }

        info!(user_id = %user.id, "User logged in successfully");

        self.issue_tokens(&user).await
    }

    /// Exchange a refresh token for a new pair, revoking the old one
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        let stored = self.ctx.refresh_token_store().get(&claims.jti).await?;
        if !stored.is_some_and(|data| data.user_id == user_id) {
            warn!(user_id = %user_id, "Refresh refused: token not live");
            return Err(AppError::InvalidToken.into());
        }

        // Two concurrent refreshes with one token: only one DEL succeeds.
        if !self.ctx.refresh_token_store().revoke(&claims.jti).await? {
            warn!(user_id = %user_id, "Refresh refused: token already rotated");
            return Err(AppError::InvalidToken.into());
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !user.is_active {
            return Err(DomainError::AccountDisabled.into());
        }

        info!(user_id = %user.id, "Tokens refreshed successfully");

        self.issue_tokens(&user).await
    }

    /// Revoke one refresh token, or every session when none is given
    #[instrument(skip(self, refresh_token))]
    pub async fn logout(&self, user_id: Snowflake, refresh_token: Option<String>) -> ServiceResult<()> {
        match refresh_token {
            Some(token) => {
                let claims = self.ctx.jwt_service().decode_token(&token)?;
                if claims.user_id()? != user_id {
                    return Err(AppError::InvalidToken.into());
                }
                self.ctx.refresh_token_store().revoke(&claims.jti).await?;
            }
            None => {
                self.ctx.refresh_token_store().revoke_all_for_user(user_id).await?;
            }
        }

        info!(user_id = %user_id, "User logged out successfully");
        Ok(())
    }

    /// Set a new password with a reset code; every session is revoked
    #[instrument(skip(self, request))]
    pub async fn reset_password(&self, request: ResetPasswordRequest) -> ServiceResult<()> {
        validate_password_strength(&request.new_password)?;

        let email = normalize_email(&request.email);
        self.consume_otp(OtpPurpose::PasswordReset, &email, &request.otp).await?;

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::OtpInvalid)?;

        let password_hash = hash_password(&request.new_password)?;
        self.ctx.user_repo().update_password(user.id, &password_hash).await?;
        self.ctx.refresh_token_store().revoke_all_for_user(user.id).await?;

        info!(user_id = %user.id, "Password reset");
        Ok(())
    }

    async fn consume_otp(&self, purpose: OtpPurpose, email: &str, code: &str) -> ServiceResult<()> {
        let verdict = self.ctx.otp_store().verify(purpose, email, code).await?;
        otp_outcome(verdict).map_err(|e| {
            warn!(purpose = %purpose, error = %e, "One-time code rejected");
            e.into()
        })
    }

    /// Mint a token pair and register the refresh token's `jti`
    async fn issue_tokens(&self, user: &User) -> ServiceResult<AuthResponse> {
        let jwt = self.ctx.jwt_service();
        let pair = jwt.generate_token_pair(user.id, user.role)?;
        let refresh_claims = jwt.decode_token(&pair.refresh_token)?;

        self.ctx
            .refresh_token_store()
            .store(&refresh_claims.jti, &RefreshTokenData::new(user.id))
            .await?;

        Ok(AuthResponse::new(
            pair.access_token,
            pair.refresh_token,
            pair.expires_in,
            UserResponse::from(user),
        ))
    }
}

fn otp_outcome(verdict: OtpVerdict) -> Result<(), DomainError> {
    match verdict {
        OtpVerdict::Valid => Ok(()),
        OtpVerdict::Invalid { .. } => Err(DomainError::OtpInvalid),
        OtpVerdict::Expired => Err(DomainError::OtpExpired),
        OtpVerdict::Exhausted => Err(DomainError::OtpExhausted),
    }
}
