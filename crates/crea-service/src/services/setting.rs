//! Setting service - site-wide key/value entries

use crea_core::{validate_setting_key, DomainError};
use tracing::{info, instrument};

use crate::dto::SettingResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct SettingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SettingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<SettingResponse>> {
        let settings = self.ctx.setting_repo().list().await?;
        Ok(settings.iter().map(SettingResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> ServiceResult<SettingResponse> {
        validate_setting_key(key)?;
        let setting = self
            .ctx
            .setting_repo()
            .find(key)
            .await?
            .ok_or_else(|| DomainError::SettingNotFound(key.to_string()))?;
        Ok(SettingResponse::from(&setting))
    }

    /// Create or replace
    #[instrument(skip(self, value))]
    pub async fn put(&self, key: &str, value: serde_json::Value) -> ServiceResult<SettingResponse> {
        validate_setting_key(key)?;
        let setting = self.ctx.setting_repo().upsert(key, &value).await?;

        info!(key = %key, "Setting saved");
        Ok(SettingResponse::from(&setting))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, key: &str) -> ServiceResult<()> {
        validate_setting_key(key)?;
        if !self.ctx.setting_repo().delete(key).await? {
            return Err(DomainError::SettingNotFound(key.to_string()).into());
        }

        info!(key = %key, "Setting deleted");
        Ok(())
    }
}
