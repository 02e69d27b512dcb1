//! Image uploads for events, ads, achievements and office-bearer photos
//!
//! Documents are uploaded together with their record instead.

use crea_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{UploadResponse, UploadedFile};
use crate::storage::UploadKind;

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct UploadService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UploadService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, file), fields(file_name = %file.file_name))]
    pub async fn upload_image(&self, uploader_id: Snowflake, file: UploadedFile) -> ServiceResult<UploadResponse> {
        let stored = self
            .ctx
            .storage()
            .save(
                UploadKind::Image,
                self.ctx.generate_id(),
                &file.file_name,
                &file.content_type,
                &file.bytes,
            )
            .await?;

        info!(uploader_id = %uploader_id, path = %stored.path, "Image uploaded");
        Ok(UploadResponse::from(&stored))
    }
}
