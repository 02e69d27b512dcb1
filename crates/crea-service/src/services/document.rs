//! Document service - circulars, manuals and court cases
//!
//! Each document is either an external http(s) link or an uploaded file.
//! Uploaded files are named after the record id and removed with it.

use chrono::Utc;
use crea_core::entities::{Circular, CourtCase, CourtCaseStatus, Manual};
use crea_core::traits::PageQuery;
use crea_core::{DocumentSource, DomainError, Snowflake, SourceInput};
use tracing::{info, instrument};

use crate::dto::{
    CircularResponse, CourtCaseResponse, CreateCircularRequest, CreateCourtCaseRequest,
    CreateManualRequest, ManualResponse, PageOrder, PaginatedResponse, UpdateCircularRequest,
    UpdateCourtCaseRequest, UpdateManualRequest, UploadedFile,
};
use crate::storage::UploadKind;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::{non_blank, probe};

pub struct DocumentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DocumentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Check the exactly-one rule before anything touches the disk, then store.
    async fn store_source(
        &self,
        record_id: Snowflake,
        url: Option<String>,
        file: Option<UploadedFile>,
    ) -> ServiceResult<DocumentSource> {
        match SourceInput::from_parts(url, file)? {
            SourceInput::Url(url) => Ok(DocumentSource::Url { url }),
            SourceInput::File(file) => {
                let stored = self
                    .ctx
                    .storage()
                    .save(UploadKind::Document, record_id, &file.file_name, &file.content_type, &file.bytes)
                    .await?;
                Ok(DocumentSource::File(stored))
            }
        }
    }

    async fn discard(&self, source: &DocumentSource) {
        if let Some(file) = source.stored_file() {
            self.ctx.storage().remove_quietly(file).await;
        }
    }

    // ========================================================================
    // Circulars
    // ========================================================================

    async fn load_circular(&self, id: Snowflake) -> ServiceResult<Circular> {
        self.ctx
            .circular_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::CircularNotFound(id).into())
    }

    #[instrument(skip(self))]
    pub async fn list_circulars(
        &self,
        category: Option<&str>,
        page: PageQuery,
    ) -> ServiceResult<PaginatedResponse<CircularResponse>> {
        let rows = self.ctx.circular_repo().list(category, probe(page)).await?;
        Ok(PaginatedResponse::from_rows(
            rows,
            page,
            PageOrder::NewestFirst,
            |c| c.id,
            |c| CircularResponse::from(&c),
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_circular(&self, id: Snowflake) -> ServiceResult<CircularResponse> {
        Ok(CircularResponse::from(&self.load_circular(id).await?))
    }

    #[instrument(skip(self, request, file), fields(title = %request.title))]
    pub async fn create_circular(
        &self,
        author_id: Snowflake,
        request: CreateCircularRequest,
        file: Option<UploadedFile>,
    ) -> ServiceResult<CircularResponse> {
        let id = self.ctx.generate_id();
        let issued_on = request.issued_on.unwrap_or_else(|| Utc::now().date_naive());
        let source = self.store_source(id, request.url, file).await?;

        let mut circular = Circular::new(id, request.title.trim().to_string(), issued_on, source, author_id);
        circular.circular_number = non_blank(request.circular_number);
        circular.category = non_blank(request.category);

        if let Err(e) = self.ctx.circular_repo().create(&circular).await {
            self.discard(&circular.source).await;
            return Err(e.into());
        }

        info!(circular_id = %id, "Circular created");
        Ok(CircularResponse::from(&circular))
    }

    #[instrument(skip(self, request))]
    pub async fn update_circular(&self, id: Snowflake, request: UpdateCircularRequest) -> ServiceResult<CircularResponse> {
        let mut circular = self.load_circular(id).await?;

        if let Some(title) = request.title {
            circular.title = title.trim().to_string();
        }
        if let Some(number) = request.circular_number {
            circular.circular_number = non_blank(number);
        }
        if let Some(issued_on) = request.issued_on {
            circular.issued_on = issued_on;
        }
        if let Some(category) = request.category {
            circular.category = non_blank(category);
        }
        circular.updated_at = Utc::now();

        self.ctx.circular_repo().update(&circular).await?;

        info!(circular_id = %id, "Circular updated");
        Ok(CircularResponse::from(&circular))
    }

    #[instrument(skip(self))]
    pub async fn delete_circular(&self, id: Snowflake) -> ServiceResult<()> {
        let circular = self.load_circular(id).await?;
        self.ctx.circular_repo().delete(id).await?;
        self.discard(&circular.source).await;

        info!(circular_id = %id, "Circular deleted");
        Ok(())
    }

    // ========================================================================
    // Manuals
    // ========================================================================

    async fn load_manual(&self, id: Snowflake) -> ServiceResult<Manual> {
        self.ctx
            .manual_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::ManualNotFound(id).into())
    }

    #[instrument(skip(self))]
    pub async fn list_manuals(&self, category: Option<&str>, page: PageQuery) -> ServiceResult<PaginatedResponse<ManualResponse>> {
        let rows = self.ctx.manual_repo().list(category, probe(page)).await?;
        Ok(PaginatedResponse::from_rows(
            rows,
            page,
            PageOrder::NewestFirst,
            |m| m.id,
            |m| ManualResponse::from(&m),
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_manual(&self, id: Snowflake) -> ServiceResult<ManualResponse> {
        Ok(ManualResponse::from(&self.load_manual(id).await?))
    }

    #[instrument(skip(self, request, file), fields(title = %request.title))]
    pub async fn create_manual(
        &self,
        author_id: Snowflake,
        request: CreateManualRequest,
        file: Option<UploadedFile>,
    ) -> ServiceResult<ManualResponse> {
        let id = self.ctx.generate_id();
        let source = self.store_source(id, request.url, file).await?;

        let mut manual = Manual::new(id, request.title.trim().to_string(), source, author_id);
        manual.description = non_blank(request.description);
        manual.category = non_blank(request.category);

        if let Err(e) = self.ctx.manual_repo().create(&manual).await {
            self.discard(&manual.source).await;
            return Err(e.into());
        }

        info!(manual_id = %id, "Manual created");
        Ok(ManualResponse::from(&manual))
    }

    #[instrument(skip(self, request))]
    pub async fn update_manual(&self, id: Snowflake, request: UpdateManualRequest) -> ServiceResult<ManualResponse> {
        let mut manual = self.load_manual(id).await?;

        if let Some(title) = request.title {
            manual.title = title.trim().to_string();
        }
        if let Some(description) = request.description {
            manual.description = non_blank(description);
        }
        if let Some(category) = request.category {
            manual.category = non_blank(category);
        }
        manual.updated_at = Utc::now();

        self.ctx.manual_repo().update(&manual).await?;

        info!(manual_id = %id, "Manual updated");
        Ok(ManualResponse::from(&manual))
    }

    #[instrument(skip(self))]
    pub async fn delete_manual(&self, id: Snowflake) -> ServiceResult<()> {
        let manual = self.load_manual(id).await?;
        self.ctx.manual_repo().delete(id).await?;
        self.discard(&manual.source).await;

        info!(manual_id = %id, "Manual deleted");
        Ok(())
    }

    // ========================================================================
    // Court cases
    // ========================================================================

    async fn load_court_case(&self, id: Snowflake) -> ServiceResult<CourtCase> {
        self.ctx
            .court_case_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::CourtCaseNotFound(id).into())
    }

    #[instrument(skip(self))]
    pub async fn list_court_cases(
        &self,
        status: Option<CourtCaseStatus>,
        page: PageQuery,
    ) -> ServiceResult<PaginatedResponse<CourtCaseResponse>> {
        let rows = self.ctx.court_case_repo().list(status, probe(page)).await?;
        Ok(PaginatedResponse::from_rows(
            rows,
            page,
            PageOrder::NewestFirst,
            |c| c.id,
            |c| CourtCaseResponse::from(&c),
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_court_case(&self, id: Snowflake) -> ServiceResult<CourtCaseResponse> {
        Ok(CourtCaseResponse::from(&self.load_court_case(id).await?))
    }

    #[instrument(skip(self, request, file), fields(case_number = %request.case_number))]
    pub async fn create_court_case(
        &self,
        author_id: Snowflake,
        request: CreateCourtCaseRequest,
        file: Option<UploadedFile>,
    ) -> ServiceResult<CourtCaseResponse> {
        let status = request
            .status
            .as_deref()
            .map(str::parse::<CourtCaseStatus>)
            .transpose()?
            .unwrap_or_default();

        let id = self.ctx.generate_id();
        let url = non_blank(request.url);
        let document = if url.is_none() && file.is_none() {
            None
        } else {
            Some(self.store_source(id, url, file).await?)
        };

        let mut case = CourtCase::new(
            id,
            request.case_number.trim().to_string(),
            request.title.trim().to_string(),
            request.court.trim().to_string(),
            author_id,
        );
        case.status = status;
        case.next_hearing = request.next_hearing;
        case.description = non_blank(request.description);
        case.document = document;

        if let Err(e) = self.ctx.court_case_repo().create(&case).await {
            if let Some(source) = &case.document {
                self.discard(source).await;
            }
            return Err(e.into());
        }

        info!(court_case_id = %id, "Court case created");
        Ok(CourtCaseResponse::from(&case))
    }

    #[instrument(skip(self, request))]
    pub async fn update_court_case(&self, id: Snowflake, request: UpdateCourtCaseRequest) -> ServiceResult<CourtCaseResponse> {
        let mut case = self.load_court_case(id).await?;

        if let Some(case_number) = request.case_number {
            case.case_number = case_number.trim().to_string();
        }
        if let Some(title) = request.title {
            case.title = title.trim().to_string();
        }
        if let Some(court) = request.court {
            case.court = court.trim().to_string();
        }
        if let Some(status) = request.status {
            case.status = status.parse()?;
        }
        if let Some(next_hearing) = request.next_hearing {
            case.next_hearing = next_hearing;
        }
        if let Some(description) = request.description {
            case.description = non_blank(description);
        }
        case.updated_at = Utc::now();

        self.ctx.court_case_repo().update(&case).await?;

        info!(court_case_id = %id, "Court case updated");
        Ok(CourtCaseResponse::from(&case))
    }

    #[instrument(skip(self))]
    pub async fn delete_court_case(&self, id: Snowflake) -> ServiceResult<()> {
        let case = self.load_court_case(id).await?;
        self.ctx.court_case_repo().delete(id).await?;
        if let Some(source) = &case.document {
            self.discard(source).await;
        }

        info!(court_case_id = %id, "Court case deleted");
        Ok(())
    }
}
