//! Multipart form extractors
//!
//! Document uploads arrive as `multipart/form-data` with text fields and an
//! optional `file` part. The same routes also accept a plain JSON body when
//! the document is referenced by URL.

use axum::{
    async_trait,
    extract::{
        multipart::{Field, MultipartError},
        FromRequest, Multipart, Request,
    },
    http::{header::CONTENT_TYPE, StatusCode},
    Json,
};
use crea_common::AppError;
use crea_service::dto::UploadedFile;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use super::validated::json_rejection;
use crate::response::ApiError;

/// Name of the form part carrying the uploaded file
const FILE_FIELD: &str = "file";

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge.into();
    }
    ApiError::invalid_body(err.body_text())
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

async fn read_file(field: Field<'_>) -> Result<Option<UploadedFile>, ApiError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field.bytes().await.map_err(multipart_error)?;

    // Browsers send an empty part when no file was chosen.
    if bytes.is_empty() && file_name.is_empty() {
        return Ok(None);
    }

    Ok(Some(UploadedFile {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

/// Text fields and the optional file of one multipart body
#[derive(Debug, Default)]
struct RawForm {
    fields: Map<String, Value>,
    file: Option<UploadedFile>,
}

impl RawForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = RawForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == FILE_FIELD {
                form.file = read_file(field).await?;
                continue;
            }

            let text = field.text().await.map_err(multipart_error)?;
            let text = text.trim();
            // An empty input means "not provided".
            if !text.is_empty() {
                form.fields.insert(name, Value::String(text.to_string()));
            }
        }

        Ok(form)
    }
}

/// Document metadata plus an optional uploaded file
///
/// Accepts `multipart/form-data` or `application/json`. JSON bodies never
/// carry a file.
#[derive(Debug)]
pub struct DocumentForm<T> {
    pub data: T,
    pub file: Option<UploadedFile>,
}

#[async_trait]
impl<S, T> FromRequest<S> for DocumentForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let Json(data) = Json::<T>::from_request(req, state)
                .await
                .map_err(json_rejection)?;
            data.validate()?;
            return Ok(DocumentForm { data, file: None });
        }

        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;
        let form = RawForm::read(multipart).await?;

        let data: T = serde_json::from_value(Value::Object(form.fields))
            .map_err(|e| ApiError::invalid_body(e.to_string()))?;
        data.validate()?;

        Ok(DocumentForm { data, file: form.file })
    }
}

/// A single required `file` part
#[derive(Debug)]
pub struct FileUpload(pub UploadedFile);

#[async_trait]
impl<S> FromRequest<S> for FileUpload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;
        let form = RawForm::read(multipart).await?;

        form.file
            .map(FileUpload)
            .ok_or_else(|| ApiError::invalid_body("Missing 'file' part"))
    }
}
