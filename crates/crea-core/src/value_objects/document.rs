//! Where a published document lives: an external link or an uploaded file.

use crate::error::DomainError;

/// An uploaded file kept under the upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Path relative to the upload root, e.g. `documents/1234.pdf`.
    pub path: String,
    pub original_name: String,
    pub content_type: String,
    pub size: i64,
}

impl StoredFile {
    /// Public URL under the static `/uploads` mount.
    pub fn public_url(&self) -> String {
        format!("/uploads/{}", self.path)
    }
}

/// Exactly one of an external URL or an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Url { url: String },
    File(StoredFile),
}

/// The half of an upload form that supplies a document, checked before
/// anything is written to disk. `F` is whatever carries the file bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceInput<F> {
    Url(String),
    File(F),
}

impl<F> SourceInput<F> {
    /// Both or neither present is rejected, as is a non-http(s) URL.
    /// A blank URL counts as missing.
    pub fn from_parts(url: Option<String>, file: Option<F>) -> Result<Self, DomainError> {
        let url = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty());
        match (url, file) {
            (Some(url), None) if is_http_url(&url) => Ok(Self::Url(url)),
            (Some(_), None) => Err(DomainError::InvalidDocumentSource(
                "url must start with http:// or https://".to_string(),
            )),
            (None, Some(file)) => Ok(Self::File(file)),
            (Some(_), Some(_)) => Err(DomainError::InvalidDocumentSource(
                "provide either a url or a file, not both".to_string(),
            )),
            (None, None) => Err(DomainError::InvalidDocumentSource(
                "a url or a file is required".to_string(),
            )),
        }
    }
}

impl DocumentSource {
    pub fn stored_file(&self) -> Option<&StoredFile> {
        match self {
            Self::File(file) => Some(file),
            Self::Url { .. } => None,
        }
    }
}

pub fn is_http_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf() -> StoredFile {
        StoredFile {
            path: "documents/1.pdf".to_string(),
            original_name: "order.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            size: 2048,
        }
    }

    #[test]
    fn test_exactly_one_source() {
        assert_eq!(
            SourceInput::from_parts(Some("https://cr.gov.in/a.pdf".into()), None::<StoredFile>).unwrap(),
            SourceInput::Url("https://cr.gov.in/a.pdf".to_string())
        );
        assert_eq!(SourceInput::from_parts(None, Some(pdf())).unwrap(), SourceInput::File(pdf()));

        let both = SourceInput::from_parts(Some("https://x.in".into()), Some(pdf()));
        assert_eq!(both.unwrap_err().code(), "INVALID_DOCUMENT_SOURCE");

        let neither = SourceInput::<StoredFile>::from_parts(None, None);
        assert_eq!(neither.unwrap_err().code(), "INVALID_DOCUMENT_SOURCE");
    }

    #[test]
    fn test_blank_url_counts_as_missing() {
        let source = SourceInput::from_parts(Some("   ".into()), Some(pdf())).unwrap();
        assert_eq!(source, SourceInput::File(pdf()));

        let neither = SourceInput::<StoredFile>::from_parts(Some(String::new()), None);
        assert!(neither.is_err());
    }

    #[test]
    fn test_non_http_url_is_rejected_with_file_absent() {
        let err = SourceInput::<StoredFile>::from_parts(Some("ftp://cr.gov.in/a.pdf".into()), None).unwrap_err();
        assert_eq!(err.code(), "INVALID_DOCUMENT_SOURCE");
    }

    #[test]
    fn test_url_scheme() {
        assert!(is_http_url("http://example.com"));
        assert!(is_http_url("HTTPS://example.com/x"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("javascript:alert(1)"));
        assert!(SourceInput::<StoredFile>::from_parts(Some("file:///etc/passwd".into()), None).is_err());
    }
}
