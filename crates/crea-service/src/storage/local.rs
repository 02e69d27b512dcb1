//! Uploaded files on local disk
//!
//! Files land at `{upload_dir}/{documents|images}/{id}.{ext}` and are served
//! by the static `/uploads` mount. The stored name never derives from the
//! client's file name.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crea_core::{DomainError, Snowflake, StoredFile};
use tracing::{info, instrument, warn};

/// What an upload is for, which decides where it goes and what it may be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Document,
    Image,
}

impl UploadKind {
    fn dir(self) -> &'static str {
        match self {
            Self::Document => "documents",
            Self::Image => "images",
        }
    }

    fn allowed(self) -> &'static [FileType] {
        match self {
            Self::Document => DOCUMENT_TYPES,
            Self::Image => IMAGE_TYPES,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FileType {
    mime: &'static str,
    ext: &'static str,
    aliases: &'static [&'static str],
}

const PDF: FileType = FileType { mime: "application/pdf", ext: "pdf", aliases: &[] };
const DOC: FileType = FileType { mime: "application/msword", ext: "doc", aliases: &[] };
const DOCX: FileType = FileType {
    mime: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ext: "docx",
    aliases: &[],
};
const XLS: FileType = FileType { mime: "application/vnd.ms-excel", ext: "xls", aliases: &[] };
const XLSX: FileType = FileType {
    mime: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ext: "xlsx",
    aliases: &[],
};
const JPEG: FileType = FileType { mime: "image/jpeg", ext: "jpg", aliases: &["jpeg"] };
const PNG: FileType = FileType { mime: "image/png", ext: "png", aliases: &[] };
const WEBP: FileType = FileType { mime: "image/webp", ext: "webp", aliases: &[] };
const GIF: FileType = FileType { mime: "image/gif", ext: "gif", aliases: &[] };

const DOCUMENT_TYPES: &[FileType] = &[PDF, DOC, DOCX, XLS, XLSX, JPEG, PNG];
const IMAGE_TYPES: &[FileType] = &[JPEG, PNG, WEBP, GIF];

/// Match a declared content type, falling back to the file extension when
/// the client sent a generic type.
fn resolve_type(kind: UploadKind, content_type: &str, original_name: &str) -> Result<FileType, DomainError> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    let allowed = kind.allowed();

    if let Some(found) = allowed.iter().find(|t| t.mime == mime) {
        return Ok(*found);
    }

    if mime.is_empty() || mime == "application/octet-stream" {
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if let Some(found) = allowed
            .iter()
            .find(|t| t.ext == ext || t.aliases.contains(&ext.as_str()))
        {
            return Ok(*found);
        }
    }

    let shown = if mime.is_empty() { original_name.to_string() } else { mime };
    Err(DomainError::UnsupportedFileType(shown))
}

/// Local-disk file store rooted at the upload directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
    max_bytes: u64,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>, max_bytes: u64) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Validate and write an upload under a fresh id.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn save(
        &self,
        kind: UploadKind,
        id: Snowflake,
        original_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::ValidationError("uploaded file is empty".to_string()));
        }
        if bytes.len() as u64 > self.max_bytes {
            return Err(DomainError::FileTooLarge {
                max_bytes: self.max_bytes,
            });
        }

        let file_type = resolve_type(kind, content_type, original_name)?;
        let relative = format!("{}/{id}.{}", kind.dir(), file_type.ext);
        let target = self.root.join(&relative);

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::InternalError(format!("create upload dir: {e}")))?;
        }
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| DomainError::InternalError(format!("write upload: {e}")))?;

        info!(path = %relative, "Stored upload");

        Ok(StoredFile {
            path: relative,
            original_name: sanitize_name(original_name),
            content_type: file_type.mime.to_string(),
            size: bytes.len() as i64,
        })
    }

    /// Delete a stored file; a file that is already gone is not an error.
    #[instrument(skip(self, file), fields(path = %file.path))]
    pub async fn remove(&self, file: &StoredFile) -> Result<(), DomainError> {
        let Some(target) = self.resolve(&file.path) else {
            warn!("Refusing to remove path outside upload root");
            return Ok(());
        };

        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::InternalError(format!("remove upload: {e}"))),
        }
    }

    /// Best-effort removal used after the owning record is gone
    pub async fn remove_quietly(&self, file: &StoredFile) {
        if let Err(e) = self.remove(file).await {
            warn!(error = %e, path = %file.path, "Failed to remove stored file");
        }
    }

    fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let path = Path::new(relative);
        let clean = path
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        clean.then(|| self.root.join(path))
    }
}

fn sanitize_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).take(255).collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("crea-storage-{tag}-{}", std::process::id()))
    }

    #[test]
    fn test_resolve_type_by_mime() {
        let t = resolve_type(UploadKind::Document, "application/pdf", "x.bin").unwrap();
        assert_eq!(t.ext, "pdf");
        let t = resolve_type(UploadKind::Image, "image/png; charset=binary", "x").unwrap();
        assert_eq!(t.ext, "png");
    }

    #[test]
    fn test_resolve_type_falls_back_to_extension() {
        let t = resolve_type(UploadKind::Document, "application/octet-stream", "Rules.DOCX").unwrap();
        assert_eq!(t.mime, DOCX.mime);
        let t = resolve_type(UploadKind::Image, "", "photo.jpeg").unwrap();
        assert_eq!(t.ext, "jpg");
    }

    #[test]
    fn test_resolve_type_rejects_unlisted() {
        let err = resolve_type(UploadKind::Image, "application/pdf", "a.pdf").unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_FILE_TYPE");
        assert!(resolve_type(UploadKind::Document, "text/html", "a.html").is_err());
        assert!(resolve_type(UploadKind::Document, "application/octet-stream", "run.exe").is_err());
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_name("C:\\docs\\order.pdf"), "order.pdf");
        assert_eq!(sanitize_name("  "), "upload");
    }

    #[tokio::test]
    async fn test_save_and_remove() {
        let root = temp_root("save");
        let storage = FileStorage::new(&root, 1024);

        let stored = storage
            .save(UploadKind::Document, Snowflake::new(77), "order.pdf", "application/pdf", b"%PDF-1.4")
            .await
            .unwrap();
        assert_eq!(stored.path, "documents/77.pdf");
        assert_eq!(stored.size, 8);
        assert!(root.join("documents/77.pdf").exists());

        storage.remove(&stored).await.unwrap();
        assert!(!root.join("documents/77.pdf").exists());
        // already gone
        storage.remove(&stored).await.unwrap();

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn test_size_limit() {
        let storage = FileStorage::new(temp_root("limit"), 4);
        let err = storage
            .save(UploadKind::Image, Snowflake::new(1), "a.png", "image/png", b"12345")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::FileTooLarge { max_bytes: 4 }));
    }

    #[tokio::test]
    async fn test_remove_ignores_escaping_paths() {
        let storage = FileStorage::new(temp_root("escape"), 4);
        let file = StoredFile {
            path: "../outside.txt".into(),
            original_name: "x".into(),
            content_type: "text/plain".into(),
            size: 1,
        };
        assert!(storage.remove(&file).await.is_ok());
    }
}
