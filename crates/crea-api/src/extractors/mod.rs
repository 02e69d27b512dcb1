//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, multipart forms and
//! pagination.

mod auth;
mod multipart;
mod pagination;
mod path;
mod validated;

pub use auth::{AdminUser, AuthUser, OptionalAuthUser};
pub use multipart::{DocumentForm, FileUpload};
pub use pagination::{Pagination, PaginationParams};
pub use path::IdPath;
pub use validated::{OptionalValidatedJson, ValidatedJson};
