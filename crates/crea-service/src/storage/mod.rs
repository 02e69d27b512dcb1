//! File storage for uploaded documents and images

mod local;

pub use local::{FileStorage, UploadKind};
