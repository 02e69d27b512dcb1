//! Entity to model mappers
//!
//! - `From<Model> for Entity`: database rows to domain objects
//! - `DocumentColumns`: binds a `DocumentSource` to its table columns

mod community;
mod document;
mod payment;
mod site_content;
mod user;

pub use document::{document_from_columns, DocumentColumns};
