//! Document columns <-> `DocumentSource`, plus the document entity mappers

use crea_core::entities::{Circular, CourtCase, CourtCaseStatus, Manual};
use crea_core::value_objects::{DocumentSource, Snowflake, StoredFile};

use crate::models::{CircularModel, CourtCaseModel, DocumentColumnsModel, ManualModel};

/// Rebuilds the source from its columns. The table CHECK guarantees at most
/// one side is populated.
pub fn document_from_columns(cols: DocumentColumnsModel) -> Option<DocumentSource> {
    match (cols.source_url, cols.file_path) {
        (_, Some(path)) => Some(DocumentSource::File(StoredFile {
            original_name: cols.file_name.unwrap_or_else(|| path.clone()),
            path,
            content_type: cols
                .file_content_type
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            size: cols.file_size.unwrap_or(0),
        })),
        (Some(url), None) => Some(DocumentSource::Url { url }),
        (None, None) => None,
    }
}

/// Values bound for the document columns of an insert
pub struct DocumentColumns<'a> {
    pub source_url: Option<&'a str>,
    pub file_path: Option<&'a str>,
    pub file_name: Option<&'a str>,
    pub file_content_type: Option<&'a str>,
    pub file_size: Option<i64>,
}

impl<'a> DocumentColumns<'a> {
    pub fn new(source: Option<&'a DocumentSource>) -> Self {
        match source {
            Some(DocumentSource::Url { url }) => Self {
                source_url: Some(url),
                file_path: None,
                file_name: None,
                file_content_type: None,
                file_size: None,
            },
            Some(DocumentSource::File(file)) => Self {
                source_url: None,
                file_path: Some(&file.path),
                file_name: Some(&file.original_name),
                file_content_type: Some(&file.content_type),
                file_size: Some(file.size),
            },
            None => Self {
                source_url: None,
                file_path: None,
                file_name: None,
                file_content_type: None,
                file_size: None,
            },
        }
    }
}

fn required_source(cols: DocumentColumnsModel) -> DocumentSource {
    document_from_columns(cols).unwrap_or(DocumentSource::Url { url: String::new() })
}

impl From<CircularModel> for Circular {
    fn from(model: CircularModel) -> Self {
        Circular {
            id: Snowflake::new(model.id),
            title: model.title,
            circular_number: model.circular_number,
            issued_on: model.issued_on,
            category: model.category,
            source: required_source(model.document),
            created_by: Snowflake::new(model.created_by),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ManualModel> for Manual {
    fn from(model: ManualModel) -> Self {
        Manual {
            id: Snowflake::new(model.id),
            title: model.title,
            description: model.description,
            category: model.category,
            source: required_source(model.document),
            created_by: Snowflake::new(model.created_by),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<CourtCaseModel> for CourtCase {
    fn from(model: CourtCaseModel) -> Self {
        CourtCase {
            id: Snowflake::new(model.id),
            case_number: model.case_number,
            title: model.title,
            court: model.court,
            status: model.status.parse().unwrap_or(CourtCaseStatus::Pending),
            next_hearing: model.next_hearing,
            description: model.description,
            document: document_from_columns(model.document),
            created_by: Snowflake::new(model.created_by),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
