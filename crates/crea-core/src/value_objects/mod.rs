//! Value objects - small immutable types shared across the domain

mod document;
mod money;
mod snowflake;

pub use document::{is_http_url, DocumentSource, SourceInput, StoredFile};
pub use money::{rupees_to_paise, PAISE_PER_RUPEE};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
