//! Template catalog for the EzDoc web shell.
//!
//! Templates are held in memory and seeded with sample records. The crate
//! covers the table (search, sort, paging), row actions and upload checks.

pub mod date;
pub mod error;
pub mod query;
pub mod template;
pub mod upload;

pub use date::format_short_date;
pub use error::TemplateError;
pub use query::{DEFAULT_PAGE_SIZE, SortKey, SortOrder, TemplatePage, TemplateQuery};
pub use template::{CatalogStats, Template, TemplateCatalog, format_size};
pub use upload::{MAX_UPLOAD_BYTES, UploadCandidate, ValidatedUpload, validate_upload};
