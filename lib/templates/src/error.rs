//! Error types for the templates crate.

use ezdoc_core::TemplateId;
use std::fmt;

/// Errors from template catalog operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// No template has this ID.
    NotFound { id: TemplateId },
    /// The uploaded file is not a Word document.
    UnsupportedFileType { file_name: String },
    /// The uploaded file exceeds the size limit.
    FileTooLarge { file_name: String, size_bytes: u64 },
    /// The uploaded file has no usable name.
    EmptyFileName,
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "template '{id}' not found"),
            Self::UnsupportedFileType { .. } => {
                f.write_str("Solo se permiten archivos de Word (.doc, .docx)")
            }
            Self::FileTooLarge { .. } => f.write_str("El archivo debe ser menor a 10MB"),
            Self::EmptyFileName => f.write_str("El archivo no tiene nombre"),
        }
    }
}

impl std::error::Error for TemplateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_errors_use_the_ui_wording() {
        let err = TemplateError::UnsupportedFileType {
            file_name: "photo.png".to_string(),
        };
        assert_eq!(err.to_string(), "Solo se permiten archivos de Word (.doc, .docx)");

        let err = TemplateError::FileTooLarge {
            file_name: "big.docx".to_string(),
            size_bytes: 11 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "El archivo debe ser menor a 10MB");
    }

    #[test]
    fn not_found_names_the_id() {
        let id = TemplateId::new();
        let err = TemplateError::NotFound { id };
        assert!(err.to_string().contains(&id.to_string()));
    }
}
