//! Validation of files picked in the upload dialog.

use ezdoc_core::Result;

use crate::error::TemplateError;

/// Largest accepted upload, exclusive.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types browsers report for Word documents.
pub const WORD_MIME_TYPES: [&str; 2] = [
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Value for the file input's `accept` attribute.
pub const ACCEPT: &str = ".doc,.docx";

/// What the browser tells us about a picked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// A file that passed validation, ready to become a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpload {
    /// File name without its extension.
    pub name: String,
    /// Lowercased extension, "doc" or "docx".
    pub file_type: String,
    pub size_bytes: u64,
}

/// Checks that a picked file is a Word document under [`MAX_UPLOAD_BYTES`].
///
/// The MIME type is trusted when it is a Word type. Some platforms report an
/// empty or generic type for `.doc`, so the extension is accepted as well.
///
/// # Errors
///
/// Returns [`TemplateError::EmptyFileName`],
/// [`TemplateError::UnsupportedFileType`] or [`TemplateError::FileTooLarge`].
pub fn validate_upload(candidate: &UploadCandidate) -> Result<ValidatedUpload, TemplateError> {
    let file_name = candidate.file_name.trim();
    if file_name.is_empty() {
        return Err(TemplateError::EmptyFileName.into());
    }

    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, ext.to_ascii_lowercase()),
        _ => (file_name, String::new()),
    };

    let word_mime = WORD_MIME_TYPES.contains(&candidate.mime_type.as_str());
    let word_extension = matches!(extension.as_str(), "doc" | "docx");
    if !word_mime && !word_extension {
        return Err(TemplateError::UnsupportedFileType {
            file_name: file_name.to_string(),
        }
        .into());
    }

    if candidate.size_bytes >= MAX_UPLOAD_BYTES {
        return Err(TemplateError::FileTooLarge {
            file_name: file_name.to_string(),
            size_bytes: candidate.size_bytes,
        }
        .into());
    }

    let file_type = if word_extension {
        extension
    } else if candidate.mime_type == WORD_MIME_TYPES[0] {
        "doc".to_string()
    } else {
        "docx".to_string()
    };

    Ok(ValidatedUpload {
        name: stem.to_string(),
        file_type,
        size_bytes: candidate.size_bytes,
    })
}
