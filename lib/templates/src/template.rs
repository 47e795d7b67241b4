//! Template records and the in-memory catalog.
//!
//! There is no backend for templates yet; the catalog starts from a fixed
//! set of sample records and all edits live in memory.

use chrono::{Datelike, NaiveDate};
use ezdoc_core::{Result, TemplateId};
use serde::{Deserialize, Serialize};

use crate::error::TemplateError;
use crate::upload::ValidatedUpload;

/// A document template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub author: String,
    pub created_date: NaiveDate,
    pub updated_date: NaiveDate,
    /// Dotted version string, e.g. "2.1".
    pub version: String,
    pub size_bytes: u64,
    /// File extension without the dot, e.g. "docx".
    pub file_type: String,
}

impl Template {
    /// Human-readable file size ("245 KB", "2.1 MB").
    #[must_use]
    pub fn size_label(&self) -> String {
        format_size(self.size_bytes)
    }
}

/// Formats a byte count the way the templates table shows it.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        #[allow(clippy::cast_precision_loss)]
        let mb = bytes as f64 / MB as f64;
        format!("{mb:.1} MB")
    } else if bytes >= KB {
        format!("{} KB", bytes.div_ceil(KB))
    } else {
        format!("{bytes} B")
    }
}

/// Headline numbers shown above the templates table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub uploaded_this_month: usize,
    pub total_size_bytes: u64,
}

/// In-memory collection of templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the sample catalog the templates page starts with.
    #[must_use]
    pub fn mock() -> Self {
        let sample = |name: &str,
                      author: &str,
                      created: (i32, u32, u32),
                      updated: (i32, u32, u32),
                      version: &str,
                      kb: u64| Template {
            id: TemplateId::new(),
            name: name.to_string(),
            author: author.to_string(),
            created_date: date(created),
            updated_date: date(updated),
            version: version.to_string(),
            size_bytes: kb * 1024,
            file_type: "docx".to_string(),
        };

        Self {
            templates: vec![
                sample(
                    "Contrato de Trabajo Estándar",
                    "María González",
                    (2024, 11, 1),
                    (2024, 11, 25),
                    "2.1",
                    245,
                ),
                sample(
                    "Propuesta Comercial",
                    "Carlos Rodríguez",
                    (2024, 10, 15),
                    (2024, 11, 20),
                    "1.5",
                    180,
                ),
                sample(
                    "Informe Mensual",
                    "Ana López",
                    (2024, 9, 28),
                    (2024, 11, 18),
                    "3.0",
                    320,
                ),
            ],
        }
    }

    #[must_use]
    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: TemplateId) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Removes a template, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::NotFound`] if no template has `id`.
    pub fn remove(&mut self, id: TemplateId) -> Result<Template, TemplateError> {
        let index = self
            .templates
            .iter()
            .position(|t| t.id == id)
            .ok_or(TemplateError::NotFound { id })?;
        Ok(self.templates.remove(index))
    }

    /// Adds a copy of a template named "<name> (copia)", dated `today`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::NotFound`] if no template has `id`.
    pub fn duplicate(
        &mut self,
        id: TemplateId,
        today: NaiveDate,
    ) -> Result<TemplateId, TemplateError> {
        let original = self.get(id).ok_or(TemplateError::NotFound { id })?;
        let copy = Template {
            id: TemplateId::new(),
            name: format!("{} (copia)", original.name),
            created_date: today,
            updated_date: today,
            ..original.clone()
        };
        let copy_id = copy.id;
        self.templates.push(copy);
        Ok(copy_id)
    }

    /// Adds an uploaded file as version 1.0 of a new template.
    pub fn add_upload(
        &mut self,
        upload: ValidatedUpload,
        author: &str,
        today: NaiveDate,
    ) -> TemplateId {
        let template = Template {
            id: TemplateId::new(),
            name: upload.name,
            author: author.to_string(),
            created_date: today,
            updated_date: today,
            version: "1.0".to_string(),
            size_bytes: upload.size_bytes,
            file_type: upload.file_type,
        };
        let id = template.id;
        self.templates.push(template);
        id
    }

    /// Computes the headline numbers relative to `today`.
    #[must_use]
    pub fn stats(&self, today: NaiveDate) -> CatalogStats {
        CatalogStats {
            total: self.templates.len(),
            uploaded_this_month: self
                .templates
                .iter()
                .filter(|t| {
                    t.created_date.year() == today.year() && t.created_date.month() == today.month()
                })
                .count(),
            total_size_bytes: self.templates.iter().map(|t| t.size_bytes).sum(),
        }
    }
}

fn date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
