//! Search, sort and pagination for the templates table.

use std::cmp::Ordering;

use crate::template::Template;

/// Rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    Author,
    Created,
    Updated,
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Table state: search text, sort column and current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateQuery {
    search: String,
    sort_key: SortKey,
    sort_order: SortOrder,
    page: usize,
    page_size: usize,
}

impl Default for TemplateQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_key: SortKey::Updated,
            sort_order: SortOrder::Descending,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TemplateQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Sets the search text and returns to the first page.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Clicking a column header: the same column flips direction, a new
    /// column starts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_order = self.sort_order.reversed();
        } else {
            self.sort_key = key;
            self.sort_order = SortOrder::Ascending;
        }
    }

    /// Moves to `page`, clamped to at least 1. Out-of-range pages are
    /// clamped again when the query is applied.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Filters, sorts and slices `templates`.
    #[must_use]
    pub fn apply(&self, templates: &[Template]) -> TemplatePage {
        let needle = self.search.trim().to_lowercase();
        let mut rows: Vec<Template> = templates
            .iter()
            .filter(|t| needle.is_empty() || t.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        rows.sort_by(|a, b| self.sort_order.apply(compare(self.sort_key, a, b)));

        let total = rows.len();
        let page_size = self.page_size.max(1);
        let page_count = total.div_ceil(page_size).max(1);
        let page = self.page.clamp(1, page_count);
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(total);

        TemplatePage {
            rows: rows.drain(start..end).collect(),
            total,
            page,
            page_count,
            from: if total == 0 { 0 } else { start + 1 },
            to: end,
        }
    }
}

fn compare(key: SortKey, a: &Template, b: &Template) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Author => a.author.to_lowercase().cmp(&b.author.to_lowercase()),
        SortKey::Created => a.created_date.cmp(&b.created_date),
        SortKey::Updated => a.updated_date.cmp(&b.updated_date),
        SortKey::Version => compare_versions(&a.version, &b.version),
    }
}

/// Compares dotted versions numerically segment by segment, so "10.0"
/// sorts after "2.1". Non-numeric segments fall back to text order.
fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePage {
    pub rows: Vec<Template>,
    /// Matches across all pages.
    pub total: usize,
    /// Current page, 1-based, after clamping.
    pub page: usize,
    pub page_count: usize,
    /// 1-based index of the first row shown, 0 when there are no matches.
    pub from: usize,
    pub to: usize,
}

impl TemplatePage {
    /// "1-3 de 3 plantillas".
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}-{} de {} plantillas", self.from, self.to, self.total)
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateCatalog;
    use chrono::NaiveDate;

    fn names(page: &TemplatePage) -> Vec<&str> {
        page.rows.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn default_sort_is_most_recently_updated_first() {
        let catalog = TemplateCatalog::mock();
        let page = TemplateQuery::new().apply(catalog.all());

        assert_eq!(
            names(&page),
            ["Contrato de Trabajo Estándar", "Propuesta Comercial", "Informe Mensual"]
        );
        assert_eq!(page.summary(), "1-3 de 3 plantillas");
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn search_is_case_insensitive_and_resets_page() {
        let catalog = TemplateCatalog::mock();
        let mut query = TemplateQuery::new();
        query.set_page(4);
        query.set_search("PROPUESTA");

        assert_eq!(query.page(), 1);
        let page = query.apply(catalog.all());
        assert_eq!(names(&page), ["Propuesta Comercial"]);
    }

    #[test]
    fn no_matches_reports_zero_range() {
        let catalog = TemplateCatalog::mock();
        let mut query = TemplateQuery::new();
        query.set_search("factura");

        let page = query.apply(catalog.all());
        assert!(page.rows.is_empty());
        assert_eq!(page.summary(), "0-0 de 0 plantillas");
    }

    #[test]
    fn toggling_sort_flips_then_switches_column() {
        let catalog = TemplateCatalog::mock();
        let mut query = TemplateQuery::new();

        query.toggle_sort(SortKey::Name);
        assert_eq!(query.sort_order(), SortOrder::Ascending);
        assert_eq!(
            names(&query.apply(catalog.all())),
            ["Contrato de Trabajo Estándar", "Informe Mensual", "Propuesta Comercial"]
        );

        query.toggle_sort(SortKey::Name);
        assert_eq!(query.sort_order(), SortOrder::Descending);
        assert_eq!(names(&query.apply(catalog.all()))[0], "Propuesta Comercial");

        query.toggle_sort(SortKey::Author);
        assert_eq!(query.sort_key(), SortKey::Author);
        assert_eq!(query.sort_order(), SortOrder::Ascending);
        assert_eq!(names(&query.apply(catalog.all()))[0], "Informe Mensual");
    }

    #[test]
    fn versions_sort_numerically() {
        assert_eq!(compare_versions("10.0", "2.1"), Ordering::Greater);
        assert_eq!(compare_versions("1.5", "1.5"), Ordering::Equal);
        assert_eq!(compare_versions("1", "1.0"), Ordering::Less);
    }

    #[test]
    fn pages_hold_ten_rows_and_clamp() {
        let mut catalog = TemplateCatalog::mock();
        let id = catalog.all()[0].id;
        let today = NaiveDate::from_ymd_opt(2024, 11, 28).expect("date");
        for _ in 0..9 {
            catalog.duplicate(id, today).expect("duplicate");
        }
        assert_eq!(catalog.len(), 12);

        let mut query = TemplateQuery::new();
        let first = query.apply(catalog.all());
        assert_eq!(first.rows.len(), 10);
        assert_eq!(first.summary(), "1-10 de 12 plantillas");
        assert!(first.has_next());

        query.set_page(7);
        let last = query.apply(catalog.all());
        assert_eq!(last.page, 2);
        assert_eq!(last.rows.len(), 2);
        assert_eq!(last.summary(), "11-12 de 12 plantillas");
        assert!(last.has_previous());
    }
}
