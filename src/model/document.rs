//! Report-level types.

use super::{Page, Table};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A layout-extracted report, as written by the upstream extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report metadata (passed through to outputs)
    pub metainfo: Metainfo,

    /// Pages in document order
    pub content: Vec<Page>,

    /// Tables referenced by `table` blocks
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Report {
    /// Create a new empty report.
    pub fn new(metainfo: Metainfo) -> Self {
        Self {
            metainfo,
            content: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Stable document identifier.
    pub fn name(&self) -> &str {
        &self.metainfo.sha1_name
    }

    /// Get the number of pages in the report.
    pub fn page_count(&self) -> usize {
        self.content.len()
    }

    /// Get a page by its page number (first match wins).
    pub fn get_page(&self, page: u32) -> Option<&Page> {
        self.content.iter().find(|p| p.page == page)
    }

    /// Add a page to the report.
    pub fn add_page(&mut self, page: Page) {
        self.content.push(page);
    }

    /// Add a table to the report.
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Get a table by id (first match wins).
    pub fn get_table(&self, table_id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.table_id == table_id)
    }
}

/// Report metadata.
///
/// Only `sha1_name` is interpreted; every other field is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metainfo {
    /// Stable document identifier, used to name exported files
    pub sha1_name: String,

    /// Remaining metadata fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metainfo {
    /// Create metadata with just a name.
    pub fn named(sha1_name: impl Into<String>) -> Self {
        Self {
            sha1_name: sha1_name.into(),
            extra: Map::new(),
        }
    }

    /// Set an extra field and return self.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A report after formatting and cleanup: one text string per page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedReport {
    /// Metadata copied from the source report
    pub metainfo: Metainfo,

    /// Cleaned page texts
    pub content: ProcessedContent,
}

impl ProcessedReport {
    /// Create a processed report from its pages.
    pub fn new(metainfo: Metainfo, pages: Vec<ProcessedPage>) -> Self {
        Self {
            metainfo,
            content: ProcessedContent {
                chunks: None,
                pages,
            },
        }
    }

    /// Stable document identifier.
    pub fn name(&self) -> &str {
        &self.metainfo.sha1_name
    }

    /// Cleaned pages in document order.
    pub fn pages(&self) -> &[ProcessedPage] {
        &self.content.pages
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> usize {
        self.content.pages.len()
    }

    /// All page texts joined with blank lines.
    pub fn plain_text(&self) -> String {
        self.content
            .pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Content section of a processed report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedContent {
    /// Reserved for downstream chunking; always written as `null`
    #[serde(default)]
    pub chunks: Option<Value>,

    /// Cleaned pages
    pub pages: Vec<ProcessedPage>,
}

/// A cleaned page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedPage {
    /// Page number from the source report
    pub page: u32,

    /// Rendered and normalized Markdown text
    pub text: String,
}

impl ProcessedPage {
    /// Create a processed page.
    pub fn new(page: u32, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
        }
    }
}

/// A report file of either kind.
#[derive(Debug, Clone)]
pub enum ReportFile {
    /// Raw extractor output
    Raw(Report),
    /// Already formatted and cleaned
    Processed(ProcessedReport),
}

impl ReportFile {
    /// Stable document identifier.
    pub fn name(&self) -> &str {
        match self {
            ReportFile::Raw(r) => r.name(),
            ReportFile::Processed(r) => r.name(),
        }
    }

    /// Report metadata.
    pub fn metainfo(&self) -> &Metainfo {
        match self {
            ReportFile::Raw(r) => &r.metainfo,
            ReportFile::Processed(r) => &r.metainfo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metainfo_passthrough() {
        let json = r#"{"sha1_name": "abc", "company_name": "Acme", "pages_amount": 3}"#;
        let meta: Metainfo = serde_json::from_str(json).unwrap();
        assert_eq!(meta.sha1_name, "abc");
        assert_eq!(meta.extra["company_name"], "Acme");

        let back = serde_json::to_value(&meta).unwrap();
        assert_eq!(back["pages_amount"], 3);
        assert_eq!(back["sha1_name"], "abc");
    }

    #[test]
    fn test_processed_report_shape() {
        let report = ProcessedReport::new(
            Metainfo::named("abc"),
            vec![ProcessedPage::new(1, "Hello")],
        );
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["content"]["chunks"].is_null());
        assert_eq!(value["content"]["pages"][0]["page"], 1);
        assert_eq!(value["content"]["pages"][0]["text"], "Hello");
    }

    #[test]
    fn test_report_lookup() {
        let mut report = Report::new(Metainfo::named("abc"));
        report.add_page(Page::new(7));
        report.add_table(Table::new("t1", "| A |"));

        assert!(report.get_page(7).is_some());
        assert!(report.get_page(1).is_none());
        assert_eq!(report.get_table("t1").map(|t| t.markdown.as_str()), Some("| A |"));
        assert!(report.get_table("t2").is_none());
    }
}
