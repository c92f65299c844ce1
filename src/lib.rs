//! # pagemerge
//!
//! Turns layout-extracted report pages into clean, sectioned Markdown.
//!
//! The upstream extractor emits one JSON file per report: pages of typed
//! blocks (headers, paragraphs, list items, footnotes, table references)
//! plus pre-rendered tables. This library merges each page's blocks into
//! one Markdown text, repairs glyph-name artifacts left by the PDF fonts,
//! and exports reports as a single Markdown document.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pagemerge::{process_file, render};
//!
//! fn main() -> pagemerge::Result<()> {
//!     let report = process_file("parsed/9f2c.json")?;
//!     for page in report.pages() {
//!         println!("page {}: {} chars", page.page, page.text.len());
//!     }
//!
//!     let markdown = render::to_markdown(&report);
//!     std::fs::write("9f2c.md", markdown)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Page merging**: Headings, table groups and list groups from typed blocks
//! - **Table sources**: Markdown, serialized text, or both
//! - **Glyph cleanup**: `/zero.tnum`-style artifacts mapped back to characters
//! - **Batch processing**: Per-report isolation, uses Rayon across reports
//! - **Markdown export**: One document per report, one section per page

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use convert::{
    BatchReport, DocumentOutcome, ExportReport, ProcessingSummary, ReportProcessor,
};
pub use detect::{detect_kind, parse_report_str, read_report_file, ReportKind};
pub use error::{Error, Result};
pub use model::{
    Block, BlockType, Metainfo, Page, ProcessedPage, ProcessedReport, Report, ReportFile,
    SerializedTable, Table,
};
pub use render::{FormatOptions, JsonFormat, MergeStats, TableSource, TextNormalizer};

use std::path::Path;

/// Read a report file of either kind.
///
/// # Example
///
/// ```no_run
/// use pagemerge::parse_report_file;
///
/// let report = parse_report_file("parsed/9f2c.json").unwrap();
/// println!("Report: {}", report.name());
/// ```
pub fn parse_report_file<P: AsRef<Path>>(path: P) -> Result<ReportFile> {
    read_report_file(path)
}

/// Process a raw report file with default options.
///
/// # Example
///
/// ```no_run
/// use pagemerge::process_file;
///
/// let report = process_file("parsed/9f2c.json").unwrap();
/// println!("Pages: {}", report.page_count());
/// ```
pub fn process_file<P: AsRef<Path>>(path: P) -> Result<ProcessedReport> {
    ReportProcessor::default().process_file(path)
}

/// Process a raw report file with custom options.
///
/// # Example
///
/// ```no_run
/// use pagemerge::{process_file_with_options, FormatOptions};
///
/// let options = FormatOptions::new()
///     .with_serialized_tables(true)
///     .with_serialized_instead_of_markdown(true);
/// let report = process_file_with_options("parsed/9f2c.json", options).unwrap();
/// ```
pub fn process_file_with_options<P: AsRef<Path>>(
    path: P,
    options: FormatOptions,
) -> Result<ProcessedReport> {
    ReportProcessor::new(options).process_file(path)
}

/// Convert a report file of either kind to Markdown.
///
/// # Example
///
/// ```no_run
/// use pagemerge::to_markdown;
///
/// let markdown = to_markdown("merged/9f2c.json").unwrap();
/// std::fs::write("9f2c.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let file = read_report_file(path)?;
    ReportProcessor::default().export_report(&file)
}

/// Convert a raw report file to processed-report JSON.
///
/// # Example
///
/// ```no_run
/// use pagemerge::{to_json, JsonFormat};
///
/// let json = to_json("parsed/9f2c.json", JsonFormat::Pretty).unwrap();
/// std::fs::write("merged/9f2c.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let report = process_file(path)?;
    render::to_json(&report, format)
}

/// Builder for merging report files.
///
/// # Example
///
/// ```no_run
/// use pagemerge::PageMerge;
///
/// let markdown = PageMerge::new()
///     .with_serialized_tables(true)
///     .process("parsed/9f2c.json")?
///     .to_markdown();
/// # Ok::<(), pagemerge::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct PageMerge {
    options: FormatOptions,
}

impl PageMerge {
    /// Create a new PageMerge builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the serialized table text to each Markdown table.
    pub fn with_serialized_tables(mut self, enabled: bool) -> Self {
        self.options = self.options.with_serialized_tables(enabled);
        self
    }

    /// Emit only the serialized table text (requires serialized tables).
    pub fn serialized_instead_of_markdown(mut self) -> Self {
        self.options = self.options.with_serialized_instead_of_markdown(true);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Options collected so far.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Build the processor.
    pub fn processor(self) -> ReportProcessor {
        ReportProcessor::new(self.options)
    }

    /// Process a raw report file and return a result wrapper.
    pub fn process<P: AsRef<Path>>(self, path: P) -> Result<MergeResult> {
        let (report, stats) = self.processor().process_file_with_stats(path)?;
        Ok(MergeResult { report, stats })
    }

    /// Process an in-memory raw report.
    pub fn process_report(self, report: &Report) -> Result<MergeResult> {
        let (report, stats) = self.processor().process_report_with_stats(report)?;
        Ok(MergeResult { report, stats })
    }
}

/// Result of merging one report.
#[derive(Debug)]
pub struct MergeResult {
    /// The processed report
    pub report: ProcessedReport,
    /// Counters collected while formatting
    pub stats: MergeStats,
}

impl MergeResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> String {
        render::to_markdown(&self.report)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.report, format)
    }

    /// Page texts joined by blank lines.
    pub fn plain_text(&self) -> String {
        self.report.plain_text()
    }

    /// Get the processed report.
    pub fn report(&self) -> &ProcessedReport {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        let mut report = Report::new(Metainfo::named("abc"));
        report.add_page(Page::with_blocks(
            1,
            vec![
                Block::new(BlockType::SectionHeader, "Overview"),
                Block::text("Growth /one.pl/zero.pl/percent.tnum"),
            ],
        ));
        report
    }

    #[test]
    fn test_page_merge_builder() {
        let builder = PageMerge::new().with_serialized_tables(true).sequential();
        assert!(builder.options().use_serialized_tables);
        assert!(!builder.options().parallel);
        assert_eq!(
            builder.options().table_source(),
            TableSource::MarkdownWithDescription
        );
    }

    #[test]
    fn test_page_merge_builder_default() {
        let builder = PageMerge::default();
        assert_eq!(builder.options().table_source(), TableSource::Markdown);
        assert!(builder.options().parallel);
    }

    #[test]
    fn test_page_merge_serialized_only() {
        let builder = PageMerge::new()
            .with_serialized_tables(true)
            .serialized_instead_of_markdown();
        assert_eq!(builder.options().table_source(), TableSource::Serialized);
    }

    #[test]
    fn test_process_report() {
        let result = PageMerge::new().process_report(&sample_report()).unwrap();
        assert_eq!(result.report().pages()[0].text, "# Overview\n\nGrowth 10%");
        assert_eq!(result.stats.correction_count, 3);
        assert!(result.to_markdown().contains("# Page 1"));
    }

    #[test]
    fn test_result_to_json() {
        let result = PageMerge::new().process_report(&sample_report()).unwrap();
        let json = result.to_json(JsonFormat::Compact).unwrap();
        assert!(json.contains("\"chunks\":null"));
        assert!(json.contains("\"sha1_name\":\"abc\""));
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_process_missing_file() {
        let result = process_file("/nonexistent/report.json");
        assert!(matches!(result, Err(Error::InputNotFound(_))));
    }

    #[test]
    fn test_parse_report_str_not_a_report() {
        let result = parse_report_str(r#"{"pages": []}"#);
        assert!(matches!(result, Err(Error::UnknownFormat(_))));
    }

    #[test]
    fn test_parse_report_str_invalid_json() {
        let result = parse_report_str("not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
