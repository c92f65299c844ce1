//! Report processing: formatting, cleanup, batches and export.
//!
//! [`ReportProcessor`] owns the formatting options and the text normalizer
//! and turns raw reports into processed ones page by page. Batch and export
//! helpers process every report independently, so one malformed report is
//! reported as a failed outcome instead of stopping the run.
//!
//! # Example
//!
//! ```no_run
//! use pagemerge::convert::ReportProcessor;
//! use pagemerge::FormatOptions;
//! use std::path::Path;
//!
//! fn main() -> pagemerge::Result<()> {
//!     let processor = ReportProcessor::new(FormatOptions::new().with_serialized_tables(true));
//!     let batch = processor.process_dir(Path::new("parsed"), Some(Path::new("merged")))?;
//!     println!("{} of {} reports merged", batch.succeeded().count(), batch.len());
//!     Ok(())
//! }
//! ```

mod batch;
mod export;

pub use batch::{BatchReport, DocumentOutcome, FailedReport, ProcessingSummary, SummaryEntry};
pub use export::{ExportOutcome, ExportReport};

use crate::detect::read_report_file;
use crate::error::{Error, Result};
use crate::model::{ProcessedPage, ProcessedReport, Report, ReportFile};
use crate::render::{Correction, FormatOptions, MergeStats, PageFormatter, TextNormalizer};
use std::path::Path;

/// How many corrections are logged per report.
const LOGGED_CORRECTIONS: usize = 30;

/// Formats and cleans reports.
#[derive(Debug, Default)]
pub struct ReportProcessor {
    options: FormatOptions,
    normalizer: TextNormalizer,
}

impl ReportProcessor {
    /// Create a processor with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self {
            options,
            normalizer: TextNormalizer::new(),
        }
    }

    /// Options in use.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Format and clean every page of a report.
    pub fn process_report(&self, report: &Report) -> Result<ProcessedReport> {
        self.process_report_with_stats(report)
            .map(|(processed, _)| processed)
    }

    /// Format and clean every page of a report, collecting statistics.
    ///
    /// Pages are processed in input order. Schema errors (unknown block
    /// types, missing tables) fail the whole report and name it.
    pub fn process_report_with_stats(
        &self,
        report: &Report,
    ) -> Result<(ProcessedReport, MergeStats)> {
        let formatter = PageFormatter::new(&self.options, &report.tables);
        let mut stats = MergeStats::new();
        let mut corrections: Vec<Correction> = Vec::new();
        let mut pages = Vec::with_capacity(report.page_count());

        for page in &report.content {
            let blocks = page.renderable_blocks();
            let text = formatter
                .format_page_with_stats(&blocks, &mut stats)
                .map_err(|e| e.in_report(report.name()))?;

            let normalized = self.normalizer.normalize(&text);
            stats.add_corrections(normalized.count);
            corrections.extend(normalized.corrections);
            pages.push(ProcessedPage::new(page.page, normalized.text));
        }

        if stats.correction_count > 0 {
            log::info!(
                "Fixed {} occurrences in the file {}",
                stats.correction_count,
                report.name()
            );
            log::debug!(
                "{:?}",
                &corrections[..corrections.len().min(LOGGED_CORRECTIONS)]
            );
        }

        Ok((
            ProcessedReport::new(report.metainfo.clone(), pages),
            stats,
        ))
    }

    /// Read and process a raw report file.
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> Result<ProcessedReport> {
        self.process_file_with_stats(path)
            .map(|(processed, _)| processed)
    }

    /// Read and process a raw report file, collecting statistics.
    pub fn process_file_with_stats<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(ProcessedReport, MergeStats)> {
        let path = path.as_ref();
        match read_report_file(path)? {
            ReportFile::Raw(report) => self.process_report_with_stats(&report),
            ReportFile::Processed(report) => Err(Error::Other(format!(
                "{} is already processed (report {})",
                path.display(),
                report.name()
            ))),
        }
    }

    /// Processed form of a report file of either kind.
    pub fn processed(&self, file: &ReportFile) -> Result<ProcessedReport> {
        match file {
            ReportFile::Raw(report) => self.process_report(report),
            ReportFile::Processed(report) => Ok(report.clone()),
        }
    }
}
