//! Markdown export of report files.

use std::fs;
use std::path::{Path, PathBuf};

use super::batch::list_report_files;
use super::ReportProcessor;
use crate::detect::read_report_file;
use crate::error::Result;
use crate::model::ReportFile;
use crate::render::{export_file_name, to_markdown};

/// Result of exporting one report file.
#[derive(Debug)]
pub struct ExportOutcome {
    /// Input file
    pub source: PathBuf,
    /// Written Markdown file, or the error that stopped it
    pub result: Result<PathBuf>,
}

/// Outcomes of a directory export, in input order.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// One outcome per input file
    pub outcomes: Vec<ExportOutcome>,
}

impl ExportReport {
    /// Number of input files.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if the export had no input files.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Written Markdown files.
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(PathBuf::as_path))
    }

    /// Outcomes that failed.
    pub fn failed(&self) -> impl Iterator<Item = &ExportOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// Check if every file was exported.
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

impl ReportProcessor {
    /// Render a report file of either kind as Markdown.
    ///
    /// Raw reports are processed first with this processor's options.
    pub fn export_report(&self, file: &ReportFile) -> Result<String> {
        let processed = self.processed(file)?;
        Ok(to_markdown(&processed))
    }

    /// Export one report file into `output_dir` as `<sha1_name>.md`.
    pub fn export_file<P: AsRef<Path>>(&self, path: P, output_dir: &Path) -> Result<PathBuf> {
        let file = read_report_file(path)?;
        let markdown = self.export_report(&file)?;

        let file_name = export_file_name(file.metainfo())?;
        fs::create_dir_all(output_dir)?;
        let target = output_dir.join(file_name);
        fs::write(&target, markdown)?;
        log::debug!("Exported {} to {}", file.name(), target.display());
        Ok(target)
    }

    /// Export every report file in `input_dir` into `output_dir`.
    ///
    /// The batch summary file is skipped. A file that fails is recorded in
    /// the returned report and the remaining files are still exported.
    pub fn export_dir(&self, input_dir: &Path, output_dir: &Path) -> Result<ExportReport> {
        let paths = list_report_files(input_dir)?;
        fs::create_dir_all(output_dir)?;

        let mut outcomes = Vec::with_capacity(paths.len());
        for path in paths {
            let result = self.export_file(&path, output_dir);
            if let Err(e) = &result {
                log::warn!("Failed to export {}: {}", path.display(), e);
            }
            outcomes.push(ExportOutcome {
                source: path,
                result,
            });
        }

        let report = ExportReport { outcomes };
        if report.is_empty() {
            log::warn!("No report files found in {}", input_dir.display());
        }
        Ok(report)
    }
}
