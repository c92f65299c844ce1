//! Batch processing of report directories.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::ReportProcessor;
use crate::detect::{is_report_path, SUMMARY_FILE_NAME};
use crate::error::{Error, Result};
use crate::model::ProcessedReport;
use crate::render::{to_json, JsonFormat, MergeStats};

/// Result of processing one report file.
#[derive(Debug)]
pub struct DocumentOutcome {
    /// Input file
    pub source: PathBuf,

    /// Processed report, or the error that stopped it
    pub result: Result<ProcessedReport>,

    /// Statistics (empty on failure)
    pub stats: MergeStats,
}

impl DocumentOutcome {
    /// Check if the report was processed.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Processed report, if any.
    pub fn report(&self) -> Option<&ProcessedReport> {
        self.result.as_ref().ok()
    }

    /// Failure, if any.
    pub fn error(&self) -> Option<&Error> {
        self.result.as_ref().err()
    }
}

/// Outcomes of a batch run, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One outcome per input file
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    /// Number of input files.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if the batch had no input files.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Successfully processed reports.
    pub fn succeeded(&self) -> impl Iterator<Item = &ProcessedReport> {
        self.outcomes.iter().filter_map(DocumentOutcome::report)
    }

    /// Outcomes that failed.
    pub fn failed(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Check if every report was processed.
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(DocumentOutcome::is_success)
    }

    /// Statistics summed over all successful reports.
    pub fn stats(&self) -> MergeStats {
        let mut total = MergeStats::new();
        for outcome in &self.outcomes {
            total.merge(&outcome.stats);
        }
        total
    }

    /// Summary of the run, as written to `processing_summary.json`.
    pub fn summary(&self) -> ProcessingSummary {
        let reports: Vec<SummaryEntry> = self
            .succeeded()
            .map(|r| SummaryEntry {
                name: r.name().to_string(),
                pages: r.page_count(),
            })
            .collect();
        let failed = self
            .failed()
            .filter_map(|o| {
                o.error().map(|e| FailedReport {
                    file: o.source.display().to_string(),
                    error: e.to_string(),
                })
            })
            .collect();

        ProcessingSummary {
            total_reports: reports.len(),
            reports,
            failed,
        }
    }

    /// Write `processing_summary.json` into `dir`.
    pub fn write_summary(&self, dir: &Path) -> Result<PathBuf> {
        let path = self.summary().write_to(dir)?;
        log::debug!("Wrote batch summary to {}", path.display());
        Ok(path)
    }

    /// Consume the batch, keeping only processed reports.
    pub fn into_reports(self) -> Vec<ProcessedReport> {
        self.outcomes
            .into_iter()
            .filter_map(|o| o.result.ok())
            .collect()
    }
}

/// Batch summary file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSummary {
    /// Number of reports processed successfully
    pub total_reports: usize,

    /// Processed reports
    pub reports: Vec<SummaryEntry>,

    /// Reports that failed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<FailedReport>,
}

impl ProcessingSummary {
    /// Write the summary as `processing_summary.json` into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(SUMMARY_FILE_NAME);
        write_json(&path, self)?;
        Ok(path)
    }
}

/// A processed report in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    /// Stable document identifier
    pub name: String,
    /// Number of pages
    pub pages: usize,
}

/// A failed report in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedReport {
    /// Input file
    pub file: String,
    /// Error message
    pub error: String,
}

impl ReportProcessor {
    /// Process report files, optionally writing each result into `output_dir`.
    ///
    /// Every file is processed on its own; failures are recorded in the
    /// returned batch. Only a failure to create `output_dir` is an error.
    pub fn process_paths(
        &self,
        paths: &[PathBuf],
        output_dir: Option<&Path>,
    ) -> Result<BatchReport> {
        if let Some(dir) = output_dir {
            fs::create_dir_all(dir)?;
        }

        let process = |path: &PathBuf| self.process_path(path, output_dir);
        let outcomes = if self.options.parallel {
            paths.par_iter().map(process).collect()
        } else {
            paths.iter().map(process).collect()
        };

        Ok(BatchReport { outcomes })
    }

    /// Process every report file in `input_dir`.
    pub fn process_dir(&self, input_dir: &Path, output_dir: Option<&Path>) -> Result<BatchReport> {
        let paths = list_report_files(input_dir)?;
        log::debug!(
            "Processing {} report files from {}",
            paths.len(),
            input_dir.display()
        );
        self.process_paths(&paths, output_dir)
    }

    fn process_path(&self, path: &Path, output_dir: Option<&Path>) -> DocumentOutcome {
        let result = self.process_file_with_stats(path).and_then(|(report, stats)| {
            if let Some(dir) = output_dir {
                let name = path
                    .file_name()
                    .ok_or_else(|| Error::Other(format!("invalid file name: {}", path.display())))?;
                write_json(&dir.join(name), &report)?;
            }
            Ok((report, stats))
        });

        match result {
            Ok((report, stats)) => {
                log::debug!("Processed {} ({} pages)", report.name(), report.page_count());
                DocumentOutcome {
                    source: path.to_path_buf(),
                    result: Ok(report),
                    stats,
                }
            }
            Err(e) => {
                log::warn!("Failed to process {}: {}", path.display(), e);
                DocumentOutcome {
                    source: path.to_path_buf(),
                    result: Err(e),
                    stats: MergeStats::new(),
                }
            }
        }
    }
}

/// Report files in `dir`, sorted by name.
pub(crate) fn list_report_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::InputNotFound(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_report_path(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = to_json(value, JsonFormat::Pretty)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Metainfo, ProcessedPage};

    fn outcome(name: &str, ok: bool) -> DocumentOutcome {
        let source = PathBuf::from(format!("in/{}.json", name));
        if ok {
            DocumentOutcome {
                source,
                result: Ok(ProcessedReport::new(
                    Metainfo::named(name),
                    vec![ProcessedPage::new(1, "a"), ProcessedPage::new(2, "b")],
                )),
                stats: MergeStats {
                    page_count: 2,
                    ..Default::default()
                },
            }
        } else {
            DocumentOutcome {
                source,
                result: Err(Error::UnknownBlockType("image_map".to_string())),
                stats: MergeStats::new(),
            }
        }
    }

    #[test]
    fn test_batch_summary() {
        let batch = BatchReport {
            outcomes: vec![outcome("a", true), outcome("b", false), outcome("c", true)],
        };
        assert_eq!(batch.len(), 3);
        assert!(!batch.all_succeeded());
        assert_eq!(batch.stats().page_count, 4);

        let summary = batch.summary();
        assert_eq!(summary.total_reports, 2);
        assert_eq!(summary.reports[1].name, "c");
        assert_eq!(summary.reports[1].pages, 2);
        assert_eq!(summary.failed.len(), 1);
        assert!(summary.failed[0].error.contains("image_map"));
    }

    #[test]
    fn test_summary_json_shape() {
        let batch = BatchReport {
            outcomes: vec![outcome("a", true)],
        };
        let value = serde_json::to_value(batch.summary()).unwrap();
        assert_eq!(value["total_reports"], 1);
        assert_eq!(value["reports"][0]["name"], "a");
        assert!(value.get("failed").is_none());
    }

    #[test]
    fn test_list_report_files_missing_dir() {
        let err = list_report_files(Path::new("/nonexistent/reports")).unwrap_err();
        assert!(matches!(err, Error::InputNotFound(_)));
    }
}
