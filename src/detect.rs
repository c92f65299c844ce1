//! Report file detection: raw extractor output or processed report.

use crate::error::{Error, Result};
use crate::model::ReportFile;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Name of the batch summary written next to processed reports.
pub const SUMMARY_FILE_NAME: &str = "processing_summary.json";

/// Kind of report stored in a JSON file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Extractor output: `content` is a list of pages with blocks
    Raw,
    /// Formatted output: `content` is an object with `pages`
    Processed,
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Raw => write!(f, "raw report"),
            ReportKind::Processed => write!(f, "processed report"),
        }
    }
}

/// Detect the report kind from parsed JSON.
///
/// # Returns
/// * `Some(kind)` if the value has a recognisable `content` section
/// * `None` otherwise
pub fn detect_kind(value: &Value) -> Option<ReportKind> {
    match value.get("content")? {
        Value::Array(_) => Some(ReportKind::Raw),
        Value::Object(content) if content.contains_key("pages") => Some(ReportKind::Processed),
        _ => None,
    }
}

/// Parse a report of either kind from a JSON string.
pub fn parse_report_str(json: &str) -> Result<ReportFile> {
    let value: Value = serde_json::from_str(json)?;
    match detect_kind(&value) {
        Some(ReportKind::Raw) => Ok(ReportFile::Raw(serde_json::from_value(value)?)),
        Some(ReportKind::Processed) => Ok(ReportFile::Processed(serde_json::from_value(value)?)),
        None => Err(Error::UnknownFormat(
            "missing `content` pages".to_string(),
        )),
    }
}

/// Read a report of either kind from a file.
///
/// # Example
/// ```no_run
/// use pagemerge::detect::read_report_file;
///
/// let report = read_report_file("reports/9f2c.json").unwrap();
/// println!("Report: {}", report.name());
/// ```
pub fn read_report_file<P: AsRef<Path>>(path: P) -> Result<ReportFile> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }
    let json = fs::read_to_string(path)?;
    parse_report_str(&json).map_err(|e| match e {
        Error::UnknownFormat(reason) => {
            Error::UnknownFormat(format!("{}: {}", path.display(), reason))
        }
        other => other,
    })
}

/// Check if a path is the batch summary file.
pub fn is_summary_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .is_some_and(|name| name == SUMMARY_FILE_NAME)
}

/// Check if a path looks like a report file (`*.json`, not the summary).
pub fn is_report_path<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    path.extension().is_some_and(|ext| ext == "json") && !is_summary_file(path)
}
