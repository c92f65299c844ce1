//! Error types for pagemerge library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pagemerge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while merging reports.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Report JSON could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON file is neither a raw nor a processed report.
    #[error("Unknown report format: {0}")]
    UnknownFormat(String),

    /// A block carries a type outside the known vocabulary.
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    /// A known block type that must be filtered out before formatting.
    #[error("Unexpected block type in page content: {0}")]
    UnexpectedBlockType(String),

    /// A table block references a table the report does not contain.
    #[error("Table with ID={0} not found in report data")]
    TableNotFound(String),

    /// An input file or directory does not exist.
    #[error("Input does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    /// A schema error raised while processing a named report.
    #[error("Report {name}: {source}")]
    Report {
        /// Stable document identifier (`sha1_name`)
        name: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Attach the report name to an error raised while processing it.
    pub fn in_report(self, name: impl Into<String>) -> Self {
        Error::Report {
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error comes from malformed report content rather than I/O.
    pub fn is_schema_violation(&self) -> bool {
        match self {
            Error::UnknownBlockType(_)
            | Error::UnexpectedBlockType(_)
            | Error::TableNotFound(_) => true,
            Error::Report { source, .. } => source.is_schema_violation(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownBlockType("image_map".to_string());
        assert_eq!(err.to_string(), "Unknown block type: image_map");

        let err = Error::TableNotFound("t7".to_string());
        assert_eq!(err.to_string(), "Table with ID=t7 not found in report data");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_schema_violation());
    }

    #[test]
    fn test_report_context() {
        let err = Error::TableNotFound("3".to_string()).in_report("abc123");
        assert_eq!(
            err.to_string(),
            "Report abc123: Table with ID=3 not found in report data"
        );
        assert!(err.is_schema_violation());
    }
}
