//! JSON rendering for processed reports and batch summaries.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a report (or any output artifact) to JSON.
pub fn to_json<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(Error::Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Metainfo, ProcessedPage, ProcessedReport};

    #[test]
    fn test_to_json_pretty() {
        let report = ProcessedReport::new(
            Metainfo::named("abc").with_field("company_name", "Acme"),
            vec![ProcessedPage::new(1, "Überblick")],
        );

        let json = to_json(&report, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"company_name\": \"Acme\""));
        assert!(json.contains("Überblick")); // Not ASCII-escaped
        assert!(json.contains("\"chunks\": null"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let report = ProcessedReport::new(Metainfo::named("abc"), Vec::new());
        let json = to_json(&report, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }
}
