//! Markdown export of processed reports.

use crate::error::{Error, Result};
use crate::model::{Metainfo, ProcessedPage, ProcessedReport};

/// Render a processed report as one Markdown document.
///
/// Each page becomes a section: a horizontal rule, a `# Page N` heading
/// and the page text.
pub fn to_markdown(report: &ProcessedReport) -> String {
    let mut output = String::new();
    for page in report.pages() {
        render_page(&mut output, page);
    }
    output
}

fn render_page(output: &mut String, page: &ProcessedPage) {
    output.push_str(&format!("\n\n---\n\n# Page {}\n\n", page.page));
    output.push_str(&page.text);
}

/// File name of the exported Markdown document.
///
/// The report name must be a single path component.
pub fn export_file_name(metainfo: &Metainfo) -> Result<String> {
    let name = metainfo.sha1_name.as_str();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(Error::Other(format!(
            "report name {:?} is not a valid file name",
            name
        )));
    }
    Ok(format!("{}.md", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_markdown_sections() {
        let report = ProcessedReport::new(
            Metainfo::named("abc"),
            vec![
                ProcessedPage::new(1, "# Title\n\nBody"),
                ProcessedPage::new(2, "More"),
            ],
        );
        assert_eq!(
            to_markdown(&report),
            "\n\n---\n\n# Page 1\n\n# Title\n\nBody\n\n---\n\n# Page 2\n\nMore"
        );
    }

    #[test]
    fn test_to_markdown_empty() {
        let report = ProcessedReport::new(Metainfo::named("abc"), Vec::new());
        assert_eq!(to_markdown(&report), "");
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(&Metainfo::named("9f2c")).unwrap(), "9f2c.md");
        assert_eq!(export_file_name(&Metainfo::named("..x")).unwrap(), "..x.md");
    }

    #[test]
    fn test_export_file_name_rejects_paths() {
        for name in ["", ".", "..", "../escape", "a/b", "a\\b", "/abs"] {
            let err = export_file_name(&Metainfo::named(name)).unwrap_err();
            assert!(matches!(err, Error::Other(_)), "accepted {:?}", name);
        }
    }
}
