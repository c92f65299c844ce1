//! Formatting options and configuration.

/// Options for formatting report pages.
///
/// Built once and passed by reference to every formatter, so the table
/// settings cannot drift between pages of the same run.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Use the serialized table form when the extractor provides one
    pub use_serialized_tables: bool,

    /// With serialized tables enabled, emit only the serialized text
    /// instead of Markdown followed by a description appendix
    pub serialized_tables_instead_of_markdown: bool,

    /// Process independent reports of a batch in parallel
    pub parallel: bool,
}

impl FormatOptions {
    /// Create new format options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable serialized tables.
    pub fn with_serialized_tables(mut self, enabled: bool) -> Self {
        self.use_serialized_tables = enabled;
        self
    }

    /// Replace Markdown tables with their serialized text.
    pub fn with_serialized_instead_of_markdown(mut self, instead: bool) -> Self {
        self.serialized_tables_instead_of_markdown = instead;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// How tables are rendered under these options.
    pub fn table_source(&self) -> TableSource {
        match (
            self.use_serialized_tables,
            self.serialized_tables_instead_of_markdown,
        ) {
            (false, _) => TableSource::Markdown,
            (true, false) => TableSource::MarkdownWithDescription,
            (true, true) => TableSource::Serialized,
        }
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            use_serialized_tables: false,
            serialized_tables_instead_of_markdown: false,
            parallel: true,
        }
    }
}

/// Table representation inserted into table groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableSource {
    /// Pre-rendered Markdown grid
    #[default]
    Markdown,
    /// Markdown followed by the serialized text as an entity description
    MarkdownWithDescription,
    /// Serialized text only
    Serialized,
}
