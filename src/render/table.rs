//! Table lookup for table groups.

use crate::error::{Error, Result};
use crate::model::Table;

use super::{FormatOptions, TableSource};

/// Separator between a Markdown table and its serialized description.
pub const DESCRIPTION_HEADING: &str = "Description of the table entities:";

/// Resolves `table_id` references against one report's tables.
#[derive(Debug, Clone)]
pub struct TableResolver<'a> {
    tables: &'a [Table],
    source: TableSource,
}

impl<'a> TableResolver<'a> {
    /// Create a resolver over a report's table collection.
    pub fn new(tables: &'a [Table], options: &FormatOptions) -> Self {
        Self {
            tables,
            source: options.table_source(),
        }
    }

    /// Render the table with the given id.
    ///
    /// Unknown ids are an error. When serialized text is requested but the
    /// table has none, the Markdown grid is used instead.
    pub fn resolve(&self, table_id: &str) -> Result<String> {
        let table = self
            .tables
            .iter()
            .find(|t| t.table_id == table_id)
            .ok_or_else(|| Error::TableNotFound(table_id.to_string()))?;

        Ok(self.render(table))
    }

    fn render(&self, table: &Table) -> String {
        if self.source == TableSource::Markdown {
            return table.markdown.clone();
        }

        let Some(serialized) = table.serialized_text() else {
            log::debug!(
                "Table {} has no serialized form, using Markdown",
                table.table_id
            );
            return table.markdown.clone();
        };

        match self.source {
            TableSource::Serialized => serialized,
            _ => format!("{}\n{}\n{}", table.markdown, DESCRIPTION_HEADING, serialized),
        }
    }
}
