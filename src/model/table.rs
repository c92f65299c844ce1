//! Table types.

use super::page::{string_or_null, table_id};
use serde::{Deserialize, Serialize};

/// A table extracted alongside the block stream.
///
/// Tables are already rendered by the extractor; blocks of type `table`
/// refer to them through [`Table::table_id`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Identifier referenced by table blocks
    #[serde(deserialize_with = "table_id")]
    pub table_id: String,

    /// Pre-rendered Markdown grid
    #[serde(default, deserialize_with = "string_or_null")]
    pub markdown: String,

    /// Natural-language description of the table, if the extractor made one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialized: Option<SerializedTable>,
}

impl Table {
    /// Create a table with Markdown only.
    pub fn new(table_id: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            markdown: markdown.into(),
            serialized: None,
        }
    }

    /// Attach serialized information blocks and return self.
    pub fn with_serialized<S: Into<String>>(
        mut self,
        blocks: impl IntoIterator<Item = S>,
    ) -> Self {
        self.serialized = Some(SerializedTable::from_strings(blocks));
        self
    }

    /// Serialized text, or `None` when the extractor provided none.
    ///
    /// An empty `information_blocks` list yields `Some("")`.
    pub fn serialized_text(&self) -> Option<String> {
        self.serialized.as_ref().and_then(SerializedTable::text)
    }
}

/// Serialized form of a table: an ordered list of description strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SerializedTable {
    /// Information blocks in table order (`None` when the field is missing)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information_blocks: Option<Vec<InformationBlock>>,
}

impl SerializedTable {
    /// Build from plain strings.
    pub fn from_strings<S: Into<String>>(blocks: impl IntoIterator<Item = S>) -> Self {
        Self {
            information_blocks: Some(
                blocks
                    .into_iter()
                    .map(|b| InformationBlock {
                        information_block: b.into(),
                    })
                    .collect(),
            ),
        }
    }

    /// Information blocks joined by newlines, if the list is present.
    pub fn text(&self) -> Option<String> {
        self.information_blocks.as_ref().map(|blocks| {
            blocks
                .iter()
                .map(|b| b.information_block.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        })
    }
}

/// One description string of a serialized table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InformationBlock {
    /// Description text
    pub information_block: String,
}
