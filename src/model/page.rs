//! Page-level types.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single page of a layout-extracted report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page number as reported by the extractor (not necessarily sorted)
    pub page: u32,

    /// Content blocks on the page, in reading order
    #[serde(default)]
    pub content: Vec<Block>,
}

impl Page {
    /// Create a new empty page.
    pub fn new(page: u32) -> Self {
        Self {
            page,
            content: Vec::new(),
        }
    }

    /// Create a page from a list of blocks.
    pub fn with_blocks(page: u32, content: Vec<Block>) -> Self {
        Self { page, content }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.content.push(block);
    }

    /// Blocks that take part in formatting (footers and pictures removed).
    pub fn renderable_blocks(&self) -> Vec<&Block> {
        self.content
            .iter()
            .filter(|block| !block.block_type.is_ignored())
            .collect()
    }

    /// Check if the page is empty (no content blocks).
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Get the number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.content.len()
    }
}

/// A content block on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block type as assigned by the layout extractor
    #[serde(rename = "type")]
    pub block_type: BlockType,

    /// Raw block text (may be empty)
    #[serde(default, deserialize_with = "string_or_null")]
    pub text: String,

    /// Reference into the report's table collection (table blocks only)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_id"
    )]
    pub table_id: Option<String>,
}

impl Block {
    /// Create a block of the given type with text.
    pub fn new(block_type: impl Into<BlockType>, text: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            text: text.into(),
            table_id: None,
        }
    }

    /// Create a `text` block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(BlockType::Text, text)
    }

    /// Create a `table` block referencing a table by id.
    pub fn table(table_id: impl Into<String>) -> Self {
        Self {
            block_type: BlockType::Table,
            text: String::new(),
            table_id: Some(table_id.into()),
        }
    }

    /// Block text with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// Whether this block can introduce a following table or list.
    ///
    /// Only textual blocks count; their right-trimmed text must end in `:`.
    pub fn ends_with_colon(&self) -> bool {
        self.block_type.is_textual() && self.text.trim_end().ends_with(':')
    }

    /// Check if the block is of the given type.
    pub fn is(&self, block_type: &BlockType) -> bool {
        &self.block_type == block_type
    }
}

/// Block types produced by the layout extractor.
///
/// Unrecognised wire values are kept in [`BlockType::Unknown`] so the
/// formatter can reject them by name instead of failing at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    PageHeader,
    SectionHeader,
    Paragraph,
    Text,
    Caption,
    Footnote,
    Table,
    ListItem,
    CheckboxSelected,
    CheckboxUnselected,
    Formula,
    /// Removed before formatting
    PageFooter,
    /// Removed before formatting
    Picture,
    /// Any other value (rejected by the formatter)
    Unknown(String),
}

impl BlockType {
    /// Wire name of the block type.
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::PageHeader => "page_header",
            BlockType::SectionHeader => "section_header",
            BlockType::Paragraph => "paragraph",
            BlockType::Text => "text",
            BlockType::Caption => "caption",
            BlockType::Footnote => "footnote",
            BlockType::Table => "table",
            BlockType::ListItem => "list_item",
            BlockType::CheckboxSelected => "checkbox_selected",
            BlockType::CheckboxUnselected => "checkbox_unselected",
            BlockType::Formula => "formula",
            BlockType::PageFooter => "page_footer",
            BlockType::Picture => "picture",
            BlockType::Unknown(name) => name,
        }
    }

    /// Types dropped from a page before formatting.
    pub fn is_ignored(&self) -> bool {
        matches!(self, BlockType::PageFooter | BlockType::Picture)
    }

    /// Types whose text may act as a colon header for a group.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            BlockType::Text | BlockType::Caption | BlockType::SectionHeader | BlockType::Paragraph
        )
    }

    /// Types rendered on their own as a plain line.
    pub fn is_plain(&self) -> bool {
        matches!(
            self,
            BlockType::Text
                | BlockType::Caption
                | BlockType::Footnote
                | BlockType::CheckboxSelected
                | BlockType::CheckboxUnselected
                | BlockType::Formula
        )
    }
}

impl From<&str> for BlockType {
    fn from(name: &str) -> Self {
        match name {
            "page_header" => BlockType::PageHeader,
            "section_header" => BlockType::SectionHeader,
            "paragraph" => BlockType::Paragraph,
            "text" => BlockType::Text,
            "caption" => BlockType::Caption,
            "footnote" => BlockType::Footnote,
            "table" => BlockType::Table,
            "list_item" => BlockType::ListItem,
            "checkbox_selected" => BlockType::CheckboxSelected,
            "checkbox_unselected" => BlockType::CheckboxUnselected,
            "formula" => BlockType::Formula,
            "page_footer" => BlockType::PageFooter,
            "picture" => BlockType::Picture,
            other => BlockType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for BlockType {
    fn from(name: String) -> Self {
        BlockType::from(name.as_str())
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        block_type.as_str().to_string()
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier as written by the extractor: a string or an integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Str(String),
    Int(i64),
    UInt(u64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Str(s) => s,
            WireId::Int(n) => n.to_string(),
            WireId::UInt(n) => n.to_string(),
        }
    }
}

pub(crate) fn table_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    WireId::deserialize(deserializer).map(String::from)
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<WireId>::deserialize(deserializer)?.map(String::from))
}

pub(crate) fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
