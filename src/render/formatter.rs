//! Page formatting: grouping blocks and rendering them as Markdown.
//!
//! A page is scanned once, front to back, with a single cursor. At each
//! position the first matching rule decides how many blocks are consumed:
//!
//! 1. `page_header` / `section_header` become `#` or `##` headings
//! 2. `paragraph` becomes a `###` heading, unless it ends in `:` and
//!    introduces a table or list
//! 3. a table (optionally preceded by a colon header) starts a table group
//! 4. a list item (optionally preceded by a colon header) starts a list group
//! 5. remaining textual blocks render as plain lines
//!
//! Groups look ahead at most two blocks to pick up a trailing `text` +
//! `footnote` pair, then any run of footnotes.

use std::borrow::Borrow;

use crate::error::{Error, Result};
use crate::model::{Block, BlockType, Table};

use super::{FormatOptions, MergeStats, TableResolver};

/// Blocks at an index below this count as the top of the page.
const TOP_OF_PAGE: usize = 3;

/// A run of blocks rendered as one unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Group<'b> {
    /// Heading at the given level (1-3)
    Heading { level: usize, block: &'b Block },
    /// Optional colon header, one table, trailing notes
    Table(Vec<&'b Block>),
    /// Optional colon header, list body, trailing notes
    List(Vec<&'b Block>),
    /// A single plain line
    Plain(&'b Block),
    /// A whitespace-only block that produces no output
    Dropped(&'b Block),
}

impl<'b> Group<'b> {
    /// Blocks consumed by this group, in page order.
    pub fn blocks(&self) -> Vec<&'b Block> {
        match self {
            Group::Heading { block, .. } | Group::Plain(block) | Group::Dropped(block) => {
                vec![*block]
            }
            Group::Table(members) | Group::List(members) => members.clone(),
        }
    }

    /// Number of blocks consumed by this group.
    pub fn len(&self) -> usize {
        match self {
            Group::Table(members) | Group::List(members) => members.len(),
            _ => 1,
        }
    }

    /// Check if the group consumed no blocks.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split a page's blocks into groups.
///
/// Every block ends up in exactly one group. Unknown block types and
/// types that should have been filtered out are rejected.
pub fn group_blocks<B: Borrow<Block>>(blocks: &[B]) -> Result<Vec<Group<'_>>> {
    let mut scan = PageScan::new(blocks);
    let mut groups = Vec::new();

    while let Some(block) = scan.peek(0) {
        let group = match &block.block_type {
            BlockType::PageHeader => {
                let level = if scan.near_top() { 1 } else { 2 };
                scan.advance();
                Group::Heading { level, block }
            }
            BlockType::SectionHeader => {
                scan.section_headers_seen += 1;
                let level = if scan.section_headers_seen == 1
                    && scan.near_top()
                    && !scan.page_header_near_top
                {
                    1
                } else {
                    2
                };
                scan.advance();
                Group::Heading { level, block }
            }
            BlockType::Paragraph if !scan.introduces_group() => {
                scan.advance();
                Group::Heading { level: 3, block }
            }
            _ if scan.starts(&BlockType::Table) => Group::Table(scan.take_table_group()),
            _ if scan.starts(&BlockType::ListItem) => Group::List(scan.take_list_group()),
            block_type if block_type.is_plain() => {
                scan.advance();
                if block.trimmed_text().is_empty() {
                    Group::Dropped(block)
                } else {
                    Group::Plain(block)
                }
            }
            BlockType::Unknown(name) => return Err(Error::UnknownBlockType(name.clone())),
            other => return Err(Error::UnexpectedBlockType(other.to_string())),
        };
        groups.push(group);
    }

    Ok(groups)
}

/// Cursor over one page's blocks plus the per-page header state.
struct PageScan<'b, B> {
    blocks: &'b [B],
    cursor: usize,
    section_headers_seen: usize,
    page_header_near_top: bool,
}

impl<'b, B: Borrow<Block>> PageScan<'b, B> {
    fn new(blocks: &'b [B]) -> Self {
        let page_header_near_top = blocks
            .iter()
            .take(TOP_OF_PAGE)
            .any(|b| {
                let block: &Block = b.borrow();
                block.is(&BlockType::PageHeader)
            });
        Self {
            blocks,
            cursor: 0,
            section_headers_seen: 0,
            page_header_near_top,
        }
    }

    /// Block at `offset` positions after the cursor, if any.
    fn peek(&self, offset: usize) -> Option<&'b Block> {
        self.blocks.get(self.cursor + offset).map(Borrow::borrow)
    }

    fn advance(&mut self) {
        self.cursor += 1;
    }

    fn near_top(&self) -> bool {
        self.cursor < TOP_OF_PAGE
    }

    /// Current block is a colon header directly followed by a table or list.
    fn introduces_group(&self) -> bool {
        self.colon_header_for(&BlockType::Table) || self.colon_header_for(&BlockType::ListItem)
    }

    fn colon_header_for(&self, body: &BlockType) -> bool {
        self.peek(0).is_some_and(Block::ends_with_colon)
            && self.peek(1).is_some_and(|next| next.is(body))
    }

    /// A group with the given body type starts at the cursor.
    fn starts(&self, body: &BlockType) -> bool {
        self.peek(0).is_some_and(|b| b.is(body)) || self.colon_header_for(body)
    }

    fn take_table_group(&mut self) -> Vec<&'b Block> {
        let mut members = self.take_colon_header();
        if let Some(table) = self.peek(0) {
            members.push(table);
            self.advance();
        }
        self.take_trailing_notes(&mut members);
        members
    }

    fn take_list_group(&mut self) -> Vec<&'b Block> {
        let mut members = self.take_colon_header();
        while let Some(item) = self.peek(0).filter(|b| b.is(&BlockType::ListItem)) {
            members.push(item);
            self.advance();
        }
        self.take_trailing_notes(&mut members);
        members
    }

    fn take_colon_header(&mut self) -> Vec<&'b Block> {
        match self.peek(0) {
            Some(header) if header.ends_with_colon() && self.peek(1).is_some() => {
                self.advance();
                vec![header]
            }
            _ => Vec::new(),
        }
    }

    /// One `text` block only if a footnote follows it, then all footnotes.
    fn take_trailing_notes(&mut self, members: &mut Vec<&'b Block>) {
        if let (Some(text), Some(note)) = (self.peek(0), self.peek(1)) {
            if text.is(&BlockType::Text) && note.is(&BlockType::Footnote) {
                members.push(text);
                self.advance();
            }
        }
        while let Some(note) = self.peek(0).filter(|b| b.is(&BlockType::Footnote)) {
            members.push(note);
            self.advance();
        }
    }
}

/// Renders a page's blocks into Markdown segments.
#[derive(Debug, Clone)]
pub struct PageFormatter<'a> {
    resolver: TableResolver<'a>,
}

impl<'a> PageFormatter<'a> {
    /// Create a formatter for one report's tables.
    pub fn new(options: &FormatOptions, tables: &'a [Table]) -> Self {
        Self {
            resolver: TableResolver::new(tables, options),
        }
    }

    /// Render blocks into ordered segments.
    ///
    /// The first segment carries no leading whitespace and the last no
    /// trailing whitespace.
    pub fn format_segments<B: Borrow<Block>>(&self, blocks: &[B]) -> Result<Vec<String>> {
        let groups = group_blocks(blocks)?;
        self.render_groups(&groups)
    }

    /// Render blocks into the page text.
    pub fn format_page<B: Borrow<Block>>(&self, blocks: &[B]) -> Result<String> {
        Ok(self.format_segments(blocks)?.join("\n"))
    }

    /// Render blocks into the page text, updating `stats`.
    pub fn format_page_with_stats<B: Borrow<Block>>(
        &self,
        blocks: &[B],
        stats: &mut MergeStats,
    ) -> Result<String> {
        let groups = group_blocks(blocks)?;
        let segments = self.render_groups(&groups)?;

        stats.add_page();
        for group in &groups {
            match group {
                Group::Heading { .. } => stats.add_heading(),
                Group::Table(_) => stats.add_table_group(),
                Group::List(_) => stats.add_list_group(),
                Group::Plain(_) => stats.add_plain_block(),
                Group::Dropped(_) => stats.add_dropped_block(),
            }
        }

        Ok(segments.join("\n"))
    }

    fn render_groups(&self, groups: &[Group<'_>]) -> Result<Vec<String>> {
        let mut segments = Vec::with_capacity(groups.len());
        for group in groups {
            if let Some(segment) = self.render_group(group)? {
                segments.push(segment);
            }
        }

        if let Some(first) = segments.first_mut() {
            *first = first.trim_start().to_string();
        }
        if let Some(last) = segments.last_mut() {
            *last = last.trim_end().to_string();
        }

        Ok(segments)
    }

    fn render_group(&self, group: &Group<'_>) -> Result<Option<String>> {
        let segment = match group {
            Group::Heading { level, block } => {
                format!("\n{} {}\n", "#".repeat(*level), block.trimmed_text())
            }
            Group::Table(members) => self.render_table_group(members)?,
            Group::List(members) => render_list_group(members),
            Group::Plain(block) => format!("{}\n", block.trimmed_text()),
            Group::Dropped(_) => return Ok(None),
        };
        Ok(Some(segment))
    }

    fn render_table_group(&self, members: &[&Block]) -> Result<String> {
        let mut chunk = String::from("\n");
        for block in members {
            if block.is(&BlockType::Table) {
                let Some(table_id) = block.table_id.as_deref() else {
                    log::warn!("Table block without table_id, skipping");
                    continue;
                };
                chunk.push_str(&self.resolver.resolve(table_id)?);
            } else {
                chunk.push_str(block.trimmed_text());
            }
            chunk.push('\n');
        }
        chunk.push('\n');
        Ok(chunk)
    }
}

fn render_list_group(members: &[&Block]) -> String {
    let mut chunk = String::from("\n");
    for block in members {
        let marker = match block.block_type {
            BlockType::ListItem => "- ",
            BlockType::CheckboxSelected => "[x] ",
            BlockType::CheckboxUnselected => "[ ] ",
            _ => "",
        };
        chunk.push_str(marker);
        chunk.push_str(block.trimmed_text());
        chunk.push('\n');
    }
    chunk.push('\n');
    chunk
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(block_type: &str, text: &str) -> Block {
        Block::new(block_type, text)
    }

    fn format(blocks: &[Block]) -> String {
        let tables = vec![Table::new("t1", "| A | B |")];
        PageFormatter::new(&FormatOptions::default(), &tables)
            .format_page(blocks)
            .unwrap()
    }

    #[test]
    fn test_page_header_levels() {
        let blocks = vec![
            block("page_header", "Annual Report"),
            block("text", "a"),
            block("text", "b"),
            block("page_header", "Later"),
        ];
        assert_eq!(format(&blocks), "# Annual Report\n\na\n\nb\n\n\n## Later");
    }

    #[test]
    fn test_section_header_first_near_top() {
        let blocks = vec![
            block("section_header", "Overview"),
            block("text", "Body"),
            block("section_header", "Details"),
        ];
        let groups = group_blocks(&blocks).unwrap();
        assert!(matches!(groups[0], Group::Heading { level: 1, .. }));
        assert!(matches!(groups[2], Group::Heading { level: 2, .. }));
    }

    #[test]
    fn test_section_header_demoted_by_page_header() {
        let blocks = vec![
            block("page_header", "Acme"),
            block("section_header", "Overview"),
        ];
        let groups = group_blocks(&blocks).unwrap();
        assert!(matches!(groups[0], Group::Heading { level: 1, .. }));
        assert!(matches!(groups[1], Group::Heading { level: 2, .. }));
    }

    #[test]
    fn test_section_header_after_top() {
        let blocks = vec![
            block("text", "a"),
            block("text", "b"),
            block("text", "c"),
            block("section_header", "Late"),
        ];
        let groups = group_blocks(&blocks).unwrap();
        assert!(matches!(groups[3], Group::Heading { level: 2, .. }));
    }

    #[test]
    fn test_paragraph_heading() {
        assert_eq!(format(&[block("paragraph", "  Results  ")]), "### Results");
        assert_eq!(
            format(&[block("paragraph", "Notes:"), block("text", "x")]),
            "### Notes:\n\nx"
        );
        // Last block on the page
        assert_eq!(format(&[block("paragraph", "Notes:")]), "### Notes:");
    }

    #[test]
    fn test_colon_text_with_table() {
        let blocks = vec![block("text", "Revenue:"), Block::table("t1")];
        assert_eq!(format(&blocks), "Revenue:\n| A | B |");

        let tables = vec![Table::new("t1", "| A | B |")];
        let segments = PageFormatter::new(&FormatOptions::default(), &tables)
            .format_segments(&blocks)
            .unwrap();
        assert_eq!(segments, vec!["Revenue:\n| A | B |".to_string()]);
    }

    #[test]
    fn test_colon_paragraph_with_list() {
        let blocks = vec![
            block("paragraph", "Highlights:"),
            block("list_item", "Growth"),
            block("list_item", " Margin "),
        ];
        assert_eq!(format(&blocks), "Highlights:\n- Growth\n- Margin");
    }

    #[test]
    fn test_table_trailing_notes() {
        let blocks = vec![
            Block::table("t1"),
            block("text", "Source: filings"),
            block("footnote", "(1) restated"),
            block("footnote", "(2) unaudited"),
            block("text", "After"),
        ];
        let groups = group_blocks(&blocks).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 4);
        assert_eq!(
            format(&blocks),
            "| A | B |\nSource: filings\n(1) restated\n(2) unaudited\n\n\nAfter"
        );
    }

    #[test]
    fn test_text_without_footnote_not_attached() {
        let blocks = vec![Block::table("t1"), block("text", "Unrelated")];
        let groups = group_blocks(&blocks).unwrap();
        assert_eq!(groups.len(), 2);
        assert!(matches!(groups[1], Group::Plain(_)));
    }

    #[test]
    fn test_checkbox_ends_list() {
        let blocks = vec![
            block("list_item", "One"),
            block("checkbox_selected", "Done"),
            block("checkbox_unselected", "Open"),
            block("footnote", "* estimate"),
        ];
        let groups = group_blocks(&blocks).unwrap();
        assert!(matches!(groups[0], Group::List(ref items) if items.len() == 1));
        assert!(matches!(groups[1], Group::Plain(_)));
        assert_eq!(
            format(&blocks),
            "- One\n\n\nDone\n\nOpen\n\n* estimate"
        );
    }

    #[test]
    fn test_plain_blocks_and_dropped() {
        let blocks = vec![
            block("caption", "Figure 1"),
            block("text", "   "),
            block("formula", "E = mc^2"),
        ];
        let groups = group_blocks(&blocks).unwrap();
        assert!(matches!(groups[1], Group::Dropped(_)));
        assert_eq!(format(&blocks), "Figure 1\n\nE = mc^2");
    }

    #[test]
    fn test_standalone_checkbox() {
        assert_eq!(format(&[block("checkbox_selected", "Yes")]), "Yes");
    }

    #[test]
    fn test_unknown_block_type() {
        let blocks = vec![block("text", "ok"), block("image_map", "x")];
        let err = group_blocks(&blocks).unwrap_err();
        assert!(matches!(err, Error::UnknownBlockType(ref name) if name == "image_map"));
    }

    #[test]
    fn test_filtered_type_rejected() {
        let blocks = vec![block("page_footer", "3")];
        let err = group_blocks(&blocks).unwrap_err();
        assert!(matches!(err, Error::UnexpectedBlockType(ref name) if name == "page_footer"));
    }

    #[test]
    fn test_missing_table() {
        let blocks = vec![Block::table("t9")];
        let tables = vec![Table::new("t1", "| A | B |")];
        let err = PageFormatter::new(&FormatOptions::default(), &tables)
            .format_page(&blocks)
            .unwrap_err();
        assert!(matches!(err, Error::TableNotFound(ref id) if id == "t9"));
    }

    #[test]
    fn test_table_block_without_id() {
        let blocks = vec![block("text", "Costs:"), block("table", "")];
        assert_eq!(format(&blocks), "Costs:");
    }

    #[test]
    fn test_empty_page() {
        let blocks: Vec<Block> = Vec::new();
        assert_eq!(format(&blocks), "");
    }

    #[test]
    fn test_stats() {
        let tables = vec![Table::new("t1", "| A | B |")];
        let blocks = vec![
            block("section_header", "Title"),
            block("text", "Revenue:"),
            Block::table("t1"),
            block("list_item", "x"),
            block("text", " "),
            block("text", "y"),
        ];
        let mut stats = MergeStats::new();
        PageFormatter::new(&FormatOptions::default(), &tables)
            .format_page_with_stats(&blocks, &mut stats)
            .unwrap();
        assert_eq!(stats.page_count, 1);
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.table_group_count, 1);
        assert_eq!(stats.list_group_count, 1);
        assert_eq!(stats.plain_block_count, 1);
        assert_eq!(stats.dropped_block_count, 1);
    }
}
