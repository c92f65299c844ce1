//! Counters collected while formatting reports.

use serde::{Deserialize, Serialize};

/// Statistics collected during formatting and cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Total number of pages formatted
    pub page_count: u32,

    /// Number of heading lines emitted (levels 1-3)
    pub heading_count: u32,

    /// Number of table groups
    pub table_group_count: u32,

    /// Number of list groups
    pub list_group_count: u32,

    /// Number of blocks rendered as plain lines
    pub plain_block_count: u32,

    /// Number of whitespace-only blocks dropped
    pub dropped_block_count: u32,

    /// Number of artifacts repaired by the normalizer
    pub correction_count: u32,
}

impl MergeStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment page count.
    pub fn add_page(&mut self) {
        self.page_count = self.page_count.saturating_add(1);
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count = self.heading_count.saturating_add(1);
    }

    /// Increment table group count.
    pub fn add_table_group(&mut self) {
        self.table_group_count = self.table_group_count.saturating_add(1);
    }

    /// Increment list group count.
    pub fn add_list_group(&mut self) {
        self.list_group_count = self.list_group_count.saturating_add(1);
    }

    /// Increment plain block count.
    pub fn add_plain_block(&mut self) {
        self.plain_block_count = self.plain_block_count.saturating_add(1);
    }

    /// Increment dropped block count.
    pub fn add_dropped_block(&mut self) {
        self.dropped_block_count = self.dropped_block_count.saturating_add(1);
    }

    /// Add normalizer corrections.
    pub fn add_corrections(&mut self, count: usize) {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        self.correction_count = self.correction_count.saturating_add(count);
    }

    /// Merge another stats instance into this one.
    ///
    /// Counters saturate at `u32::MAX`.
    pub fn merge(&mut self, other: &MergeStats) {
        self.page_count = self.page_count.saturating_add(other.page_count);
        self.heading_count = self.heading_count.saturating_add(other.heading_count);
        self.table_group_count = self.table_group_count.saturating_add(other.table_group_count);
        self.list_group_count = self.list_group_count.saturating_add(other.list_group_count);
        self.plain_block_count = self.plain_block_count.saturating_add(other.plain_block_count);
        self.dropped_block_count = self.dropped_block_count.saturating_add(other.dropped_block_count);
        self.correction_count = self.correction_count.saturating_add(other.correction_count);
    }
}
