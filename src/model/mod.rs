//! Report model types.
//!
//! This module defines the input produced by the upstream layout extractor
//! (reports, pages, typed blocks, pre-rendered tables) and the processed
//! output (one cleaned text per page). All types map one-to-one onto the
//! JSON files exchanged with the rest of the pipeline.

mod document;
mod page;
mod table;

pub use document::{Metainfo, ProcessedContent, ProcessedPage, ProcessedReport, Report, ReportFile};
pub use page::{Block, BlockType, Page};
pub use table::{InformationBlock, SerializedTable, Table};
