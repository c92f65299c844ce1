//! Rendering module: page formatting, text cleanup and output formats.

mod cleanup;
pub mod formatter;
mod json;
mod markdown;
mod options;
mod result;
mod table;

pub use cleanup::{
    slash_command, Correction, NormalizeResult, TextNormalizer, SLASH_COMMANDS,
    SLASH_COMMAND_SUFFIXES,
};
pub use formatter::{group_blocks, Group, PageFormatter};
pub use json::{to_json, JsonFormat};
pub use markdown::{export_file_name, to_markdown};
pub use options::{FormatOptions, TableSource};
pub use result::MergeStats;
pub use table::{TableResolver, DESCRIPTION_HEADING};
