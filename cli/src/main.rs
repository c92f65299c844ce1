//! pagemerge CLI - report page merging and Markdown export

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pagemerge::{BatchReport, Error, ExportReport, FormatOptions, ReportProcessor};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pagemerge")]
#[command(version)]
#[command(about = "Merge layout-extracted report pages into clean Markdown", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge raw report pages into processed reports
    Merge {
        /// Directory with raw report JSON files
        #[arg(short, long, value_name = "DIR")]
        input: PathBuf,

        /// Directory for processed reports
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        #[command(flatten)]
        tables: TableArgs,
    },

    /// Export reports to Markdown documents
    Export {
        /// Directory with raw or processed report JSON files
        #[arg(short, long, value_name = "DIR")]
        input: PathBuf,

        /// Directory for exported documents
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: ExportFormat,
    },

    /// Merge and export in one run
    Pipeline {
        /// Directory with raw report JSON files
        #[arg(short, long, value_name = "DIR")]
        input: PathBuf,

        /// Base output directory (`merged/` and `markdown/` are created)
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        #[command(flatten)]
        tables: TableArgs,
    },

    /// List a directory's contents
    List {
        /// Directory to list
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct TableArgs {
    /// Append the serialized table text to each Markdown table
    #[arg(long)]
    use_serialized_tables: bool,

    /// Emit only the serialized table text (with --use-serialized-tables)
    #[arg(long)]
    serialized_instead_of_markdown: bool,

    /// Process reports one at a time
    #[arg(long)]
    sequential: bool,
}

impl From<&TableArgs> for FormatOptions {
    fn from(args: &TableArgs) -> Self {
        FormatOptions::new()
            .with_serialized_tables(args.use_serialized_tables)
            .with_serialized_instead_of_markdown(args.serialized_instead_of_markdown)
            .with_parallel(!args.sequential)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    /// One Markdown document per report
    Markdown,
}

impl ExportFormat {
    fn progress_message(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "Exporting Markdown...",
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Merge {
            input,
            output,
            tables,
        } => cmd_merge(&input, &output, &tables).map(|batch| batch.all_succeeded()),
        Commands::Export {
            input,
            output,
            format,
        } => cmd_export(&input, &output, format).map(|report| report.all_succeeded()),
        Commands::Pipeline {
            input,
            output,
            tables,
        } => cmd_pipeline(&input, &output, &tables),
        Commands::List { dir } => cmd_list(&dir).map(|_| true),
        Commands::Version => {
            cmd_version();
            Ok(true)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Treat a missing input directory as a skipped step.
fn skip_missing<T>(result: pagemerge::Result<T>) -> CliResult<Option<T>> {
    match result {
        Err(Error::InputNotFound(path)) => {
            log::warn!("Input directory {} does not exist, skipping", path.display());
            println!(
                "{} {} does not exist",
                "Skipped:".yellow().bold(),
                path.display()
            );
            Ok(None)
        }
        other => Ok(Some(other?)),
    }
}

fn cmd_merge(input: &Path, output: &Path, tables: &TableArgs) -> CliResult<BatchReport> {
    let processor = ReportProcessor::new(tables.into());

    let pb = spinner("Merging report pages...");
    let batch = skip_missing(processor.process_dir(input, Some(output)));
    pb.finish_and_clear();
    let Some(batch) = batch? else {
        return Ok(BatchReport::default());
    };

    batch.write_summary(output)?;
    print_batch(&batch, output);
    Ok(batch)
}

fn print_batch(batch: &BatchReport, output: &Path) {
    let stats = batch.stats();
    let succeeded = batch.succeeded().count();

    println!(
        "{} {} of {} reports merged into {}",
        "Done!".green().bold(),
        succeeded,
        batch.len(),
        output.display()
    );
    println!(
        "  {} {} pages, {} tables, {} lists",
        "├─".dimmed(),
        stats.page_count,
        stats.table_group_count,
        stats.list_group_count
    );
    println!(
        "  {} {} corrections",
        "└─".dimmed(),
        stats.correction_count
    );

    for outcome in batch.failed() {
        if let Some(e) = outcome.error() {
            eprintln!(
                "{} {}: {}",
                "Failed".red().bold(),
                outcome.source.display(),
                e
            );
        }
    }
}

fn cmd_export(input: &Path, output: &Path, format: ExportFormat) -> CliResult<ExportReport> {
    let processor = ReportProcessor::default();

    let pb = spinner(format.progress_message());
    let report = skip_missing(processor.export_dir(input, output));
    pb.finish_and_clear();
    let Some(report) = report? else {
        return Ok(ExportReport::default());
    };

    println!(
        "{} {} of {} reports exported to {}",
        "Done!".green().bold(),
        report.written().count(),
        report.len(),
        output.display()
    );
    for outcome in report.failed() {
        if let Err(e) = &outcome.result {
            eprintln!(
                "{} {}: {}",
                "Failed".red().bold(),
                outcome.source.display(),
                e
            );
        }
    }
    Ok(report)
}

fn cmd_pipeline(input: &Path, output: &Path, tables: &TableArgs) -> CliResult<bool> {
    let merged_dir = output.join("merged");
    let markdown_dir = output.join("markdown");

    println!("{}", "Step 1/2: merge".cyan().bold());
    let batch = cmd_merge(input, &merged_dir, tables)?;

    println!("{}", "Step 2/2: export".cyan().bold());
    let report = cmd_export(&merged_dir, &markdown_dir, ExportFormat::Markdown)?;

    Ok(batch.all_succeeded() && report.all_succeeded())
}

fn cmd_list(dir: &Path) -> CliResult<()> {
    if !dir.is_dir() {
        return Err(Error::InputNotFound(dir.to_path_buf()).into());
    }

    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|e| e.file_name());

    println!("{} {}", "Contents of".cyan().bold(), dir.display());
    println!("{}", "─".repeat(40).dimmed());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if path.is_dir() {
            let count = fs::read_dir(&path)?.count();
            println!("  {}/ ({} items)", name.bold(), count);
        } else {
            let size = entry.metadata()?.len();
            println!("  {} ({})", name, format_size(size));
        }
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

fn cmd_version() {
    println!("{} {}", "pagemerge".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Report page merging and Markdown export tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_table_args_to_options() {
        let args = TableArgs {
            use_serialized_tables: true,
            serialized_instead_of_markdown: false,
            sequential: true,
        };
        let options = FormatOptions::from(&args);
        assert!(options.use_serialized_tables);
        assert!(!options.parallel);
    }

    #[test]
    fn test_cli_parses_merge() {
        let cli = Cli::try_parse_from([
            "pagemerge",
            "merge",
            "-i",
            "parsed",
            "-o",
            "merged",
            "--use-serialized-tables",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Merge { ref tables, .. } if tables.use_serialized_tables
        ));
    }

    #[test]
    fn test_cmd_list() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        assert!(cmd_list(dir.path()).is_ok());
        assert!(cmd_list(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_merge_missing_input_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let tables = TableArgs {
            use_serialized_tables: false,
            serialized_instead_of_markdown: false,
            sequential: true,
        };
        let batch = cmd_merge(&dir.path().join("parsed"), &dir.path().join("merged"), &tables).unwrap();
        assert!(batch.is_empty());
        assert!(!dir.path().join("merged").exists());
    }

    #[test]
    fn test_merge_empty_input_writes_summary() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("parsed")).unwrap();
        let tables = TableArgs {
            use_serialized_tables: false,
            serialized_instead_of_markdown: false,
            sequential: true,
        };
        let merged = dir.path().join("merged");
        let batch = cmd_merge(&dir.path().join("parsed"), &merged, &tables).unwrap();
        assert!(batch.is_empty());

        let summary = fs::read_to_string(merged.join("processing_summary.json")).unwrap();
        assert!(summary.contains("\"total_reports\": 0"));
    }

    #[test]
    fn test_skip_missing_input() {
        let result: pagemerge::Result<BatchReport> =
            Err(Error::InputNotFound(PathBuf::from("/nonexistent")));
        assert!(skip_missing(result).unwrap().is_none());

        let result: pagemerge::Result<BatchReport> = Ok(BatchReport::default());
        assert!(skip_missing(result).unwrap().is_some());
    }
}
