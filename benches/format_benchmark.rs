//! Benchmarks for page formatting and text cleanup.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic reports with a fixed mix of block types.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagemerge::model::{Block, BlockType, Metainfo, Page, Report, Table};
use pagemerge::{FormatOptions, ReportProcessor, TextNormalizer};

/// Creates a synthetic report with the given number of pages.
fn create_test_report(page_count: u32) -> Report {
    let mut report = Report::new(Metainfo::named("bench"));

    for n in 1..=page_count {
        let table_id = format!("t{}", n);
        report.add_page(Page::with_blocks(
            n,
            vec![
                Block::new(BlockType::PageHeader, "Annual report /two.tnum/zero.tnum/two.tnum/three.tnum"),
                Block::new(BlockType::SectionHeader, format!("Section {}", n)),
                Block::text("Revenue grew /one.pl/two.pl/percent.tnum over the year."),
                Block::text("Key figures:"),
                Block::table(table_id.clone()),
                Block::new(BlockType::Footnote, "1 Unaudited"),
                Block::new(BlockType::Paragraph, "Outlook"),
                Block::text("Priorities:"),
                Block::new(BlockType::ListItem, "Margin"),
                Block::new(BlockType::ListItem, "Growth glyph<c=3,font=/F1>"),
                Block::new(BlockType::PageFooter, format!("{}", n)),
            ],
        ));
        report.add_table(
            Table::new(table_id, "| Year | Revenue |\n|---|---|\n| 2023 | 5.0 |")
                .with_serialized(["Revenue in 2023 was 5.0 bn."]),
        );
    }

    report
}

/// Benchmark glyph cleanup on one page of text.
fn bench_normalize(c: &mut Criterion) {
    let normalizer = TextNormalizer::new();
    let text = "Revenue /one.pl/two.pl/percent.tnum to /dollar.pl/five.pl/period.pl/zero.pl bn /A.cap glyph<c=1,font=/G1>".repeat(20);

    c.bench_function("normalize_page", |b| {
        b.iter(|| normalizer.normalize(black_box(&text)));
    });
}

/// Benchmark report processing at various sizes.
fn bench_process_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_report");

    for page_count in [1, 10, 100].iter() {
        let report = create_test_report(*page_count);
        let processor = ReportProcessor::new(FormatOptions::new().with_serialized_tables(true));

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| processor.process_report(black_box(&report)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark normalizer construction (regex compilation).
fn bench_normalizer_creation(c: &mut Criterion) {
    c.bench_function("normalizer_creation", |b| {
        b.iter(TextNormalizer::new);
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_process_report,
    bench_normalizer_creation,
);
criterion_main!(benches);
