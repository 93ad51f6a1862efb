//! Performance benchmarks for the REP-P punch-record toolkit.
//!
//! This benchmark suite measures the paths that scale with file size:
//! - Parsing a punch file of 10 000 records
//! - Linking 10 000 records against a 1 000-employee roster
//! - Generating and rendering a 50 x 200 punch block
//! - Exporting 10 000 records in each layout
//! - Loading a punch file from disk through a session
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use rep_p_toolkit::codec::{ExportFormat, export, parse_csv, parse_records};
use rep_p_toolkit::config::{ExportConfig, RosterVocabulary, ToolkitConfig};
use rep_p_toolkit::engine::{generate, link, render_block};
use rep_p_toolkit::models::{Employee, PunchRecord};
use rep_p_toolkit::session::{RecordingNotifier, Session};

/// Synthetic 11-digit id for employee `i`; linking does not validate ids.
fn tax_id(i: usize) -> String {
    format!("{:011}", 10_000_000_000usize + i)
}

fn roster(size: usize) -> Vec<Employee> {
    (0..size)
        .map(|i| Employee::new(format!("Funcionário {}", i), tax_id(i)))
        .collect()
}

/// A punch file with `records` record lines, each followed by an ignored line.
fn punch_file(records: usize, employees: usize) -> String {
    (0..records)
        .map(|i| {
            format!(
                "offl_dh:{{hora:{:02}:{:02},data:2024-03-{:02}}},ident_func:{},nome_func:\nIGNORED\n",
                (i / 60) % 24,
                i % 60,
                1 + i % 28,
                tax_id(i % (employees + employees / 10))
            )
        })
        .collect()
}

fn bench_parse_records(c: &mut Criterion) {
    let text = punch_file(10_000, 1_000);

    let mut group = c.benchmark_group("parsing");
    group.throughput(Throughput::Elements(10_000));
    group.bench_function("parse_records_10000", |b| {
        b.iter(|| black_box(parse_records(black_box(&text))))
    });

    let csv: String = std::iter::once("nome;cpf;setor\n".to_string())
        .chain(roster(1_000).iter().map(|e| format!("{};{};RH\n", e.name, e.tax_id)))
        .collect();
    let columns = RosterVocabulary::default().csv_columns;
    group.bench_function("parse_csv_roster_1000", |b| {
        b.iter(|| black_box(parse_csv(black_box(&csv), &columns).unwrap()))
    });
    group.finish();
}

fn bench_link(c: &mut Criterion) {
    let employees = roster(1_000);
    let records = parse_records(&punch_file(10_000, 1_000)).records;

    let mut group = c.benchmark_group("linking");
    group.throughput(Throughput::Elements(records.len() as u64));
    group.bench_function("link_10000_against_1000", |b| {
        b.iter_batched(
            || records.clone(),
            |mut records| black_box(link(&mut records, &employees)),
            criterion::BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let employees = roster(50);
    let start = NaiveDate::from_ymd_opt(2024, 3, 10)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();

    c.bench_function("generate_and_render_50x200", |b| {
        b.iter(|| {
            let punches = generate(&employees, start, black_box(200)).unwrap();
            black_box(render_block(&punches))
        })
    });
}

fn bench_export(c: &mut Criterion) {
    let mut records = parse_records(&punch_file(10_000, 1_000)).records;
    link(&mut records, &roster(1_000));
    let view: Vec<&PunchRecord> = records.iter().collect();
    let config = ExportConfig::default();

    let mut group = c.benchmark_group("export");
    group.throughput(Throughput::Elements(view.len() as u64));
    for format in [ExportFormat::Csv, ExportFormat::Xml, ExportFormat::Txt] {
        group.bench_with_input(BenchmarkId::from_parameter(format), &format, |b, format| {
            b.iter(|| black_box(export(&view, *format, &config).unwrap()))
        });
    }
    group.finish();
}

fn bench_session_file_load(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registros.txt");
    std::fs::write(&path, punch_file(10_000, 1_000)).unwrap();

    let mut group = c.benchmark_group("session");
    group.sample_size(20);
    group.bench_function("load_records_file_10000", |b| {
        b.to_async(&rt).iter(|| async {
            let notifier = RecordingNotifier::new();
            let mut session = Session::new(ToolkitConfig::default());
            black_box(session.load_records_file(&path, &notifier).await.unwrap())
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_records,
    bench_link,
    bench_generate,
    bench_export,
    bench_session_file_load,
);
criterion_main!(benches);
