//! Run the benchmark and write the timing report

use anyhow::{bail, Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use pybench_core::report::ensure_same_files;
use pybench_core::{
    discover_corpus, file_name, Backend, BenchmarkRunner, ReportTable, RunnerConfig, Stage,
    TimingRecord,
};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

pub const REPORT_CSV: &str = "result_times.csv";
pub const REPORT_JSON: &str = "result_times.json";
pub const LOG_DIR: &str = "compiler_logs";

/// Resolved settings for one `pybench run` call
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub baseline_lexer: bool,
    pub lexer: bool,
    pub lexer_test_files: PathBuf,
    pub baseline_parser: bool,
    pub parser: bool,
    pub parser_test_files: PathBuf,
    pub output: PathBuf,
    pub extension: String,
    pub json: bool,
    pub runner: RunnerConfig,
}

impl RunArgs {
    /// Selected backends in report row order
    fn backends(&self) -> Vec<Backend> {
        [
            (self.baseline_lexer, Backend::Baseline(Stage::Lexer)),
            (self.lexer, Backend::External(Stage::Lexer)),
            (self.baseline_parser, Backend::Baseline(Stage::Parser)),
            (self.parser, Backend::External(Stage::Parser)),
        ]
        .into_iter()
        .filter_map(|(selected, backend)| selected.then_some(backend))
        .collect()
    }
}

pub async fn run(args: RunArgs) -> Result<()> {
    let backends = args.backends();
    if backends.is_empty() {
        bail!(
            "No backend selected: pass --baseline-lexer, --lexer, --baseline-parser and/or --parser"
        );
    }

    let start = Instant::now();
    println!("{} pybench run", "→".blue().bold());
    println!("  Compiler: {}", args.runner.compiler.display());
    println!("  Output: {}", args.output.display());

    // Every input directory is checked before the first invocation
    let needs_lexer = backends.iter().any(|b| b.stage() == Stage::Lexer);
    let needs_parser = backends.iter().any(|b| b.stage() == Stage::Parser);
    let lexer_files = if needs_lexer {
        discover_corpus(&args.lexer_test_files, &args.extension)
            .context("Cannot read lexer test files")?
    } else {
        Vec::new()
    };
    let parser_files = if needs_parser {
        discover_corpus(&args.parser_test_files, &args.extension)
            .context("Cannot read parser test files")?
    } else {
        Vec::new()
    };

    // Lexer rows come first, so parser rows must cover the lexer columns
    if needs_lexer && needs_parser {
        let columns: Vec<String> = lexer_files.iter().map(|f| file_name(f)).collect();
        let parser_names: Vec<String> = parser_files.iter().map(|f| file_name(f)).collect();
        let measured = backends
            .iter()
            .find(|b| b.stage() == Stage::Parser)
            .map(Backend::measured_label)
            .unwrap_or_default();
        ensure_same_files(&measured, &columns, parser_names.iter().map(String::as_str))
            .context("Lexer and parser corpora must hold the same file sizes")?;
    }

    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let runner = BenchmarkRunner::new(args.runner.clone());

    let mut records: Vec<TimingRecord> = Vec::with_capacity(backends.len());
    for backend in backends {
        let files = match backend.stage() {
            Stage::Lexer => &lexer_files,
            Stage::Parser => &parser_files,
        };
        let label = backend.measured_label();

        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap(),
        );
        pb.set_message(label.clone());

        let record = runner
            .run_with(backend, files, |file, _| {
                pb.inc(1);
                pb.set_message(format!("{label} {file}"));
            })
            .await
            .with_context(|| format!("Benchmark '{label}' failed"))?;

        pb.finish_with_message(format!("{label} done"));
        records.push(record);
    }

    let table = ReportTable::from_records(records).context("Cannot assemble the report")?;

    let csv_path = args.output.join(REPORT_CSV);
    table.write_csv(&csv_path)?;
    if args.json {
        table.write_json(&args.output.join(REPORT_JSON))?;
    }
    info!("Benchmark finished in {:.2}s", start.elapsed().as_secs_f64());

    println!(
        "\n{} Measured {} backends over {} files in {:.2}s",
        "✓".green().bold(),
        table.rows().len(),
        table.columns().len(),
        start.elapsed().as_secs_f64()
    );
    print_summary(&table);
    println!("  Report: {}", csv_path.display());

    Ok(())
}

fn print_summary(table: &ReportTable) {
    for row in table.rows() {
        let total: f64 = table.columns().iter().filter_map(|c| row.get(c)).sum();
        println!("  {:<24} {:>14.6} ms total", row.measured.bold(), total);
    }
}
