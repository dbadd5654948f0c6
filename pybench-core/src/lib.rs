//! pybench core
//!
//! This crate holds everything between the command line and the disk:
//! - Static token vocabulary and function body templates
//! - Size progressions and the two corpus generators
//! - Timing log parsers for the external compiler
//! - The benchmark runner (external tool and in-process baseline)
//! - The aggregated timing report

pub mod error;
pub mod generator;
pub mod progression;
pub mod report;
pub mod runner;
pub mod templates;
pub mod timing_log;
pub mod vocabulary;

pub use error::{BenchError, LogParseError, Result};
pub use generator::{
    CorpusGenerator, CorpusKind, FunctionCorpusGenerator, GeneratedFile, GeneratorOptions,
    TokenStreamGenerator,
};
pub use progression::SizeProgression;
pub use report::{ReportTable, TimingRecord};
pub use runner::{discover_corpus, file_name, Backend, BenchmarkRunner, RunnerConfig, Stage};
pub use timing_log::{JsonLogParser, LogFormat, StageTimings, TextLogParser, TimingLogParser};
