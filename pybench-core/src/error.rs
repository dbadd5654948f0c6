//! Harness error types

use std::path::PathBuf;
use std::time::Duration;

use pybench_baseline::BaselineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BenchError>;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Input directory not found: {}", path.display())]
    MissingInputDir { path: PathBuf },

    #[error("Invalid size progression: {message}")]
    InvalidProgression { message: String },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with {status}\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}")]
    ProcessFailed {
        command: String,
        status: String,
        stdout: String,
        stderr: String,
    },

    #[error("`{command}` did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    #[error("{stage} produced no log for {file} (expected {})", log.display())]
    MissingLog {
        file: String,
        stage: String,
        log: PathBuf,
    },

    #[error("Unreadable {stage} timing log {} for {file}: {source}", log.display())]
    TimingLog {
        file: String,
        stage: String,
        log: PathBuf,
        #[source]
        source: LogParseError,
    },

    #[error("{stage} timing missing from {} for {file} (found: {})", log.display(), found.join(", "))]
    MissingStage {
        file: String,
        stage: String,
        log: PathBuf,
        found: Vec<String>,
    },

    #[error("Baseline {stage} failed on {file}: {source}")]
    Baseline {
        file: String,
        stage: String,
        #[source]
        source: BaselineError,
    },

    #[error("Row '{measured}' does not match the report columns (missing: [{}], unexpected: [{}])", missing.join(", "), unexpected.join(", "))]
    InconsistentRow {
        measured: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("No timing rows to report")]
    EmptyReport,

    #[error("Invalid corpus pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Corpus scan error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BenchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BenchError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while reading a timing log
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LogParseError {
    #[error("no stage timing records found")]
    NoTimings,

    #[error("line {line}: {message}")]
    MalformedRecord { line: usize, message: String },
}
