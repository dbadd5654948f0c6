//! Benchmark runner
//!
//! Measures one backend over an ordered list of corpus files and yields a
//! [`TimingRecord`]. External backends shell out to the compiler under
//! test; baseline backends run the in-process reference front end.

mod baseline;
mod external;

pub use baseline::measure_baseline;
pub use external::ExternalTool;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{BenchError, Result};
use crate::report::TimingRecord;
use crate::timing_log::{stage_key, LogFormat};

pub const DEFAULT_COMPILER: &str = "./compiler/build/bin/Release/compiler";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Front-end stage a backend stops after
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Lexer,
    Parser,
}

impl Stage {
    /// Value passed to `--stop-after`
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Lexer => "lexer",
            Stage::Parser => "parser",
        }
    }

    /// Stage name as the compiler prints it in its timing log
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Lexer => "LEXER",
            Stage::Parser => "PARSER",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// The compiler under test
    External(Stage),
    /// In-process reference front end
    Baseline(Stage),
}

impl Backend {
    pub fn stage(&self) -> Stage {
        match self {
            Backend::External(stage) | Backend::Baseline(stage) => *stage,
        }
    }

    /// Row label in the report
    pub fn measured_label(&self) -> String {
        match self {
            Backend::External(stage) => stage_key(stage.label()),
            Backend::Baseline(stage) => stage_key(&format!("baseline {}", stage.name())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub compiler: PathBuf,
    /// Root for per-invocation compiler logs
    pub log_dir: PathBuf,
    pub timeout: Duration,
    pub log_format: LogFormat,
}

impl RunnerConfig {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            compiler: PathBuf::from(DEFAULT_COMPILER),
            log_dir: log_dir.into(),
            timeout: DEFAULT_TIMEOUT,
            log_format: LogFormat::default(),
        }
    }
}

pub struct BenchmarkRunner {
    config: RunnerConfig,
    tool: ExternalTool,
}

impl BenchmarkRunner {
    pub fn new(config: RunnerConfig) -> Self {
        let tool = ExternalTool::new(&config.compiler, config.timeout, config.log_format);
        Self { config, tool }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Measure `backend` on each file in order, one invocation at a time
    pub async fn run(&self, backend: Backend, files: &[PathBuf]) -> Result<TimingRecord> {
        self.run_with(backend, files, |_, _| {}).await
    }

    /// Like [`BenchmarkRunner::run`], calling `on_file` with each measurement
    pub async fn run_with<F>(
        &self,
        backend: Backend,
        files: &[PathBuf],
        mut on_file: F,
    ) -> Result<TimingRecord>
    where
        F: FnMut(&str, f64),
    {
        let mut record = TimingRecord::new(backend.measured_label());
        info!("Measuring {} over {} files", record.measured, files.len());

        for file in files {
            let name = file_name(file);
            let millis = match backend {
                Backend::External(stage) => {
                    self.tool
                        .invoke(stage, file, &self.config.log_dir)
                        .await?
                }
                Backend::Baseline(stage) => measure_baseline(stage, file)?,
            };
            debug!("{}: {name} took {millis} ms", record.measured);

            on_file(&name, millis);
            record.record(name, millis);
        }

        Ok(record)
    }
}

/// Corpus files in `dir` with `extension`, ordered by numeric stem
/// (`1.py`, `10.py`, `100.py`); non-numeric stems sort last by name.
pub fn discover_corpus(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(BenchError::MissingInputDir {
            path: dir.to_path_buf(),
        });
    }

    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{escaped}/*.{extension}");

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    debug!("Found {} corpus files in {}", files.len(), dir.display());
    Ok(files)
}

fn sort_key(path: &Path) -> (u64, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    (stem.parse().unwrap_or(u64::MAX), stem)
}

/// File name of `path` as it appears in report columns
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_measured_labels() {
        assert_eq!(Backend::External(Stage::Lexer).measured_label(), "LEXER (ms)");
        assert_eq!(Backend::External(Stage::Parser).measured_label(), "PARSER (ms)");
        assert_eq!(
            Backend::Baseline(Stage::Lexer).measured_label(),
            "baseline lexer (ms)"
        );
        assert_eq!(
            Backend::Baseline(Stage::Parser).measured_label(),
            "baseline parser (ms)"
        );
    }

    #[test]
    fn test_discover_sorts_numerically() {
        let temp = TempDir::new().unwrap();
        for name in ["100.py", "1.py", "notes.py", "10.py", "readme.txt"] {
            fs::write(temp.path().join(name), "x").unwrap();
        }
        fs::create_dir(temp.path().join("1000.py")).unwrap();

        let files = discover_corpus(temp.path(), "py").unwrap();
        let names: Vec<String> = files.iter().map(|f| file_name(f)).collect();
        assert_eq!(names, vec!["1.py", "10.py", "100.py", "notes.py"]);
    }

    #[test]
    fn test_discover_missing_dir() {
        let temp = TempDir::new().unwrap();
        let result = discover_corpus(&temp.path().join("absent"), "py");
        assert!(matches!(result, Err(BenchError::MissingInputDir { .. })));
    }
}
