use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use super::{file_name, Stage};
use crate::error::{BenchError, Result};
use crate::timing_log::{stage_key, LogFormat, TimingLogParser};

/// The compiler under test, invoked once per (stage, file)
pub struct ExternalTool {
    program: PathBuf,
    timeout: Duration,
    parser: Box<dyn TimingLogParser>,
}

impl ExternalTool {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration, log_format: LogFormat) -> Self {
        Self {
            program: program.into(),
            timeout,
            parser: log_format.parser(),
        }
    }

    /// Where the log for `file` at `stage` is written
    pub fn log_path(log_dir: &Path, stage: Stage, file: &Path) -> PathBuf {
        log_dir
            .join(stage.name())
            .join(format!("{}.log", file_name(file)))
    }

    fn command_line(&self, stage: Stage, file: &Path, log: &Path) -> String {
        format!(
            "{} -l {} -O --stop-after {} --time {}",
            self.program.display(),
            log.display(),
            stage.name(),
            file.display()
        )
    }

    /// Run the compiler on `file`, stopping after `stage`, and return the
    /// elapsed milliseconds it logged for that stage.
    pub async fn invoke(&self, stage: Stage, file: &Path, log_dir: &Path) -> Result<f64> {
        let log = Self::log_path(log_dir, stage, file);
        if let Some(parent) = log.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BenchError::io(parent, e))?;
        }
        // A leftover log from an earlier run must not be mistaken for this one
        match tokio::fs::remove_file(&log).await {
            Ok(()) => debug!("Removed stale log {}", log.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(BenchError::io(&log, e)),
        }

        let command = self.command_line(stage, file, &log);
        debug!("Running {command}");

        let child = Command::new(&self.program)
            .arg("-l")
            .arg(&log)
            .arg("-O")
            .arg("--stop-after")
            .arg(stage.name())
            .arg("--time")
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BenchError::Spawn {
                command: command.clone(),
                source,
            })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output.map_err(|source| BenchError::Spawn {
                command: command.clone(),
                source,
            })?,
            Err(_) => {
                warn!("Timed out after {:?}: {command}", self.timeout);
                return Err(BenchError::Timeout {
                    command,
                    timeout: self.timeout,
                });
            }
        };

        if !output.status.success() {
            return Err(BenchError::ProcessFailed {
                command,
                status: output.status.to_string(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let content = match tokio::fs::read_to_string(&log).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BenchError::MissingLog {
                    file: file_name(file),
                    stage: stage.label().to_string(),
                    log,
                })
            }
            Err(e) => return Err(BenchError::io(&log, e)),
        };

        let timings = self
            .parser
            .parse(&content)
            .map_err(|source| BenchError::TimingLog {
                file: file_name(file),
                stage: stage.label().to_string(),
                log: log.clone(),
                source,
            })?;
        debug!("Parsed {} stage timings from {}", timings.len(), log.display());

        let key = stage_key(stage.label());
        timings.get(&key).ok_or_else(|| BenchError::MissingStage {
            file: file_name(file),
            stage: stage.label().to_string(),
            log: log.clone(),
            found: timings.keys().map(str::to_string).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_is_per_stage() {
        let lexer = ExternalTool::log_path(Path::new("out/logs"), Stage::Lexer, Path::new("a/10.py"));
        let parser =
            ExternalTool::log_path(Path::new("out/logs"), Stage::Parser, Path::new("b/10.py"));
        assert_eq!(lexer, PathBuf::from("out/logs/lexer/10.py.log"));
        assert_eq!(parser, PathBuf::from("out/logs/parser/10.py.log"));
    }

    #[test]
    fn test_command_line() {
        let tool = ExternalTool::new("./compiler", Duration::from_secs(1), LogFormat::Text);
        assert_eq!(
            tool.command_line(Stage::Parser, Path::new("t/1.py"), Path::new("l/1.py.log")),
            "./compiler -l l/1.py.log -O --stop-after parser --time t/1.py"
        );
    }
}
