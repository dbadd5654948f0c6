//! Stage timings reported by the external compiler
//!
//! The runner only talks to [`TimingLogParser`]; the textual log contract
//! and the structured JSON-lines contract live behind it.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::LogParseError;

/// Key under which a stage's timing is stored, e.g. `LEXER (ms)`
pub fn stage_key(stage: &str) -> String {
    format!("{stage} (ms)")
}

/// Stage timings in the order they appear in the log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageTimings {
    entries: Vec<(String, f64)>,
}

impl StageTimings {
    /// Insert or update; an updated key keeps its first position
    pub fn insert(&mut self, key: String, millis: f64) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = millis,
            None => self.entries.push((key, millis)),
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, millis)| *millis)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub trait TimingLogParser: Send + Sync {
    /// Extract every stage timing from `log`. A log without any timing
    /// is an error.
    fn parse(&self, log: &str) -> Result<StageTimings, LogParseError>;
}

/// `<STAGE_NAME> Elapsed time: <float>` lines
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLogParser;

static TIMING_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z][A-Z_]*) Elapsed time: ([0-9]+(?:\.[0-9]*)?(?:[eE][+-]?[0-9]+)?)").unwrap()
});

impl TimingLogParser for TextLogParser {
    fn parse(&self, log: &str) -> Result<StageTimings, LogParseError> {
        let mut timings = StageTimings::default();

        for (index, line) in log.lines().enumerate() {
            for captures in TIMING_LINE.captures_iter(line) {
                let millis = captures[2]
                    .parse::<f64>()
                    .map_err(|e| LogParseError::MalformedRecord {
                        line: index + 1,
                        message: format!("bad elapsed time {:?}: {e}", &captures[2]),
                    })?;
                timings.insert(stage_key(&captures[1]), millis);
            }
        }

        if timings.is_empty() {
            return Err(LogParseError::NoTimings);
        }
        Ok(timings)
    }
}

/// One JSON object per stage and line: `{"stage": "LEXER", "elapsed_ms": 1.5}`.
///
/// Lines that do not start with `{` are ordinary log output and skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLogParser;

#[derive(Debug, Deserialize)]
struct StageRecord {
    stage: String,
    elapsed_ms: f64,
}

impl TimingLogParser for JsonLogParser {
    fn parse(&self, log: &str) -> Result<StageTimings, LogParseError> {
        let mut timings = StageTimings::default();

        for (index, line) in log.lines().enumerate() {
            let line = line.trim();
            if !line.starts_with('{') {
                continue;
            }
            let record: StageRecord =
                serde_json::from_str(line).map_err(|e| LogParseError::MalformedRecord {
                    line: index + 1,
                    message: e.to_string(),
                })?;
            timings.insert(stage_key(&record.stage), record.elapsed_ms);
        }

        if timings.is_empty() {
            return Err(LogParseError::NoTimings);
        }
        Ok(timings)
    }
}

/// Which log contract the external compiler follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn parser(&self) -> Box<dyn TimingLogParser> {
        match self {
            LogFormat::Text => Box::new(TextLogParser),
            LogFormat::Json => Box::new(JsonLogParser),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected text or json)")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}
