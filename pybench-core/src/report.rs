//! Timing records and the aggregated report

use std::fs;
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::info;

use crate::error::{BenchError, Result};

pub const MEASURED_COLUMN: &str = "measured";

/// Round to the report's precision of 6 decimal places
pub fn round_ms(millis: f64) -> f64 {
    (millis * 1_000_000.0).round() / 1_000_000.0
}

/// Elapsed milliseconds per file for one backend
#[derive(Debug, Clone, PartialEq)]
pub struct TimingRecord {
    /// Backend label, e.g. `LEXER (ms)`
    pub measured: String,
    timings: Vec<(String, f64)>,
}

impl TimingRecord {
    pub fn new(measured: impl Into<String>) -> Self {
        Self {
            measured: measured.into(),
            timings: Vec::new(),
        }
    }

    /// Record a file's time, rounded; re-recording a file overwrites it in place
    pub fn record(&mut self, file: impl Into<String>, millis: f64) {
        let file = file.into();
        let millis = round_ms(millis);
        match self.timings.iter_mut().find(|(name, _)| *name == file) {
            Some(entry) => entry.1 = millis,
            None => self.timings.push((file, millis)),
        }
    }

    pub fn get(&self, file: &str) -> Option<f64> {
        self.timings
            .iter()
            .find(|(name, _)| name == file)
            .map(|(_, millis)| *millis)
    }

    /// File names in the order they were processed
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.timings.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.timings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timings.is_empty()
    }
}

// Serialized the same way as a report row: `measured` plus one key per file
impl Serialize for TimingRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.timings.len() + 1))?;
        map.serialize_entry(MEASURED_COLUMN, &self.measured)?;
        for (file, millis) in &self.timings {
            map.serialize_entry(file, millis)?;
        }
        map.end()
    }
}

/// One row per backend over a shared set of file columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    columns: Vec<String>,
    rows: Vec<TimingRecord>,
}

impl ReportTable {
    /// Build a table whose columns are the first row's files.
    ///
    /// Every other row must cover exactly the same files; its cells are
    /// reordered to follow the columns.
    pub fn from_records(mut rows: Vec<TimingRecord>) -> Result<Self> {
        let first = rows.first().ok_or(BenchError::EmptyReport)?;
        let columns: Vec<String> = first.files().map(str::to_string).collect();

        for row in &mut rows {
            ensure_same_files(&row.measured, &columns, row.files())?;
            row.timings
                .sort_by_key(|(file, _)| columns.iter().position(|column| column == file));
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[TimingRecord] {
        &self.rows
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::new();

        out.push_str(MEASURED_COLUMN);
        for column in &self.columns {
            out.push(',');
            out.push_str(&csv_field(column));
        }
        out.push('\n');

        for row in &self.rows {
            out.push_str(&csv_field(&row.measured));
            for (_, millis) in &row.timings {
                out.push_str(&format!(",{millis:.6}"));
            }
            out.push('\n');
        }

        out
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_csv()).map_err(|e| BenchError::io(path, e))?;
        info!("Wrote {} rows to {}", self.rows.len(), path.display());
        Ok(())
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| BenchError::io(path, e))?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

/// Check that `files` is exactly the column set `columns`.
///
/// Fails with [`BenchError::InconsistentRow`] naming `measured` and the
/// missing and unexpected files.
pub fn ensure_same_files<'a>(
    measured: &str,
    columns: &[String],
    files: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    let files: Vec<&str> = files.into_iter().collect();
    let missing: Vec<String> = columns
        .iter()
        .filter(|column| !files.contains(&column.as_str()))
        .cloned()
        .collect();
    let unexpected: Vec<String> = files
        .iter()
        .filter(|file| !columns.iter().any(|column| column == *file))
        .map(|file| file.to_string())
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        return Ok(());
    }
    Err(BenchError::InconsistentRow {
        measured: measured.to_string(),
        missing,
        unexpected,
    })
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(measured: &str, cells: &[(&str, f64)]) -> TimingRecord {
        let mut record = TimingRecord::new(measured);
        for (file, millis) in cells {
            record.record(*file, *millis);
        }
        record
    }

    #[test]
    fn test_round_ms() {
        assert_eq!(round_ms(1.23456789), 1.234568);
        assert_eq!(round_ms(0.0000004), 0.0);
    }

    #[test]
    fn test_rerecord_overwrites_in_place() {
        let record = record("LEXER (ms)", &[("1.py", 1.0), ("10.py", 2.0), ("1.py", 3.0)]);
        assert_eq!(record.files().collect::<Vec<_>>(), vec!["1.py", "10.py"]);
        assert_eq!(record.get("1.py"), Some(3.0));
    }

    #[test]
    fn test_csv_layout() {
        let table = ReportTable::from_records(vec![
            record("baseline lexer (ms)", &[("1.py", 0.5), ("10.py", 1.25)]),
            record("LEXER (ms)", &[("10.py", 0.1234567), ("1.py", 2.0)]),
        ])
        .unwrap();

        assert_eq!(
            table.to_csv(),
            "measured,1.py,10.py\n\
             baseline lexer (ms),0.500000,1.250000\n\
             LEXER (ms),2.000000,0.123457\n"
        );
    }

    #[test]
    fn test_rows_follow_column_order() {
        let table = ReportTable::from_records(vec![
            record("baseline parser (ms)", &[("1.py", 0.5), ("10.py", 1.0), ("100.py", 2.0)]),
            record("PARSER (ms)", &[("100.py", 3.0), ("1.py", 4.0), ("10.py", 5.0)]),
        ])
        .unwrap();

        let second = &table.rows()[1];
        assert_eq!(second.files().collect::<Vec<_>>(), vec!["1.py", "10.py", "100.py"]);
        assert_eq!(second.get("100.py"), Some(3.0));
        assert!(table.to_csv().ends_with("PARSER (ms),4.000000,5.000000,3.000000\n"));
    }

    #[test]
    fn test_ensure_same_files() {
        let columns = vec!["1.py".to_string(), "10.py".to_string()];
        assert!(ensure_same_files("LEXER (ms)", &columns, ["10.py", "1.py"]).is_ok());

        match ensure_same_files("PARSER (ms)", &columns, ["1.py", "7.py"]) {
            Err(BenchError::InconsistentRow {
                measured,
                missing,
                unexpected,
            }) => {
                assert_eq!(measured, "PARSER (ms)");
                assert_eq!(missing, vec!["10.py".to_string()]);
                assert_eq!(unexpected, vec!["7.py".to_string()]);
            }
            other => panic!("expected InconsistentRow, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_cell_is_error() {
        let result = ReportTable::from_records(vec![
            record("LEXER (ms)", &[("1.py", 0.5), ("10.py", 1.0)]),
            record("PARSER (ms)", &[("1.py", 0.5)]),
        ]);

        match result {
            Err(BenchError::InconsistentRow {
                measured,
                missing,
                unexpected,
            }) => {
                assert_eq!(measured, "PARSER (ms)");
                assert_eq!(missing, vec!["10.py".to_string()]);
                assert!(unexpected.is_empty());
            }
            other => panic!("expected InconsistentRow, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_cell_is_error() {
        let result = ReportTable::from_records(vec![
            record("LEXER (ms)", &[("1.py", 0.5)]),
            record("PARSER (ms)", &[("1.py", 0.5), ("100.py", 9.0)]),
        ]);
        assert!(matches!(result, Err(BenchError::InconsistentRow { .. })));
    }

    #[test]
    fn test_empty_report_is_error() {
        assert!(matches!(
            ReportTable::from_records(vec![]),
            Err(BenchError::EmptyReport)
        ));
    }

    #[test]
    fn test_csv_quoting() {
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("plain.py"), "plain.py");
    }

    #[test]
    fn test_json_rows_are_keyed_by_file() {
        let table =
            ReportTable::from_records(vec![record("LEXER (ms)", &[("1.py", 0.5)])]).unwrap();
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value["columns"][0], "1.py");
        assert_eq!(value["rows"][0]["measured"], "LEXER (ms)");
        assert_eq!(value["rows"][0]["1.py"], 0.5);
    }
}
