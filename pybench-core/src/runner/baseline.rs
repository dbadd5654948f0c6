use std::fs;
use std::hint::black_box;
use std::path::Path;
use std::time::Instant;

use super::{file_name, Stage};
use crate::error::{BenchError, Result};

/// Time the reference front end on `file`, in milliseconds.
///
/// The file is read before the clock starts; only tokenizing (and parsing,
/// for [`Stage::Parser`]) is measured.
pub fn measure_baseline(stage: Stage, file: &Path) -> Result<f64> {
    let source = fs::read_to_string(file).map_err(|e| BenchError::io(file, e))?;
    let to_error = |source| BenchError::Baseline {
        file: file_name(file),
        stage: stage.name().to_string(),
        source,
    };

    let start = Instant::now();
    match stage {
        Stage::Lexer => {
            let tokens = pybench_baseline::tokenize(black_box(&source)).map_err(to_error)?;
            black_box(tokens);
        }
        Stage::Parser => {
            let program = pybench_baseline::parse(black_box(&source)).map_err(to_error)?;
            black_box(program);
        }
    }
    Ok(start.elapsed().as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_baseline_lexer_and_parser() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("1.py");
        fs::write(&file, "def f (x: int) -> int:\n    return x + 1\n").unwrap();

        assert!(measure_baseline(Stage::Lexer, &file).unwrap() >= 0.0);
        assert!(measure_baseline(Stage::Parser, &file).unwrap() >= 0.0);
    }

    #[test]
    fn test_baseline_reports_file_and_stage() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("10.py");
        fs::write(&file, "def f (:\n").unwrap();

        // the token stream is fine, the grammar is not
        assert!(measure_baseline(Stage::Lexer, &file).is_ok());
        match measure_baseline(Stage::Parser, &file) {
            Err(BenchError::Baseline { file, stage, .. }) => {
                assert_eq!(file, "10.py");
                assert_eq!(stage, "parser");
            }
            other => panic!("expected baseline error, got {other:?}"),
        }
    }

    #[test]
    fn test_baseline_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = measure_baseline(Stage::Lexer, &temp.path().join("nope.py"));
        assert!(matches!(result, Err(BenchError::Io { .. })));
    }
}
