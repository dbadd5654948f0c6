//! Configuration file handling for the pybench CLI

use anyhow::{Context, Result};
use pybench_core::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub generate: GenerateConfig,

    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default = "default_max_word_count")]
    pub max_word_count: u64,

    #[serde(default = "default_words_multiplier")]
    pub words_multiplier: u64,

    #[serde(default = "default_max_function_count")]
    pub max_function_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_compiler")]
    pub compiler: PathBuf,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            extension: default_extension(),
            max_word_count: default_max_word_count(),
            words_multiplier: default_words_multiplier(),
            max_function_count: default_max_function_count(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            compiler: default_compiler(),
            timeout_secs: default_timeout_secs(),
            log_format: LogFormat::default(),
            extension: default_extension(),
        }
    }
}

fn default_seed() -> u64 { pybench_core::generator::DEFAULT_SEED }
fn default_extension() -> String { pybench_core::generator::DEFAULT_EXTENSION.to_string() }
fn default_max_word_count() -> u64 { 1_000_000 }
fn default_words_multiplier() -> u64 { 10 }
fn default_max_function_count() -> u64 { 100_000 }
fn default_compiler() -> PathBuf { PathBuf::from(pybench_core::runner::DEFAULT_COMPILER) }
fn default_timeout_secs() -> u64 { pybench_core::runner::DEFAULT_TIMEOUT.as_secs() }

/// Load configuration from `path`, else `~/.pybench/config.toml`, else defaults
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return read_config(path);
    }

    match dirs::home_dir() {
        Some(home) => {
            let default_path = home.join(".pybench").join("config.toml");
            if default_path.exists() {
                read_config(&default_path)
            } else {
                Ok(Config::default())
            }
        }
        None => Ok(Config::default()),
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[generate]\nseed = 7\n\n[run]\ntimeout_secs = 5\nlog_format = \"json\"\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.generate.seed, 7);
        assert_eq!(config.generate.words_multiplier, 10);
        assert_eq!(config.generate.extension, "py");
        assert_eq!(config.run.timeout_secs, 5);
        assert_eq!(config.run.log_format, LogFormat::Json);
        assert_eq!(config.run.compiler, default_compiler());
    }

    #[test]
    fn test_empty_file_is_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.generate.max_word_count, 1_000_000);
        assert_eq!(config.generate.max_function_count, 100_000);
        assert_eq!(config.run.timeout_secs, 300);
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[run]\nlog_format = \"xml\"\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(load_config(Some(&temp.path().join("absent.toml"))).is_err());
    }
}
