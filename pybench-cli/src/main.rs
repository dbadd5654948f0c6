//! pybench CLI - corpus generator and front-end benchmark harness

use anyhow::Result;
use clap::{Parser, Subcommand};
use pybench_core::{GeneratorOptions, LogFormat, RunnerConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

mod commands;
mod config;

use commands::generate::GenerateArgs;
use commands::run::RunArgs;

#[derive(Parser)]
#[command(name = "pybench")]
#[command(about = "Generate synthetic corpora and time compiler front ends", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate lexer and/or parser test corpora
    Generate {
        /// Output directory
        #[arg(long, default_value = "test_files")]
        output: PathBuf,

        /// Generate flat token streams
        #[arg(long)]
        lexer: bool,

        /// Maximum words in a token-stream file
        #[arg(long)]
        max_word_count: Option<u64>,

        /// Growth factor between token-stream files (2-10)
        #[arg(long)]
        words_multiplier: Option<u64>,

        /// Generate function-definition corpora
        #[arg(long)]
        parser: bool,

        /// Maximum function definitions in a parser file
        #[arg(long)]
        max_function_count: Option<u64>,

        /// Random seed
        #[arg(long, env = "PYBENCH_SEED")]
        seed: Option<u64>,

        /// File extension without the dot
        #[arg(long)]
        extension: Option<String>,
    },

    /// Time the selected backends and write result_times.csv
    Run {
        /// Time the in-process baseline lexer
        #[arg(long)]
        baseline_lexer: bool,

        /// Time the compiler's lexer stage
        #[arg(long)]
        lexer: bool,

        /// Token-stream corpus directory
        #[arg(long, default_value = "test_files/lexer_test_files")]
        lexer_test_files: PathBuf,

        /// Time the in-process baseline parser
        #[arg(long)]
        baseline_parser: bool,

        /// Time the compiler's parser stage
        #[arg(long)]
        parser: bool,

        /// Function corpus directory; when both stages run it must hold the
        /// same file names as the token-stream corpus
        #[arg(long, default_value = "test_files/parser_test_files")]
        parser_test_files: PathBuf,

        /// Output folder
        #[arg(short, long, default_value = "results")]
        output: PathBuf,

        /// Compiler executable
        #[arg(long, env = "PYBENCH_COMPILER")]
        compiler: Option<PathBuf>,

        /// Per-invocation timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Timing log format (text or json)
        #[arg(long)]
        log_format: Option<LogFormat>,

        /// Corpus file extension without the dot
        #[arg(long)]
        extension: Option<String>,

        /// Also write result_times.json
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            output,
            lexer,
            max_word_count,
            words_multiplier,
            parser,
            max_function_count,
            seed,
            extension,
        } => {
            let defaults = config.generate;
            commands::generate::generate(GenerateArgs {
                output,
                lexer,
                parser,
                max_word_count: max_word_count.unwrap_or(defaults.max_word_count),
                words_multiplier: words_multiplier.unwrap_or(defaults.words_multiplier),
                max_function_count: max_function_count.unwrap_or(defaults.max_function_count),
                options: GeneratorOptions {
                    seed: seed.unwrap_or(defaults.seed),
                    extension: extension.unwrap_or(defaults.extension),
                },
            })?;
        }

        Commands::Run {
            baseline_lexer,
            lexer,
            lexer_test_files,
            baseline_parser,
            parser,
            parser_test_files,
            output,
            compiler,
            timeout,
            log_format,
            extension,
            json,
        } => {
            let defaults = config.run;
            let runner = RunnerConfig {
                compiler: compiler.unwrap_or(defaults.compiler),
                log_dir: output.join(commands::run::LOG_DIR),
                timeout: Duration::from_secs(timeout.unwrap_or(defaults.timeout_secs)),
                log_format: log_format.unwrap_or(defaults.log_format),
            };
            commands::run::run(RunArgs {
                baseline_lexer,
                lexer,
                lexer_test_files,
                baseline_parser,
                parser,
                parser_test_files,
                output,
                extension: extension.unwrap_or(defaults.extension),
                json,
                runner,
            })
            .await?;
        }
    }

    Ok(())
}
