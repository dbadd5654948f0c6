//! Generate benchmark corpora

use anyhow::{bail, Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use pybench_core::{
    CorpusGenerator, CorpusKind, FunctionCorpusGenerator, GeneratedFile, GeneratorOptions,
    TokenStreamGenerator,
};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Resolved settings for one `pybench generate` call
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub output: PathBuf,
    pub lexer: bool,
    pub parser: bool,
    pub max_word_count: u64,
    pub words_multiplier: u64,
    pub max_function_count: u64,
    pub options: GeneratorOptions,
}

pub fn generate(args: GenerateArgs) -> Result<()> {
    if !args.lexer && !args.parser {
        bail!("Nothing to generate: pass --lexer and/or --parser");
    }

    let start = Instant::now();
    println!("{} pybench generate", "→".blue().bold());
    println!("  Output: {}", args.output.display());
    println!("  Seed: {}", args.options.seed);

    // Validate every size argument before touching the disk
    let lexer = TokenStreamGenerator::new(args.max_word_count, args.words_multiplier);
    let parser = FunctionCorpusGenerator::new(args.max_function_count);
    if args.lexer {
        lexer.sizes().context("Invalid lexer corpus arguments")?;
    }
    if args.parser {
        parser.sizes().context("Invalid parser corpus arguments")?;
    }

    let mut written = Vec::new();
    if args.lexer {
        written.extend(run_generator(&lexer, &args.output, &args.options)?);
    }
    if args.parser {
        written.extend(run_generator(&parser, &args.output, &args.options)?);
    }

    println!(
        "\n{} Generated {} files in {:.2}s",
        "✓".green().bold(),
        written.len(),
        start.elapsed().as_secs_f64()
    );
    for kind in [CorpusKind::TokenStream, CorpusKind::FunctionCorpus] {
        let sizes: Vec<String> = written
            .iter()
            .filter(|file| file.kind == kind)
            .map(|file| file.size.to_string())
            .collect();
        if !sizes.is_empty() {
            println!("  {}: {}", kind.dir_name().bold(), sizes.join(", "));
        }
    }

    Ok(())
}

fn run_generator<G: CorpusGenerator>(
    generator: &G,
    output: &Path,
    options: &GeneratorOptions,
) -> Result<Vec<GeneratedFile>> {
    let kind = generator.kind();
    let dir = output.join(kind.dir_name());
    let sizes = generator.sizes()?;

    let pb = ProgressBar::new(sizes.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Writing {}", kind.dir_name()));

    let generated = generator
        .generate_with(&dir, options, |file| {
            pb.inc(1);
            pb.set_message(format!("Wrote {}", file.path.display()));
        })
        .with_context(|| format!("Failed to generate {}", dir.display()))?;

    pb.finish_with_message(format!("{} ready", kind.dir_name()));
    Ok(generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(output: PathBuf) -> GenerateArgs {
        GenerateArgs {
            output,
            lexer: true,
            parser: true,
            max_word_count: 100,
            words_multiplier: 10,
            max_function_count: 10,
            options: GeneratorOptions::default(),
        }
    }

    #[test]
    fn test_generates_both_corpora() {
        let temp = TempDir::new().unwrap();
        generate(args(temp.path().to_path_buf())).unwrap();

        assert!(temp.path().join("lexer_test_files/100.py").is_file());
        assert!(temp.path().join("parser_test_files/10.py").is_file());
        assert!(!temp.path().join("parser_test_files/100.py").exists());
    }

    #[test]
    fn test_bad_parser_argument_writes_no_lexer_files() {
        let temp = TempDir::new().unwrap();
        let mut args = args(temp.path().to_path_buf());
        args.max_function_count = 0;

        assert!(generate(args).is_err());
        assert!(!temp.path().join("lexer_test_files").exists());
    }

    #[test]
    fn test_nothing_selected() {
        let temp = TempDir::new().unwrap();
        let mut args = args(temp.path().to_path_buf());
        args.lexer = false;
        args.parser = false;
        assert!(generate(args).is_err());
    }
}
