//! Corpus generators
//!
//! A generator expands a maximum size into size points and writes one file
//! per point. Randomness comes from a seeded `StdRng` per file, so a given
//! (seed, size) pair always yields the same file.

mod functions;
mod tokens;

pub use functions::{FunctionCorpusGenerator, RETURN_TYPES};
pub use tokens::TokenStreamGenerator;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::{BenchError, Result};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_EXTENSION: &str = "py";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CorpusKind {
    TokenStream,
    FunctionCorpus,
}

impl CorpusKind {
    /// Subdirectory of the output directory holding this corpus
    pub fn dir_name(&self) -> &'static str {
        match self {
            CorpusKind::TokenStream => "lexer_test_files",
            CorpusKind::FunctionCorpus => "parser_test_files",
        }
    }
}

/// A corpus file written by a generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub size: u64,
    pub kind: CorpusKind,
}

#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub seed: u64,
    /// File extension without the leading dot
    pub extension: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

pub trait CorpusGenerator {
    fn kind(&self) -> CorpusKind;

    /// Size points this generator will write, smallest first
    fn sizes(&self) -> Result<Vec<u64>>;

    /// Write the content of one file of `size` units
    fn write_content(&self, size: u64, rng: &mut StdRng, out: &mut dyn Write) -> io::Result<()>;

    fn generate(&self, dir: &Path, options: &GeneratorOptions) -> Result<Vec<GeneratedFile>> {
        self.generate_with(dir, options, |_| {})
    }

    /// Like [`CorpusGenerator::generate`], calling `on_file` after each file is written
    fn generate_with<F>(
        &self,
        dir: &Path,
        options: &GeneratorOptions,
        mut on_file: F,
    ) -> Result<Vec<GeneratedFile>>
    where
        F: FnMut(&GeneratedFile),
    {
        let sizes = self.sizes()?;
        fs::create_dir_all(dir).map_err(|e| BenchError::io(dir, e))?;

        let mut generated = Vec::with_capacity(sizes.len());
        for size in sizes {
            let path = dir.join(format!("{size}.{}", options.extension));
            debug!("Writing {} ({size} units)", path.display());

            let mut rng = file_rng(options.seed, size);
            let file = File::create(&path).map_err(|e| BenchError::io(&path, e))?;
            let mut out = BufWriter::new(file);
            self.write_content(size, &mut rng, &mut out)
                .and_then(|()| out.flush())
                .map_err(|e| BenchError::io(&path, e))?;

            let file = GeneratedFile {
                path,
                size,
                kind: self.kind(),
            };
            on_file(&file);
            generated.push(file);
        }

        info!(
            "Generated {} {:?} files in {}",
            generated.len(),
            self.kind(),
            dir.display()
        );
        Ok(generated)
    }
}

fn file_rng(seed: u64, size: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ size.rotate_left(32))
}

/// Uniform choice from a non-empty constant table
fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}
