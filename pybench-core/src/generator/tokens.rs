//! Flat token streams for lexer throughput

use std::io::{self, Write};

use rand::rngs::StdRng;

use super::{pick, CorpusGenerator, CorpusKind};
use crate::error::Result;
use crate::progression::SizeProgression;
use crate::vocabulary::ALL_LEXEMES;

/// Writes `size` space-separated lexemes per file, sampled uniformly with
/// replacement from the whole vocabulary. No grammar is enforced.
#[derive(Debug, Clone)]
pub struct TokenStreamGenerator {
    pub max_word_count: u64,
    pub multiplier: u64,
}

impl TokenStreamGenerator {
    pub fn new(max_word_count: u64, multiplier: u64) -> Self {
        Self {
            max_word_count,
            multiplier,
        }
    }
}

impl CorpusGenerator for TokenStreamGenerator {
    fn kind(&self) -> CorpusKind {
        CorpusKind::TokenStream
    }

    fn sizes(&self) -> Result<Vec<u64>> {
        SizeProgression::geometric(self.multiplier)?.sizes(self.max_word_count)
    }

    fn write_content(&self, size: u64, rng: &mut StdRng, out: &mut dyn Write) -> io::Result<()> {
        for _ in 0..size {
            let lexeme = pick(rng, ALL_LEXEMES.as_slice());
            out.write_all(lexeme.text.as_bytes())?;
            out.write_all(b" ")?;
        }
        Ok(())
    }
}
