//! Function-definition corpora for parser throughput

use std::io::{self, Write};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{pick, CorpusGenerator, CorpusKind};
use crate::error::Result;
use crate::progression::SizeProgression;
use crate::templates::TEMPLATE_BANK;
use crate::vocabulary::IDENTIFIERS;

/// Types used for return values and parameters
pub const RETURN_TYPES: [&str; 3] = ["int", "float", "str"];

const PARAMS_PER_FUNCTION: usize = 3;
const MAX_BODIES_PER_FUNCTION: usize = 4;

/// Writes `size` function definitions per file. Sizes are always powers of
/// ten up to the order of magnitude of `max_function_count`.
#[derive(Debug, Clone)]
pub struct FunctionCorpusGenerator {
    pub max_function_count: u64,
}

impl FunctionCorpusGenerator {
    pub fn new(max_function_count: u64) -> Self {
        Self { max_function_count }
    }

    fn write_function(&self, index: u64, rng: &mut StdRng, out: &mut dyn Write) -> io::Result<()> {
        // The index suffix keeps names unique even though the pool repeats
        let name = pick(rng, &IDENTIFIERS).text;
        let return_type = pick(rng, &RETURN_TYPES);

        let names: Vec<&str> = IDENTIFIERS
            .choose_multiple(rng, PARAMS_PER_FUNCTION)
            .map(|lexeme| lexeme.text)
            .collect();
        let params = names
            .iter()
            .map(|param| format!("{param}: {}", pick(rng, &RETURN_TYPES)))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(out, "def {name}_{index} ({params}) -> {return_type}:")?;
        for _ in 0..rng.gen_range(1..=MAX_BODIES_PER_FUNCTION) {
            out.write_all(pick(rng, &TEMPLATE_BANK).source.as_bytes())?;
        }
        writeln!(out)
    }
}

impl CorpusGenerator for FunctionCorpusGenerator {
    fn kind(&self) -> CorpusKind {
        CorpusKind::FunctionCorpus
    }

    fn sizes(&self) -> Result<Vec<u64>> {
        SizeProgression::PowersOfTen.sizes(self.max_function_count)
    }

    fn write_content(&self, size: u64, rng: &mut StdRng, out: &mut dyn Write) -> io::Result<()> {
        for index in 0..size {
            self.write_function(index, rng, out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_signature_shape() {
        let generator = FunctionCorpusGenerator::new(10);
        let mut rng = StdRng::seed_from_u64(1);
        let mut out = Vec::new();
        generator.write_content(25, &mut rng, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let signatures: Vec<_> = text.lines().filter(|l| l.starts_with("def ")).collect();
        assert_eq!(signatures.len(), 25);

        for (index, line) in signatures.iter().enumerate() {
            let (head, rest) = line.split_once(" (").unwrap();
            assert!(head.ends_with(&format!("_{index}")), "{line}");

            let (params, ret) = rest.split_once(") -> ").unwrap();
            assert!(RETURN_TYPES.contains(&ret.trim_end_matches(':')));

            let names: Vec<_> = params
                .split(", ")
                .map(|p| p.split_once(": ").unwrap().0)
                .collect();
            assert_eq!(names.len(), 3);
            assert!(names[0] != names[1] && names[1] != names[2] && names[0] != names[2]);
        }
    }
}
