//! Size progressions: one target size per generated file

use crate::error::{BenchError, Result};

/// How a maximum-size argument expands into size points.
///
/// Both variants produce `digits(max)` points starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeProgression {
    /// `multiplier^0, multiplier^1, ...` (token streams)
    Geometric { multiplier: u64 },
    /// `10^0, 10^1, ...` (function corpora)
    PowersOfTen,
}

impl SizeProgression {
    pub fn geometric(multiplier: u64) -> Result<Self> {
        if !(2..=10).contains(&multiplier) {
            return Err(BenchError::InvalidProgression {
                message: format!("multiplier must be between 2 and 10, got {multiplier}"),
            });
        }
        Ok(SizeProgression::Geometric { multiplier })
    }

    fn base(&self) -> u64 {
        match self {
            SizeProgression::Geometric { multiplier } => *multiplier,
            SizeProgression::PowersOfTen => 10,
        }
    }

    /// Expand `max` into strictly increasing size points, all `<= max`.
    pub fn sizes(&self, max: u64) -> Result<Vec<u64>> {
        if max == 0 {
            return Err(BenchError::InvalidProgression {
                message: "maximum size must be at least 1".to_string(),
            });
        }

        let base = self.base();
        if !(2..=10).contains(&base) {
            return Err(BenchError::InvalidProgression {
                message: format!("multiplier must be between 2 and 10, got {base}"),
            });
        }

        // base <= 10 keeps base^(digits-1) <= 10^(digits-1) <= max
        let mut sizes = Vec::with_capacity(digit_count(max) as usize);
        let mut size = 1u64;
        for _ in 0..digit_count(max) {
            sizes.push(size);
            size = size.saturating_mul(base);
        }
        Ok(sizes)
    }
}

/// Number of decimal digits in `n`
pub fn digit_count(n: u64) -> u32 {
    n.checked_ilog10().map_or(1, |log| log + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(999), 3);
        assert_eq!(digit_count(1_000_000), 7);
        assert_eq!(digit_count(u64::MAX), 20);
    }

    #[test]
    fn test_geometric_sizes() {
        let progression = SizeProgression::geometric(10).unwrap();
        assert_eq!(progression.sizes(1000).unwrap(), vec![1, 10, 100, 1000]);

        let progression = SizeProgression::geometric(2).unwrap();
        assert_eq!(progression.sizes(999).unwrap(), vec![1, 2, 4]);
    }

    #[test]
    fn test_powers_of_ten_ignore_multiplier() {
        let sizes = SizeProgression::PowersOfTen.sizes(100).unwrap();
        assert_eq!(sizes, vec![1, 10, 100]);

        let sizes = SizeProgression::PowersOfTen.sizes(99_999).unwrap();
        assert_eq!(sizes, vec![1, 10, 100, 1_000, 10_000]);
    }

    #[test]
    fn test_sizes_never_exceed_maximum() {
        for multiplier in 2..=10 {
            let progression = SizeProgression::geometric(multiplier).unwrap();
            for max in [1, 7, 10, 11, 100, 12_345, 1_000_000] {
                let sizes = progression.sizes(max).unwrap();
                assert_eq!(sizes.len() as u32, digit_count(max));
                assert_eq!(sizes[0], 1);
                assert!(sizes.windows(2).all(|pair| pair[0] < pair[1]));
                assert!(*sizes.last().unwrap() <= max);
            }
        }
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(SizeProgression::geometric(1).is_err());
        assert!(SizeProgression::geometric(11).is_err());
        assert!(SizeProgression::PowersOfTen.sizes(0).is_err());
        // bypassing the constructor is caught at expansion time
        assert!(SizeProgression::Geometric { multiplier: 20 }.sizes(1000).is_err());
    }
}
