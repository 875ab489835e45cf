//! Similarity functions used when a threshold is set.
//!
//! The matcher only sees the [`Similarity`] trait. [`Metric`] covers the
//! built-in ratios from `strsim`; any `Fn(&str, &str) -> f64` closure works too.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ratio-based comparison of two normalized strings.
///
/// Implementations should return a value in `[0, 1]`: `1.0` for identical
/// inputs, `0.0` for completely dissimilar ones. They must be pure.
pub trait Similarity: Send + Sync {
    /// Returns the similarity ratio of `a` and `b`.
    fn ratio(&self, a: &str, b: &str) -> f64;
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f64 + Send + Sync,
{
    fn ratio(&self, a: &str, b: &str) -> f64 {
        self(a, b)
    }
}

/// Built-in similarity metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// Sørensen–Dice coefficient over character bigrams.
    #[default]
    SorensenDice,
    /// Jaro–Winkler similarity.
    JaroWinkler,
    /// Levenshtein distance normalized by the longer length.
    #[serde(alias = "normalized-levenshtein")]
    Levenshtein,
}

impl Metric {
    /// All built-in metrics.
    pub const ALL: [Metric; 3] = [Metric::SorensenDice, Metric::JaroWinkler, Metric::Levenshtein];

    /// Returns the display name of this metric.
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::SorensenDice => "sorensen-dice",
            Metric::JaroWinkler => "jaro-winkler",
            Metric::Levenshtein => "levenshtein",
        }
    }
}

impl Similarity for Metric {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        match self {
            Metric::SorensenDice => strsim::sorensen_dice(a, b),
            Metric::JaroWinkler => strsim::jaro_winkler(a, b),
            Metric::Levenshtein => strsim::normalized_levenshtein(a, b),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sorensen-dice" | "dice" => Ok(Metric::SorensenDice),
            "jaro-winkler" => Ok(Metric::JaroWinkler),
            "levenshtein" | "normalized-levenshtein" => Ok(Metric::Levenshtein),
            other => Err(format!(
                "unknown metric '{other}', expected one of: sorensen-dice, jaro-winkler, levenshtein"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_score_one() {
        for metric in Metric::ALL {
            assert_eq!(metric.ratio("johndoe", "johndoe"), 1.0, "{metric}");
        }
    }

    #[test]
    fn dissimilar_inputs_score_low() {
        assert_eq!(Metric::SorensenDice.ratio("abc", "xyz"), 0.0);
        assert!(Metric::Levenshtein.ratio("abc", "xyz") < 0.01);
    }

    #[test]
    fn dice_is_symmetric() {
        let ab = Metric::SorensenDice.ratio("healed", "sealed");
        let ba = Metric::SorensenDice.ratio("sealed", "healed");
        assert_eq!(ab, ba);
        assert!((ab - 0.8).abs() < 1e-9);
    }

    #[test]
    fn closures_are_similarity_functions() {
        let exact = |a: &str, b: &str| if a == b { 1.0 } else { 0.0 };
        assert_eq!(exact.ratio("a", "a"), 1.0);
        assert_eq!(exact.ratio("a", "b"), 0.0);
    }

    #[test]
    fn metric_parse_and_display() {
        for metric in Metric::ALL {
            assert_eq!(metric.as_str().parse::<Metric>(), Ok(metric));
        }
        assert_eq!("dice".parse::<Metric>(), Ok(Metric::SorensenDice));
        assert!("soundex".parse::<Metric>().is_err());
    }
}
