//! Text normalization applied before every textual comparison.

use once_cell::sync::Lazy;
use regex::Regex;

// Runs after lower-casing, so only ASCII letters and digits are left.
static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("normalization pattern is valid"));

/// Lower-cases `text` and removes every character that is not an ASCII letter
/// or digit.
///
/// Spacing, punctuation, brackets and underscores all disappear, so
/// `"DOE, JOHN"` becomes `"doejohn"`. Accented and other non-ASCII characters
/// are removed too: `"Élodie"` becomes `"lodie"`. Normalizing twice is a no-op.
///
/// ```
/// use fuzzy_predicate::normalize;
///
/// assert_eq!(normalize("I-Would_eat!FOOD*42"), "iwouldeatfood42");
/// ```
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    NON_ALPHANUMERIC.replace_all(&lower, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_spacing_punctuation_and_case() {
        assert_eq!(normalize("John Doe"), "johndoe");
        assert_eq!(normalize("JOHN_DOE"), "johndoe");
        assert_eq!(normalize("john-doe"), "johndoe");
        assert_eq!(normalize("DOE, JOHN"), "doejohn");
        assert_eq!(normalize("per{day}"), "perday");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(normalize("4JOHN2DOE!"), "4john2doe");
        assert_eq!(normalize("is 42"), "is42");
    }

    #[test]
    fn empty_and_symbol_only_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" -_!? "), "");
    }

    #[test]
    fn strips_non_ascii_characters() {
        assert_eq!(normalize("Élodie"), "lodie");
        assert_eq!(normalize("Élodie Ünal"), "lodienal");
        assert_eq!(normalize("東京 2020"), "2020");
        assert_eq!(normalize("東京"), "");
    }

    #[test]
    fn idempotent() {
        for s in ["John Doe", "DOE, JOHN", "I-Would_eat!FOOD*42/times+per{day}"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }
}
