//! Runtime value types for matching.
//!
//! [`Candidate`] is the view a [`Haystack`] exposes to the matcher, [`Needle`]
//! is the validated query, and [`Number`] carries numeric values for both.

use std::cmp::Ordering;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::normalize;
use crate::traits::Haystack;

/// Runtime view of a candidate value, borrowed from the source.
///
/// The matcher dispatches on this variant, never on the concrete Rust type.
///
/// # Example
///
/// ```
/// use fuzzy_predicate::{Candidate, Haystack, Key};
///
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// impl Haystack for User {
///     fn candidate(&self) -> Candidate<'_> {
///         Candidate::composite([
///             (Key::Name("name"), &self.name as &dyn Haystack),
///             (Key::Name("age"), &self.age as &dyn Haystack),
///         ])
///     }
/// }
/// ```
pub enum Candidate<'a> {
    /// Numeric value, compared by loose equality.
    Number(Number),
    /// Text value, compared after normalization.
    Text(&'a str),
    /// Keyed or indexed collection of nested values.
    Composite(Entries<'a>),
    /// Anything else (null, booleans, unit, ...). Never matches.
    Unsupported,
}

/// Iterator over the own entries of a composite candidate.
pub type Entries<'a> = Box<dyn Iterator<Item = (Key<'a>, &'a dyn Haystack)> + 'a>;

impl<'a> Candidate<'a> {
    /// Builds a composite candidate from any iterator of entries.
    pub fn composite<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Key<'a>, &'a dyn Haystack)>,
        I::IntoIter: 'a,
    {
        Candidate::Composite(Box::new(entries.into_iter()))
    }

    /// Builds a composite candidate from a sequence, keyed by position.
    pub fn indexed<T: Haystack + 'a>(items: &'a [T]) -> Self {
        Candidate::composite(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| (Key::Index(index), item as &dyn Haystack)),
        )
    }

    /// Returns the display name of this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Candidate::Number(_) => "number",
            Candidate::Text(_) => "text",
            Candidate::Composite(_) => "composite",
            Candidate::Unsupported => "unsupported",
        }
    }
}

impl fmt::Debug for Candidate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Candidate::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Candidate::Composite(_) => f.write_str("Composite(..)"),
            Candidate::Unsupported => f.write_str("Unsupported"),
        }
    }
}

/// Key of a composite entry.
///
/// Sequences are keyed by position; a key restriction matches an index
/// entry when it holds the index written in decimal (`"0"`, `"1"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key<'a> {
    /// Named field of a map or record.
    Name(&'a str),
    /// Position within a sequence.
    Index(usize),
}

impl Key<'_> {
    /// Returns `true` if this key appears in `names`.
    pub fn is_in(&self, names: &[String]) -> bool {
        match self {
            Key::Name(name) => names.iter().any(|n| n == name),
            Key::Index(index) => {
                let index = index.to_string();
                names.iter().any(|n| *n == index)
            }
        }
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Index(index) => write!(f, "{index}"),
        }
    }
}

/// The validated query a predicate searches for.
#[derive(Debug, Clone, PartialEq)]
pub enum Needle {
    /// Text query, matched as a normalized substring or by similarity.
    Text(String),
    /// Numeric query, matched by loose equality.
    Number(Number),
}

impl Needle {
    /// Returns `true` if this is a numeric NaN, which is never a valid query.
    pub fn is_nan(&self) -> bool {
        matches!(self, Needle::Number(n) if n.is_nan())
    }

    /// Returns the text this needle is compared with against text candidates.
    ///
    /// Text is normalized; numbers pass through in their canonical form.
    pub fn normalized(&self) -> String {
        match self {
            Needle::Text(text) => normalize(text),
            Needle::Number(n) => n.to_string(),
        }
    }

    /// Returns the number this needle is compared with against numeric candidates.
    ///
    /// Text is converted the way loose equality converts it, so `"42"`
    /// yields `42` and `"abc"` yields `None`.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Needle::Number(n) => Some(*n),
            Needle::Text(text) => parse_numeric_text(text).map(Number::F64),
        }
    }

    /// Returns the display name of this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Needle::Text(_) => "text",
            Needle::Number(_) => "number",
        }
    }
}

impl From<&str> for Needle {
    fn from(s: &str) -> Self {
        Needle::Text(s.to_string())
    }
}

impl From<String> for Needle {
    fn from(s: String) -> Self {
        Needle::Text(s)
    }
}

macro_rules! needle_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Needle {
                fn from(n: $t) -> Self {
                    Needle::Number(n.into())
                }
            }
        )*
    };
}

needle_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, Number);

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Comparisons between different numeric types convert to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `true` if this is a floating point NaN.
    pub fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// Numeric equality across representations. NaN equals nothing.
    pub fn loose_eq(self, other: Number) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

/// Canonical text form: integers without a fraction, `Infinity`, no `-0`.
///
/// Floats of magnitude `1e21` and above, or below `1e-6`, use exponent form
/// with an explicit sign (`1e+21`, `1.5e-7`).
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) if n.is_nan() => f.write_str("NaN"),
            Number::F64(n) if n.is_infinite() => {
                f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Number::F64(n) if n == 0.0 => f.write_str("0"),
            Number::F64(n) if !(1e-6..1e21).contains(&n.abs()) => {
                let text = format!("{n:e}");
                match text.split_once('e') {
                    Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                        write!(f, "{mantissa}e+{exponent}")
                    }
                    _ => f.write_str(&text),
                }
            }
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

macro_rules! number_from {
    ($variant:ident, $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64, i64: i8, i16, i32, i64, isize);
number_from!(U64, u64: u8, u16, u32, u64, usize);
number_from!(F64, f64: f32, f64);

static DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("decimal pattern is valid")
});

/// Converts text to a number the way loose equality does.
///
/// Surrounding whitespace is ignored and empty text is zero. Accepts signed
/// decimals with optional fraction and exponent, `0x`/`0o`/`0b` integer
/// literals, and `Infinity`. Returns `None` for anything else.
pub fn parse_numeric_text(text: &str) -> Option<f64> {
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if text.is_empty() {
        return Some(0.0);
    }

    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&text[2..], radix);
    }

    if DECIMAL.is_match(text) {
        text.parse().ok()
    } else {
        None
    }
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    })
}
