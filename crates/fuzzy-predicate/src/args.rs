//! Loosely-typed construction: [`fuzzy`] and its [`Arg`] values.
//!
//! This surface accepts arguments whose shape is only known at runtime (for
//! example, values decoded from JSON) and sniffs the second argument to
//! decide whether it is a key restriction or a threshold.

use crate::error::{PredicateError, Result};
use crate::predicate::{FuzzyPredicate, PredicateBuilder};
use crate::value::{Needle, Number};

/// A dynamically-shaped argument to [`fuzzy`].
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Argument not supplied.
    Absent,
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number, possibly NaN.
    Number(Number),
    /// Text.
    Text(String),
    /// Sequence of arguments.
    List(Vec<Arg>),
    /// Key-value record.
    Map(Vec<(String, Arg)>),
}

impl Arg {
    /// Returns the display name of this argument's shape.
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Absent => "nothing",
            Arg::Null => "null",
            Arg::Bool(_) => "a boolean",
            Arg::Number(n) if n.is_nan() => "NaN",
            Arg::Number(_) => "a number",
            Arg::Text(_) => "a string",
            Arg::List(_) => "a list",
            Arg::Map(_) => "a map",
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

macro_rules! arg_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Arg {
                fn from(n: $t) -> Self {
                    Arg::Number(n.into())
                }
            }
        )*
    };
}

arg_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, Number);

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(items: Vec<T>) -> Self {
        Arg::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Arg>, const N: usize> From<[T; N]> for Arg {
    fn from(items: [T; N]) -> Self {
        Arg::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Arg::Absent, Into::into)
    }
}

impl From<serde_json::Value> for Arg {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Arg::Null,
            serde_json::Value::Bool(b) => Arg::Bool(b),
            serde_json::Value::Number(n) => Arg::Number((&n).into()),
            serde_json::Value::String(s) => Arg::Text(s),
            serde_json::Value::Array(items) => {
                Arg::List(items.into_iter().map(Arg::from).collect())
            }
            serde_json::Value::Object(map) => {
                Arg::Map(map.into_iter().map(|(k, v)| (k, Arg::from(v))).collect())
            }
        }
    }
}

impl From<&serde_json::Value> for Arg {
    fn from(value: &serde_json::Value) -> Self {
        Arg::from(value.clone())
    }
}

/// Builds a predicate from loosely-typed arguments.
///
/// - `query` must be text or a non-NaN number.
/// - `keys_or_threshold` may be absent, a key name, a list of key names, or
///   a number. A number is taken as the threshold and overrides `threshold`.
/// - `threshold` is accepted as-is.
///
/// # Errors
///
/// [`PredicateError::InvalidQuery`] for a bad query and
/// [`PredicateError::InvalidKeys`] for a bad second argument.
///
/// # Example
///
/// ```
/// use fuzzy_predicate::{fuzzy, Arg, PredicateError};
/// use serde_json::json;
///
/// let records = vec![
///     json!({"id": "abc123", "name": "Foo Bar", "age": 42}),
///     json!({"bar": "foo"}),
/// ];
///
/// let by_name = fuzzy("foo", "name", None).unwrap();
/// assert_eq!(by_name.count(&records), 1);
///
/// let by_ratio = fuzzy("foo bra", 0.5, None).unwrap();
/// assert!(by_ratio.uses_similarity());
///
/// assert!(matches!(
///     fuzzy(Arg::Map(vec![]), Arg::Absent, None),
///     Err(PredicateError::InvalidQuery { .. })
/// ));
/// ```
pub fn fuzzy(
    query: impl Into<Arg>,
    keys_or_threshold: impl Into<Arg>,
    threshold: Option<f64>,
) -> Result<FuzzyPredicate> {
    let query = needle_from(query.into())?;
    let (keys, threshold) = match keys_or_threshold.into() {
        Arg::Absent => (Vec::new(), threshold),
        Arg::Text(key) => (vec![key], threshold),
        Arg::Number(n) if !n.is_nan() => (Vec::new(), Some(n.to_f64())),
        Arg::List(items) => (key_names(items)?, threshold),
        other => {
            return Err(PredicateError::InvalidKeys {
                found: other.kind(),
            })
        }
    };

    PredicateBuilder::new(query)
        .keys(keys)
        .maybe_threshold(threshold)
        .build()
}

fn needle_from(arg: Arg) -> Result<Needle> {
    match arg {
        Arg::Text(text) => Ok(Needle::Text(text)),
        Arg::Number(n) if !n.is_nan() => Ok(Needle::Number(n)),
        other => Err(PredicateError::InvalidQuery {
            found: other.kind(),
        }),
    }
}

fn key_names(items: Vec<Arg>) -> Result<Vec<String>> {
    items
        .into_iter()
        .map(|item| match item {
            Arg::Text(key) => Ok(key),
            other => Err(PredicateError::InvalidKeys {
                found: other.kind(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invalid_query(result: Result<FuzzyPredicate>) -> bool {
        matches!(result, Err(PredicateError::InvalidQuery { .. }))
    }

    fn invalid_keys(result: Result<FuzzyPredicate>) -> bool {
        matches!(result, Err(PredicateError::InvalidKeys { .. }))
    }

    #[test]
    fn query_must_be_text_or_number() {
        assert!(fuzzy("valid query", Arg::Absent, None).is_ok());
        assert!(fuzzy(42, Arg::Absent, None).is_ok());
        assert!(fuzzy(4.5, Arg::Absent, None).is_ok());

        assert!(invalid_query(fuzzy(Arg::List(vec![]), Arg::Absent, None)));
        assert!(invalid_query(fuzzy(Arg::Map(vec![]), Arg::Absent, None)));
        assert!(invalid_query(fuzzy(f64::NAN, Arg::Absent, None)));
        assert!(invalid_query(fuzzy(Arg::Absent, Arg::Absent, None)));
        assert!(invalid_query(fuzzy(Arg::Null, Arg::Absent, None)));
        assert!(invalid_query(fuzzy(true, Arg::Absent, None)));
    }

    #[test]
    fn keys_must_be_text_list_or_threshold() {
        assert!(fuzzy("anything", "string", None).is_ok());
        assert!(fuzzy("anything", ["array", "of", "string"], None).is_ok());
        assert!(fuzzy("anything", 42, None).is_ok());

        assert!(invalid_keys(fuzzy("anything", Arg::Map(vec![]), None)));
        assert!(invalid_keys(fuzzy("anything", f64::NAN, None)));
        assert!(invalid_keys(fuzzy("anything", Arg::Null, None)));
        assert!(invalid_keys(fuzzy("anything", false, None)));
        assert!(invalid_keys(fuzzy("anything", Arg::List(vec![1.into()]), None)));
    }

    #[test]
    fn query_error_wins_over_keys_error() {
        assert!(invalid_query(fuzzy(f64::NAN, Arg::Map(vec![]), None)));
    }

    #[test]
    fn number_in_keys_position_is_the_threshold() {
        let shorthand = fuzzy("x", 42, None).unwrap();
        let explicit = fuzzy("x", Arg::List(vec![]), Some(42.0)).unwrap();
        assert_eq!(shorthand.keys(), explicit.keys());
        assert_eq!(shorthand.threshold(), explicit.threshold());

        let overridden = fuzzy("x", 0.5, Some(0.9)).unwrap();
        assert_eq!(overridden.threshold(), Some(0.5));
    }

    #[test]
    fn single_key_becomes_singleton() {
        let predicate = fuzzy("x", "name", Some(0.7)).unwrap();
        assert_eq!(predicate.keys(), ["name"]);
        assert_eq!(predicate.threshold(), Some(0.7));
    }

    #[test]
    fn duplicate_keys_are_kept() {
        let predicate = fuzzy("x", vec!["a", "a"], None).unwrap();
        assert_eq!(predicate.keys(), ["a", "a"]);
    }

    #[test]
    fn json_arguments() {
        assert!(fuzzy(json!("x"), json!(["k", "j"]), None).is_ok());
        assert!(fuzzy(json!(5), json!("k"), None).is_ok());
        assert!(invalid_query(fuzzy(json!([]), Arg::Absent, None)));
        assert!(invalid_query(fuzzy(json!({}), Arg::Absent, None)));
        assert!(invalid_keys(fuzzy(json!("x"), json!({}), None)));
    }

    #[test]
    fn option_arguments() {
        assert!(fuzzy("x", None::<&str>, None).unwrap().keys().is_empty());
        assert_eq!(fuzzy("x", Some("k"), None).unwrap().keys(), ["k"]);
    }

    #[test]
    fn error_messages_name_the_shape() {
        let err = fuzzy(Arg::Map(vec![]), Arg::Absent, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "the query is required and must be a string or number, found a map"
        );

        let err = fuzzy("x", f64::NAN, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "keys should either be a list of strings or a single string, found NaN"
        );
    }
}
