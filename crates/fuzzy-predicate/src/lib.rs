//! Fuzzy predicate - reusable "fuzzily contains" tests for heterogeneous values.
//!
//! A [`FuzzyPredicate`] decides whether a value contains a query. It is built
//! once and applied to many candidates: strings, numbers, JSON documents,
//! maps, sequences, or your own records.
//!
//! - **Text** matches when it contains the query, ignoring case, spacing and
//!   punctuation. With a threshold, it matches when the similarity ratio of
//!   the two normalized strings reaches the threshold.
//! - **Numbers** match exactly, also against a numeric text query (`"42"`).
//! - **Composites** (maps, records, sequences) match when any of their
//!   values matches, optionally only values under the given keys.
//! - **Anything else** (null, booleans) never matches.
//!
//! # Quick Start
//!
//! ```rust
//! use fuzzy_predicate::{fuzzy, Arg};
//! use serde_json::json;
//!
//! let people = vec![
//!     json!({"id": "abc123", "name": "Foo Bar", "age": 42}),
//!     json!({"id": "abc420", "name": "John Doe", "age": 1234}),
//!     json!("john-doe"),
//!     json!(42),
//! ];
//!
//! let predicate = fuzzy("John Doe", Arg::Absent, None).unwrap();
//! let found = predicate.filter(&people);
//! assert_eq!(found, [&people[1], &people[2]]);
//!
//! // Key restrictions only apply inside composites.
//! let by_age = fuzzy(42, "age", None).unwrap();
//! assert_eq!(by_age.filter(&people), [&people[0], &people[3]]);
//! ```
//!
//! # Construction
//!
//! | Surface | Use |
//! |---------|-----|
//! | [`fuzzy`] | Runtime-shaped arguments; a number in the keys position is the threshold |
//! | [`FuzzyPredicate::builder`] | Named settings: keys, threshold, metric, depth limit |
//! | [`MatchConfig`] | Settings loaded from YAML or JSON |
//!
//! Construction is the only step that can fail ([`PredicateError`]).
//! Matching is total.
//!
//! # Thresholds
//!
//! A threshold of `0` (or NaN) leaves the predicate in substring mode.

mod args;
mod config;
mod error;
mod matcher;
mod normalize;
mod predicate;
mod similarity;
mod traits;
mod value;

// Re-export public API
pub use args::{fuzzy, Arg};
pub use config::{KeySpec, MatchConfig};
pub use error::{PredicateError, Result};
pub use matcher::{Matcher, DEFAULT_MAX_DEPTH};
pub use normalize::normalize;
pub use predicate::{FuzzyPredicate, PredicateBuilder};
pub use similarity::{Metric, Similarity};
pub use traits::Haystack;
pub use value::{parse_numeric_text, Candidate, Entries, Key, Needle, Number};
