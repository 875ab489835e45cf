//! Declarative predicate configuration.
//!
//! [`MatchConfig`] spells out every setting by name, so it can be stored in
//! YAML or JSON files and validated into a [`FuzzyPredicate`].

use serde::{Deserialize, Serialize};

use crate::args::Arg;
use crate::error::{PredicateError, Result};
use crate::matcher::DEFAULT_MAX_DEPTH;
use crate::predicate::{FuzzyPredicate, PredicateBuilder};
use crate::similarity::Metric;
use crate::value::Needle;

/// Predicate settings, as found in a config file.
///
/// ```yaml
/// query: john doe
/// keys: [name, email]
/// threshold: 0.8
/// metric: jaro-winkler
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchConfig {
    /// Text or number to search for. Required, but missing values are
    /// reported by [`MatchConfig::build`] rather than by deserialization.
    #[serde(default)]
    pub query: serde_json::Value,
    /// Key restriction: one key or a list of keys.
    #[serde(default, skip_serializing_if = "KeySpec::is_empty")]
    pub keys: KeySpec,
    /// Similarity threshold; switches text matching to similarity mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// Similarity metric used with a threshold.
    #[serde(default)]
    pub metric: Metric,
    /// Maximum number of composite levels searched.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            query: serde_json::Value::Null,
            keys: KeySpec::default(),
            threshold: None,
            metric: Metric::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// One key or a list of keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeySpec {
    /// A single key.
    One(String),
    /// Any number of keys.
    Many(Vec<String>),
}

impl Default for KeySpec {
    fn default() -> Self {
        KeySpec::Many(Vec::new())
    }
}

impl KeySpec {
    /// Returns `true` if no key is named.
    pub fn is_empty(&self) -> bool {
        matches!(self, KeySpec::Many(keys) if keys.is_empty())
    }

    /// Returns the named keys.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            KeySpec::One(key) => vec![key],
            KeySpec::Many(keys) => keys,
        }
    }
}

impl MatchConfig {
    /// Parses a config from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a config from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the config into a predicate.
    ///
    /// # Errors
    ///
    /// [`PredicateError::InvalidQuery`] if `query` is missing or not a
    /// string or number.
    pub fn build(self) -> Result<FuzzyPredicate> {
        self.into_builder()?.build()
    }

    /// Validates the query and returns a builder for further adjustment.
    pub fn into_builder(self) -> Result<PredicateBuilder> {
        let query = match Arg::from(self.query) {
            Arg::Text(text) => Needle::Text(text),
            Arg::Number(n) => Needle::Number(n),
            other => {
                return Err(PredicateError::InvalidQuery {
                    found: other.kind(),
                })
            }
        };

        Ok(PredicateBuilder::new(query)
            .keys(self.keys.into_vec())
            .maybe_threshold(self.threshold)
            .metric(self.metric)
            .max_depth(self.max_depth))
    }
}
