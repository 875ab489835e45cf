//! Predicate builder and executor.
//!
//! [`PredicateBuilder`] validates the query and captures the key restriction,
//! threshold and similarity function. [`FuzzyPredicate`] is the result: a
//! reusable, stateless test plus helpers for running it over collections.

use std::sync::Arc;

use tracing::debug;

use crate::error::{PredicateError, Result};
use crate::matcher::{Matcher, DEFAULT_MAX_DEPTH};
use crate::similarity::{Metric, Similarity};
use crate::traits::Haystack;
use crate::value::Needle;

/// Builder for a [`FuzzyPredicate`] with explicit, named settings.
///
/// # Example
///
/// ```
/// use fuzzy_predicate::{FuzzyPredicate, Metric};
/// use serde_json::json;
///
/// let predicate = FuzzyPredicate::builder("jon doe")
///     .key("name")
///     .threshold(0.8)
///     .metric(Metric::JaroWinkler)
///     .build()
///     .unwrap();
///
/// assert!(predicate.matches(&json!({"name": "John Doe"})));
/// ```
#[derive(Clone)]
pub struct PredicateBuilder {
    query: Needle,
    keys: Vec<String>,
    threshold: Option<f64>,
    metric: Option<Metric>,
    similarity: Arc<dyn Similarity>,
    max_depth: usize,
}

impl PredicateBuilder {
    /// Starts a builder for `query`.
    pub fn new(query: impl Into<Needle>) -> Self {
        PredicateBuilder {
            query: query.into(),
            keys: Vec::new(),
            threshold: None,
            metric: Some(Metric::default()),
            similarity: Arc::new(Metric::default()),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Restricts composite searches to one more key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Restricts composite searches to the given keys.
    pub fn keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Compares text by similarity ratio instead of substring containment.
    ///
    /// A threshold of `0` is treated as unset.
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Sets or clears the similarity threshold.
    pub fn maybe_threshold(mut self, threshold: Option<f64>) -> Self {
        self.threshold = threshold;
        self
    }

    /// Selects a built-in similarity metric.
    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self.similarity = Arc::new(metric);
        self
    }

    /// Uses a custom similarity function.
    pub fn similarity(mut self, similarity: impl Similarity + 'static) -> Self {
        self.metric = None;
        self.similarity = Arc::new(similarity);
        self
    }

    /// Limits how many composite levels a search descends.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Validates the query and produces the predicate.
    ///
    /// Fails with [`PredicateError::InvalidQuery`] if the query is NaN.
    pub fn build(self) -> Result<FuzzyPredicate> {
        if self.query.is_nan() {
            return Err(PredicateError::InvalidQuery { found: "NaN" });
        }

        debug!(
            query = self.query.kind(),
            keys = self.keys.len(),
            threshold = ?self.threshold,
            metric = self.metric.map_or("custom", Metric::as_str),
            "built fuzzy predicate"
        );

        Ok(FuzzyPredicate {
            matcher: Matcher::new(
                self.query,
                self.keys,
                self.threshold,
                self.similarity,
                self.max_depth,
            ),
        })
    }
}

/// A reusable test for whether a value fuzzily contains a query.
///
/// Predicates hold no mutable state: the same instance can be applied to any
/// number of candidates, from any number of threads.
///
/// # Example
///
/// ```
/// use fuzzy_predicate::{fuzzy, Arg};
///
/// let people = ["John Doe", "To John Doe", "jdoe", "Jane Smith", "DOE, JOHN"];
/// let predicate = fuzzy("Doe", Arg::Absent, None).unwrap();
///
/// let found = predicate.filter(&people);
/// assert_eq!(found, [&"John Doe", &"To John Doe", &"jdoe", &"DOE, JOHN"]);
/// ```
#[derive(Debug, Clone)]
pub struct FuzzyPredicate {
    matcher: Matcher,
}

impl FuzzyPredicate {
    /// Starts a [`PredicateBuilder`] for `query`.
    pub fn builder(query: impl Into<Needle>) -> PredicateBuilder {
        PredicateBuilder::new(query)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the query.
    pub fn query(&self) -> &Needle {
        self.matcher.needle()
    }

    /// Returns the key restriction. Empty means unrestricted.
    pub fn keys(&self) -> &[String] {
        self.matcher.keys()
    }

    /// Returns the threshold as configured.
    pub fn threshold(&self) -> Option<f64> {
        self.matcher.threshold()
    }

    /// Returns `true` if text is compared by similarity rather than substring.
    pub fn uses_similarity(&self) -> bool {
        self.matcher.similarity_threshold().is_some()
    }

    /// Returns the underlying matcher.
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single value matches.
    pub fn matches<H: Haystack + ?Sized>(&self, haystack: &H) -> bool {
        self.matcher.matches(haystack)
    }

    /// Returns the predicate as a closure, for use with `Iterator::filter`.
    ///
    /// ```
    /// use fuzzy_predicate::{fuzzy, Arg};
    ///
    /// let predicate = fuzzy("foo", Arg::Absent, None).unwrap();
    /// let hits: Vec<&str> = ["food", "foo", "bar"]
    ///     .into_iter()
    ///     .filter(predicate.as_fn())
    ///     .collect();
    /// assert_eq!(hits, ["food", "foo"]);
    /// ```
    pub fn as_fn<H: Haystack + ?Sized>(&self) -> impl Fn(&&H) -> bool + '_ {
        move |haystack: &&H| self.matches(*haystack)
    }

    /// Filters a slice, returning references to matching items in order.
    pub fn filter<'a, T: Haystack>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }

    /// Filters and clones matching items.
    pub fn filter_cloned<T: Haystack + Clone>(&self, items: &[T]) -> Vec<T> {
        self.filter(items).into_iter().cloned().collect()
    }

    /// Filters a vector in place, keeping only matching items.
    pub fn filter_mut<T: Haystack>(&self, items: &mut Vec<T>) {
        items.retain(|item| self.matches(item));
    }

    /// Counts the number of matching items.
    pub fn count<T: Haystack>(&self, items: &[T]) -> usize {
        items.iter().filter(|item| self.matches(*item)).count()
    }

    /// Returns `true` if any item matches.
    pub fn any<T: Haystack>(&self, items: &[T]) -> bool {
        items.iter().any(|item| self.matches(item))
    }

    /// Returns `true` if all items match.
    pub fn all<T: Haystack>(&self, items: &[T]) -> bool {
        items.iter().all(|item| self.matches(item))
    }

    /// Finds the first matching item.
    pub fn find<'a, T: Haystack>(&self, items: &'a [T]) -> Option<&'a T> {
        items.iter().find(|item| self.matches(*item))
    }

    /// Finds the first matching item and returns its index.
    pub fn position<T: Haystack>(&self, items: &[T]) -> Option<usize> {
        items.iter().position(|item| self.matches(item))
    }
}
