//! The recursive, type-dispatching search behind every predicate.
//!
//! A [`Matcher`] holds the validated query in the forms each branch needs
//! (normalized text, loosely-converted number) so that matching a candidate
//! does no work beyond normalizing the candidate's own text.

use std::fmt;
use std::sync::Arc;

use tracing::{trace, warn};

use crate::normalize::normalize;
use crate::similarity::Similarity;
use crate::traits::Haystack;
use crate::value::{Candidate, Entries, Needle, Number};

/// Default limit on how many composite levels a search descends.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Decides whether a candidate fuzzily contains a query.
///
/// - Numbers match by loose equality with the query.
/// - Text matches when the normalized query is a substring of the
///   normalized text, or, with a threshold, when the similarity ratio
///   reaches it.
/// - Composites match when any entry allowed by the key restriction matches.
/// - Everything else never matches.
#[derive(Clone)]
pub struct Matcher {
    needle: Needle,
    needle_text: String,
    needle_number: Option<Number>,
    keys: Vec<String>,
    threshold: Option<f64>,
    similarity: Arc<dyn Similarity>,
    max_depth: usize,
}

impl Matcher {
    /// Creates a matcher for an already validated needle.
    pub fn new(
        needle: Needle,
        keys: Vec<String>,
        threshold: Option<f64>,
        similarity: Arc<dyn Similarity>,
        max_depth: usize,
    ) -> Self {
        Matcher {
            needle_text: needle.normalized(),
            needle_number: needle.as_number(),
            needle,
            keys,
            threshold,
            similarity,
            max_depth,
        }
    }

    /// Returns the query this matcher searches for.
    pub fn needle(&self) -> &Needle {
        &self.needle
    }

    /// Returns the key restriction. Empty means every key is searched.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns the threshold as given, including a zero or NaN one.
    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    /// Returns the threshold that switches text matching to similarity mode.
    ///
    /// Zero and NaN count as unset, so they fall back to substring matching.
    pub fn similarity_threshold(&self) -> Option<f64> {
        self.threshold.filter(|t| *t != 0.0 && !t.is_nan())
    }

    /// Returns the maximum number of composite levels searched.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns `true` if `haystack` fuzzily contains the query.
    pub fn matches<H: Haystack + ?Sized>(&self, haystack: &H) -> bool {
        self.search(haystack.candidate(), 0)
    }

    fn search(&self, candidate: Candidate<'_>, depth: usize) -> bool {
        match candidate {
            Candidate::Number(n) => self.match_number(n),
            Candidate::Text(text) => self.match_text(text),
            Candidate::Composite(entries) => self.match_entries(entries, depth),
            Candidate::Unsupported => false,
        }
    }

    fn match_number(&self, n: Number) -> bool {
        self.needle_number.is_some_and(|q| n.loose_eq(q))
    }

    fn match_text(&self, text: &str) -> bool {
        let text = normalize(text);
        match self.similarity_threshold() {
            Some(threshold) => {
                let ratio = self.similarity.ratio(&text, &self.needle_text);
                trace!(candidate = %text, needle = %self.needle_text, ratio, threshold, "similarity");
                ratio >= threshold
            }
            None => text.contains(self.needle_text.as_str()),
        }
    }

    fn match_entries(&self, entries: Entries<'_>, depth: usize) -> bool {
        if depth >= self.max_depth {
            warn!(
                max_depth = self.max_depth,
                "haystack nested deeper than the depth limit, skipping"
            );
            return false;
        }

        for (key, value) in entries {
            if !self.keys.is_empty() && !key.is_in(&self.keys) {
                continue;
            }
            if self.search(value.candidate(), depth + 1) {
                return true;
            }
        }
        false
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("needle", &self.needle)
            .field("keys", &self.keys)
            .field("threshold", &self.threshold)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}
