use crate::cursor::{Cursor, Location};
use std::borrow::Cow;
use std::collections::BTreeSet;

/// A terminal label together with the location where it was expected
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Expectation {
    pub at: Location,
    pub label: Cow<'static, str>,
}

/// Set of labels that could have matched on a failing path
///
/// Merging is plain set union. Each label remembers where it was expected, which
/// lets a grammar narrow the report down to the furthest failure afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expected {
    entries: BTreeSet<Expectation>,
}

impl Expected {
    pub fn new() -> Self {
        Expected::default()
    }

    pub fn single(label: impl Into<Cow<'static, str>>, at: Location) -> Self {
        let mut expected = Expected::new();
        expected.insert(label, at);
        expected
    }

    pub fn insert(&mut self, label: impl Into<Cow<'static, str>>, at: Location) {
        self.entries.insert(Expectation {
            at,
            label: label.into(),
        });
    }

    /// Union `other` into this set
    pub fn merge(&mut self, other: Expected) {
        self.entries.extend(other.entries);
    }

    pub fn union(mut self, other: Expected) -> Self {
        self.merge(other);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expectation> {
        self.entries.iter()
    }

    /// Distinct labels regardless of location
    pub fn labels(&self) -> BTreeSet<&str> {
        self.entries.iter().map(|e| e.label.as_ref()).collect()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|e| e.label == label)
    }

    /// Location of the furthest expectation and the labels recorded there
    pub fn furthest(&self) -> Option<(Location, BTreeSet<&str>)> {
        let at = self.entries.iter().map(|e| e.at).max()?;
        let labels = self
            .entries
            .iter()
            .filter(|e| e.at.offset == at.offset)
            .map(|e| e.label.as_ref())
            .collect();
        Some((at, labels))
    }
}

impl IntoIterator for Expected {
    type Item = Expectation;
    type IntoIter = std::collections::btree_set::IntoIter<Expectation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Outcome of running a combinator
///
/// `value` is present iff the combinator matched. `remainder` is where the
/// matching path stopped, or the invocation cursor on failure.
#[derive(Debug, Clone)]
pub struct ParseResult<'src, V> {
    pub value: Option<V>,
    pub remainder: Cursor<'src>,
    pub expected: Expected,
}

impl<'src, V> ParseResult<'src, V> {
    pub fn success(value: V, remainder: Cursor<'src>) -> Self {
        ParseResult {
            value: Some(value),
            remainder,
            expected: Expected::new(),
        }
    }

    pub fn failure(remainder: Cursor<'src>, expected: Expected) -> Self {
        ParseResult {
            value: None,
            remainder,
            expected,
        }
    }

    pub fn with_expected(mut self, expected: Expected) -> Self {
        self.expected = expected;
        self
    }

    pub fn is_success(&self) -> bool {
        self.value.is_some()
    }

    /// Transform the value, keeping cursor and diagnostics
    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> ParseResult<'src, U> {
        ParseResult {
            value: self.value.map(f),
            remainder: self.remainder,
            expected: self.expected,
        }
    }

    /// Re-type a failed result. Any value is dropped.
    pub fn discard<U>(self) -> ParseResult<'src, U> {
        ParseResult::failure(self.remainder, self.expected)
    }
}
