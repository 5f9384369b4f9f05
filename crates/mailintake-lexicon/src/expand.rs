//! Keyword expansion into OR-search term sets.

use std::collections::BTreeSet;
use std::fmt;

use crate::accent::accent_candidates;
use crate::pluralize::Pluralizer;

/// Deduplicated set of lowercase search terms.
///
/// Only insertion and union are exposed: a set produced by expansion
/// never loses a term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet(BTreeSet<String>);

impl KeywordSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a term. Returns `true` if it was not present yet.
    pub fn insert(&mut self, term: impl Into<String>) -> bool {
        self.0.insert(term.into())
    }

    /// Adds every term of `other`.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Returns true if `term` is in the set.
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.0.contains(term)
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set holds no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates terms in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Renders the set as `t1 OR t2 OR ... <filters>`.
    ///
    /// Returns `None` for an empty set, since a query with no terms would
    /// match every message. Blank `filters` are omitted.
    #[must_use]
    pub fn to_search_query(&self, filters: &str) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut query = self.iter().collect::<Vec<_>>().join(" OR ");
        let filters = filters.trim();
        if !filters.is_empty() {
            query.push(' ');
            query.push_str(filters);
        }
        Some(query)
    }
}

impl fmt::Display for KeywordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" OR ")?;
            }
            f.write_str(term)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Expands seed terms into plurals and accent variants.
#[derive(Debug, Clone, Default)]
pub struct KeywordExpander {
    pluralizer: Pluralizer,
}

impl KeywordExpander {
    /// Creates an expander using the given pluralizer.
    #[must_use]
    pub const fn new(pluralizer: Pluralizer) -> Self {
        Self { pluralizer }
    }

    /// Returns the pluralizer used for expansion.
    #[must_use]
    pub const fn pluralizer(&self) -> &Pluralizer {
        &self.pluralizer
    }

    /// Expands raw terms into a keyword set.
    ///
    /// Every term is split on whitespace first, so both `["beca", "pasantía"]`
    /// and `["beca pasantía"]` expand the same two tokens.
    pub fn expand<I, S>(&self, terms: I) -> KeywordSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords = KeywordSet::new();
        for term in terms {
            for token in term.as_ref().split_whitespace() {
                self.expand_token(token, &mut keywords);
            }
        }
        keywords
    }

    fn expand_token(&self, token: &str, keywords: &mut KeywordSet) {
        let word = token.to_lowercase();

        self.insert_plural(&word, keywords);
        for candidate in accent_candidates(&word) {
            self.insert_plural(&candidate, keywords);
            keywords.insert(candidate);
        }
        keywords.insert(word);
    }

    /// Adds the plural of `word` when it differs from `word`.
    fn insert_plural(&self, word: &str, keywords: &mut KeywordSet) {
        let plural = self.pluralizer.pluralize(word);
        if plural != word {
            keywords.insert(plural);
        }
    }
}

/// Expands raw terms with the built-in pluralization rules.
///
/// See [`KeywordExpander::expand`].
#[must_use]
pub fn expand_keywords<I, S>(terms: I) -> KeywordSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    KeywordExpander::default().expand(terms)
}
