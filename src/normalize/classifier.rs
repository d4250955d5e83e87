//! Ordered "first matching rule wins" classification.
//!
//! Categories overlap (a title can mention "research", "scientist" and
//! "engineer" at once), so rules are kept as a priority list and evaluated
//! top to bottom. Rules are never sorted, merged or deduplicated.

use regex::Regex;

/// How a rule decides whether it applies to a piece of text
#[derive(Debug)]
pub enum Predicate {
    /// Regular expression searched anywhere in the text
    Pattern(Regex),
    /// Matches when any of the keywords occurs as a substring
    AnyOf(&'static [&'static str]),
}

impl Predicate {
    /// Build a pattern predicate from a literal known to be valid.
    ///
    /// # Panics
    /// Panics if `pattern` is not a valid regular expression. Rule tables are
    /// static literals, so this only fires on a programming error.
    pub fn pattern(pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => Predicate::Pattern(re),
            Err(e) => panic!("invalid classifier pattern {pattern:?}: {e}"),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        match self {
            Predicate::Pattern(re) => re.is_match(text),
            Predicate::AnyOf(keywords) => keywords.iter().any(|k| text.contains(k)),
        }
    }
}

#[derive(Debug)]
pub struct Rule<L> {
    pub predicate: Predicate,
    pub label: L,
}

impl<L> Rule<L> {
    pub fn new(predicate: Predicate, label: L) -> Self {
        Self { predicate, label }
    }
}

/// A priority-ordered list of rules with an optional fallback label
#[derive(Debug)]
pub struct TextClassifier<L> {
    rules: Vec<Rule<L>>,
    fallback: Option<L>,
}

impl<L: Copy> TextClassifier<L> {
    /// Classifier that yields `None` when nothing matches
    pub fn new(rules: Vec<Rule<L>>) -> Self {
        Self {
            rules,
            fallback: None,
        }
    }

    /// Classifier that yields `fallback` when nothing matches
    pub fn with_fallback(rules: Vec<Rule<L>>, fallback: L) -> Self {
        Self {
            rules,
            fallback: Some(fallback),
        }
    }

    /// Label of the first matching rule. Callers lower-case `text` beforehand.
    pub fn classify(&self, text: &str) -> Option<L> {
        self.first_match(text).or(self.fallback)
    }

    /// Like `classify`, but `None` only when no rule matched even if a fallback exists
    pub fn first_match(&self, text: &str) -> Option<L> {
        self.rules
            .iter()
            .find(|rule| rule.predicate.matches(text))
            .map(|rule| rule.label)
    }

    pub fn labels(&self) -> impl Iterator<Item = L> + '_ {
        self.rules.iter().map(|rule| rule.label)
    }
}
