//! Form validation.
//!
//! A [`RuleSet`] maps field paths to ordered rule lists; the [`Engine`]
//! evaluates them against the escaped submission snapshot and collects
//! the first failure per field into an [`ErrorMap`]. A failing rule
//! only aborts the remaining rules of its own field; the run itself
//! always completes.

mod messages;
mod rules;

pub use messages::{apply_inflections, inflect, Catalog, Locale, MessageKey};
pub use rules::{CustomRule, Rule, RuleViolation};

use formkit_http::Value;

/// Ordered mapping from field paths to their rule lists.
#[derive(Debug, Default)]
pub struct RuleSet {
    entries: Vec<(String, Vec<Rule>)>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds rules for a field path.
    #[must_use]
    pub fn field(mut self, path: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.entries
            .push((path.into(), rules.into_iter().collect()));
        self
    }

    /// Returns whether the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(path, rules)` entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.entries
            .iter()
            .map(|(path, rules)| (path.as_str(), rules.as_slice()))
    }
}

/// Per-field validation errors: path → first failure message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: Vec<(String, String)>,
}

impl ErrorMap {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for a field, overwriting an earlier one.
    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        let path = path.into();
        let message = message.into();
        if let Some(entry) = self.entries.iter_mut().find(|(p, _)| *p == path) {
            entry.1 = message;
        } else {
            self.entries.push((path, message));
        }
    }

    /// Returns the message for a field.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, m)| m.as_str())
    }

    /// Returns whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over `(path, message)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(p, m)| (p.as_str(), m.as_str()))
    }

    /// Overlays `other` on top of this map (entries in `other` win).
    pub fn merge(&mut self, other: &Self) {
        for (path, message) in other.iter() {
            self.insert(path, message);
        }
    }
}

impl std::fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (path, message) in self.iter() {
            writeln!(f, "{path}: {message}")?;
        }
        Ok(())
    }
}

/// Evaluates a rule set against a submission snapshot.
pub struct Engine<'a> {
    rules: &'a RuleSet,
    data: &'a Value,
    catalog: &'a Catalog,
}

impl<'a> Engine<'a> {
    /// Creates an engine over the given rules, snapshot, and message
    /// catalog.
    pub fn new(rules: &'a RuleSet, data: &'a Value, catalog: &'a Catalog) -> Self {
        Self {
            rules,
            data,
            catalog,
        }
    }

    /// Runs every rule, short-circuiting per field on the first
    /// failure. Always completes and returns the collected map.
    pub fn run(&self) -> ErrorMap {
        let mut errors = ErrorMap::new();

        for (path, rules) in self.rules.iter() {
            let bound = self.data.resolve(path).and_then(Value::as_str);

            for rule in rules {
                if let Err(violation) = rule.check(bound, self.catalog) {
                    tracing::debug!(field = %path, message = %violation.message, "rule failed");
                    errors.insert(path, violation.message);
                    break;
                }
            }
        }

        errors
    }
}
