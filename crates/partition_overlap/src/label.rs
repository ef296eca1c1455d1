//! Composite labels naming a partition class.
//!
//! A label is the set of dimension names an element belongs to. Identity is
//! order-independent (`"eq mm"` and `"mm eq"` are the same class) while display
//! keeps the order the names were given in, normally registration order.

use crate::conf::DEFAULT_LABEL_SEPARATOR;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub struct ClassLabel {
    names: Vec<String>,
    // Sorted copy of `names`, used for identity.
    key: Vec<String>,
    separator: String,
}

impl ClassLabel {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_separator(names, DEFAULT_LABEL_SEPARATOR)
    }

    pub fn with_separator<I, S>(names: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for name in names.into_iter().map(Into::<String>::into) {
            if !ordered.contains(&name) {
                ordered.push(name);
            }
        }
        let mut key = ordered.clone();
        key.sort();
        Self {
            names: ordered,
            key,
            separator: separator.to_string(),
        }
    }

    /// Parse a displayed label back, e.g. `"eq mm"` with separator `" "`.
    pub fn parse(label: &str, separator: &str) -> Self {
        let names = if separator.trim().is_empty() {
            label.split_whitespace().collect::<Vec<_>>()
        } else {
            label
                .split(separator)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
        };
        Self::with_separator(names, separator)
    }

    /// Whether `name` reads back as exactly one dimension from a label joined by
    /// `separator`.
    pub fn is_valid_name(name: &str, separator: &str) -> bool {
        let parsed = Self::parse(name, separator);
        parsed.arity() == 1 && parsed.names()[0] == name
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of dimensions combined in this class.
    pub fn arity(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.key.binary_search_by(|n| n.as_str().cmp(name)).is_ok()
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join(&self.separator))
    }
}

impl PartialEq for ClassLabel {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ClassLabel {}

impl Hash for ClassLabel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for ClassLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassLabel {
    // Smaller combinations first, then alphabetical.
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .len()
            .cmp(&other.key.len())
            .then_with(|| self.key.cmp(&other.key))
    }
}

impl From<&str> for ClassLabel {
    fn from(label: &str) -> Self {
        ClassLabel::parse(label, DEFAULT_LABEL_SEPARATOR)
    }
}
