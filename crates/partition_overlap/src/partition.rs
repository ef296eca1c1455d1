//! The exact-membership partition produced by a classifier.
//!
//! A `Partition` holds one class per non-empty combination of dimensions. Each
//! class contains the elements that belong to every dimension of the
//! combination and to none of the others, so classes never overlap.

use crate::conf::UNCLASSIFIED_LABEL;
use crate::label::ClassLabel;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Trait alias for types that can be classified.
pub trait Element: Eq + Hash + Clone + Send + Sync {}

impl<T: Eq + Hash + Clone + Send + Sync> Element for T {}

// ------------------- PartitionClass -------------------

#[derive(Debug, Clone)]
pub struct PartitionClass<T: Element> {
    pub label: ClassLabel,
    /// Bit i is set when the i-th registered dimension is part of the class.
    pub mask: u32,
    pub members: HashSet<T>,
}

impl<T: Element> PartitionClass<T> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// ------------------- Partition -------------------

#[derive(Debug, Clone)]
pub struct Partition<T: Element> {
    dimensions: Vec<String>,
    classes: Vec<PartitionClass<T>>,
    index: HashMap<ClassLabel, usize>,
    unclassified: Option<HashSet<T>>,
    separator: String,
}

impl<T: Element> Partition<T> {
    pub(crate) fn from_classes(
        dimensions: Vec<String>,
        classes: Vec<PartitionClass<T>>,
        unclassified: Option<HashSet<T>>,
        separator: String,
    ) -> Self {
        let index = classes
            .iter()
            .enumerate()
            .map(|(pos, class)| (class.label.clone(), pos))
            .collect();
        Self {
            dimensions,
            classes,
            index,
            unclassified,
            separator,
        }
    }

    /// Dimension names in registration order.
    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Number of classes, empty ones included.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, label: &ClassLabel) -> Option<&HashSet<T>> {
        self.index.get(label).map(|&pos| &self.classes[pos].members)
    }

    pub fn get_by_names(&self, names: &[&str]) -> Option<&HashSet<T>> {
        self.get(&ClassLabel::new(names.iter().copied()))
    }

    /// Look a class up by its displayed label, e.g. `"eq mm"`.
    pub fn get_str(&self, label: &str) -> Option<&HashSet<T>> {
        self.get(&ClassLabel::parse(label, &self.separator))
    }

    /// Classes ordered by arity, then by registration order of their dimensions.
    pub fn iter(&self) -> std::slice::Iter<'_, PartitionClass<T>> {
        self.classes.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &ClassLabel> {
        self.classes.iter().map(|c| &c.label)
    }

    /// Classes combining exactly `arity` dimensions.
    pub fn of_arity(&self, arity: usize) -> impl Iterator<Item = &PartitionClass<T>> {
        self.classes.iter().filter(move |c| c.label.arity() == arity)
    }

    /// Union of all classes. Equals the union of the registered dimensions.
    pub fn union(&self) -> HashSet<T> {
        self.classes
            .iter()
            .flat_map(|c| c.members.iter().cloned())
            .collect()
    }

    /// Elements of the declared universe outside every dimension, when requested.
    pub fn unclassified(&self) -> Option<&HashSet<T>> {
        self.unclassified.as_ref()
    }

    /// The class an element was placed in.
    pub fn classify(&self, element: &T) -> Option<&ClassLabel> {
        self.classes
            .iter()
            .find(|c| c.members.contains(element))
            .map(|c| &c.label)
    }

    /// Union of every class whose label satisfies `predicate`.
    pub fn aggregate<F>(&self, predicate: F) -> HashSet<T>
    where
        F: Fn(&ClassLabel) -> bool,
    {
        self.classes
            .iter()
            .filter(|c| predicate(&c.label))
            .flat_map(|c| c.members.iter().cloned())
            .collect()
    }

    /// Split the multi-dimension classes by whether they involve `pivot`.
    ///
    /// Returns `(with_pivot, without_pivot)`, e.g. "mixed mm" and "mixed no mm".
    pub fn mixed_groups(&self, pivot: &str) -> (HashSet<T>, HashSet<T>) {
        let with_pivot = self.aggregate(|l| l.arity() > 1 && l.contains(pivot));
        let without_pivot = self.aggregate(|l| l.arity() > 1 && !l.contains(pivot));
        (with_pivot, without_pivot)
    }

    /// Class sizes. Reported unclassified elements get a trailing `none` entry
    /// and count towards the total.
    pub fn summary(&self) -> PartitionSummary {
        let mut sizes: Vec<(String, usize)> = self
            .classes
            .iter()
            .map(|c| (c.label.to_string(), c.len()))
            .collect();
        if let Some(unclassified) = &self.unclassified {
            sizes.push((UNCLASSIFIED_LABEL.to_string(), unclassified.len()));
        }
        let total: usize = sizes.iter().map(|(_, count)| count).sum();
        let classes = sizes
            .into_iter()
            .map(|(label, count)| ClassSize {
                label,
                count,
                percentage: percentage_of(count, total),
            })
            .collect();
        PartitionSummary { classes, total }
    }
}

// ------------------- Summary -------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassSize {
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

/// Class sizes with their share of all classified elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionSummary {
    pub classes: Vec<ClassSize>,
    pub total: usize,
}

impl PartitionSummary {
    pub fn get(&self, label: &str) -> Option<&ClassSize> {
        self.classes.iter().find(|c| c.label == label)
    }
}

pub(crate) fn percentage_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}
