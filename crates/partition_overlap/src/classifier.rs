//! Exact-partition classifier.
//!
//! Register named dimensions, then query the partition: for every non-empty
//! combination of dimensions, the elements that belong to exactly that
//! combination. The partition is computed on the first query and cached; the
//! classifier rejects further input from then on.
//!
//! ## Example
//!
//! ```rust
//! use partition_overlap::classifier::PartitionClassifier;
//!
//! let mut classifier = PartitionClassifier::new();
//! classifier.register("eq", [1, 2]).unwrap();
//! classifier.register("mm", [2, 3]).unwrap();
//!
//! let partition = classifier.partitions();
//! assert_eq!(partition.get_str("eq mm").unwrap().len(), 1);
//! assert!(partition.get_str("eq").unwrap().contains(&1));
//! ```
//!
//! Each element gets a membership bitmask (bit i set when dimension i holds
//! it) and lands in the class of that mask, so the work is
//! O(|union| * N + 2^N) rather than one intersection and one union of the
//! excluded dimensions per subset.

use crate::conf::{ClassifierConfig, MAX_DIMENSIONS};
use crate::error::ClassifierError;
use crate::label::ClassLabel;
use crate::partition::{Element, Partition, PartitionClass};
use itertools::Itertools;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Dimension<T: Element> {
    pub name: String,
    pub elements: HashSet<T>,
}

#[derive(Debug)]
pub struct PartitionClassifier<T: Element> {
    config: ClassifierConfig,
    dimensions: Vec<Dimension<T>>,
    universe: Option<HashSet<T>>,
    partitions: OnceLock<Partition<T>>,
}

impl<T: Element> Default for PartitionClassifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> PartitionClassifier<T> {
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        Self {
            config,
            dimensions: Vec::new(),
            universe: None,
            partitions: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Add a named dimension.
    ///
    /// Names must not contain the label separator, or labels could not be
    /// parsed back.
    ///
    /// A duplicate name is logged and ignored: the existing dimension keeps its
    /// elements and `DuplicateDimension` is returned so the caller can decide
    /// whether to abort.
    pub fn register<S, I>(&mut self, name: S, elements: I) -> Result<(), ClassifierError>
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
    {
        let name = name.into();
        if self.is_frozen() {
            tracing::error!(dimension = %name, "registration after partitions were computed");
            return Err(ClassifierError::Frozen(name));
        }
        if !ClassLabel::is_valid_name(&name, &self.config.separator) {
            tracing::warn!(
                dimension = %name,
                separator = %self.config.separator,
                "invalid dimension name"
            );
            return Err(ClassifierError::InvalidName {
                name,
                separator: self.config.separator.clone(),
            });
        }
        if self.dimensions.iter().any(|d| d.name == name) {
            tracing::warn!(dimension = %name, "Class {} is already present", name);
            return Err(ClassifierError::DuplicateDimension(name));
        }
        if self.dimensions.len() >= MAX_DIMENSIONS {
            return Err(ClassifierError::TooManyDimensions {
                max: MAX_DIMENSIONS,
            });
        }
        self.dimensions.push(Dimension {
            name,
            elements: elements.into_iter().collect(),
        });
        Ok(())
    }

    /// Declare the caller's universe. Only used to report unclassified elements.
    pub fn declare_universe<I>(&mut self, elements: I) -> Result<(), ClassifierError>
    where
        I: IntoIterator<Item = T>,
    {
        if self.is_frozen() {
            return Err(ClassifierError::Frozen("universe".to_string()));
        }
        self.universe = Some(elements.into_iter().collect());
        Ok(())
    }

    pub fn is_frozen(&self) -> bool {
        self.partitions.get().is_some()
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    pub fn dimension_names(&self) -> Vec<&str> {
        self.dimensions.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn dimension(&self, name: &str) -> Option<&Dimension<T>> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    /// The partition, computed on first call.
    pub fn partitions(&self) -> &Partition<T> {
        self.partitions.get_or_init(|| self.compute())
    }

    pub fn into_partition(self) -> Partition<T> {
        match self.partitions.into_inner() {
            Some(partition) => partition,
            None => compute_partition(&self.dimensions, self.universe.as_ref(), &self.config),
        }
    }

    fn compute(&self) -> Partition<T> {
        compute_partition(&self.dimensions, self.universe.as_ref(), &self.config)
    }
}

fn compute_partition<T: Element>(
    dimensions: &[Dimension<T>],
    universe: Option<&HashSet<T>>,
    config: &ClassifierConfig,
) -> Partition<T> {
    let n = dimensions.len();

    let mut masks: HashMap<&T, u32> = HashMap::new();
    for (bit, dimension) in dimensions.iter().enumerate() {
        for element in &dimension.elements {
            *masks.entry(element).or_insert(0) |= 1 << bit;
        }
    }

    let mut by_mask: HashMap<u32, HashSet<T>> = HashMap::new();
    for (element, mask) in &masks {
        by_mask.entry(*mask).or_default().insert((*element).clone());
    }

    // Arity first, then registration order: eq, mm, bgp, tr, eq mm, eq bgp, ...
    let classes: Vec<PartitionClass<T>> = (1..=n)
        .flat_map(|k| (0..n).combinations(k))
        .map(|indices| {
            let mask = indices.iter().fold(0u32, |acc, &i| acc | (1 << i));
            let label = ClassLabel::with_separator(
                indices.iter().map(|&i| dimensions[i].name.as_str()),
                &config.separator,
            );
            let members = by_mask.remove(&mask).unwrap_or_default();
            tracing::debug!(class = %label, size = members.len(), "computed partition class");
            PartitionClass {
                label,
                mask,
                members,
            }
        })
        .collect();

    let unclassified = if config.unclassified.reports_unclassified() {
        match universe {
            Some(universe) => Some(
                universe
                    .iter()
                    .filter(|e| !masks.contains_key(e))
                    .cloned()
                    .collect(),
            ),
            None => {
                tracing::warn!("unclassified elements requested but no universe was declared");
                Some(HashSet::new())
            }
        }
    } else {
        None
    };

    Partition::from_classes(
        dimensions.iter().map(|d| d.name.clone()).collect(),
        classes,
        unclassified,
        config.separator.clone(),
    )
}
