//! Building classifier input from one snapshot of ranking comparisons.
//!
//! Each record compares the dependency rankings of one scope as seen by the
//! control plane (bgp) and the data plane (tr). Its dependencies fall in four
//! categories: ranked equally, mismatched, bgp only and tr only. A scope joins
//! a category when it has at least one dependency there; a dependency joins a
//! category when any scope lists it there.

use crate::classifier::PartitionClassifier;
use crate::conf::ClassifierConfig;
use crate::error::{ClassifierError, IntegrityError};
use crate::partition::Partition;
use crate::validation::validate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type ScopeId = u64;
pub type Asn = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Equal,
    Mismatched,
    BgpOnly,
    TrOnly,
}

impl Category {
    /// Registration order of the dimensions.
    pub const ALL: [Category; 4] = [
        Category::Equal,
        Category::Mismatched,
        Category::BgpOnly,
        Category::TrOnly,
    ];

    /// Dimension name used in class labels.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Equal => "eq",
            Category::Mismatched => "mm",
            Category::BgpOnly => "bgp",
            Category::TrOnly => "tr",
        }
    }

    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.name() == name)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

// ------------------- Records -------------------

/// A dependency ranked identically by both sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqualEntry {
    pub asn: Asn,
    pub bgp_score: f64,
    pub bgp_rank: u32,
    pub tr_score: f64,
    pub tr_rank: u32,
    pub rank: u32,
}

/// A dependency seen by both sources at different ranks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MismatchedEntry {
    pub asn: Asn,
    pub bgp_score: f64,
    pub bgp_rank: u32,
    pub bgp_comparable_rank: u32,
    pub tr_score: f64,
    pub tr_rank: u32,
    pub tr_comparable_rank: u32,
}

/// A dependency seen by a single source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleSourceEntry {
    pub asn: Asn,
    pub score: f64,
    pub rank: u32,
}

pub trait DependencyEntry {
    fn asn(&self) -> Asn;
}

impl DependencyEntry for EqualEntry {
    fn asn(&self) -> Asn {
        self.asn
    }
}

impl DependencyEntry for MismatchedEntry {
    fn asn(&self) -> Asn {
        self.asn
    }
}

impl DependencyEntry for SingleSourceEntry {
    fn asn(&self) -> Asn {
        self.asn
    }
}

/// One decoded comparison message. Entries deserialize from either maps or
/// positional arrays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub scope: ScopeId,
    #[serde(default)]
    pub equal: Vec<EqualEntry>,
    #[serde(default)]
    pub mismatched: Vec<MismatchedEntry>,
    #[serde(default)]
    pub bgp_only: Vec<SingleSourceEntry>,
    #[serde(default)]
    pub tr_only: Vec<SingleSourceEntry>,
}

impl ComparisonRecord {
    pub fn dependencies(&self, category: Category) -> Vec<Asn> {
        match category {
            Category::Equal => asns(&self.equal),
            Category::Mismatched => asns(&self.mismatched),
            Category::BgpOnly => asns(&self.bgp_only),
            Category::TrOnly => asns(&self.tr_only),
        }
    }
}

fn asns<E: DependencyEntry>(entries: &[E]) -> Vec<Asn> {
    entries.iter().map(|e| e.asn()).collect()
}

// ------------------- CategoryCounts -------------------

/// How often an element was listed under each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryCounts {
    counts: [usize; 4],
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        self.counts[category.index()]
    }

    pub fn get_by_name(&self, name: &str) -> Option<usize> {
        Category::from_name(name).map(|c| self.get(c))
    }

    pub fn add(&mut self, category: Category, n: usize) {
        self.counts[category.index()] += n;
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

// ------------------- SnapshotBuilder -------------------

#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    config: ClassifierConfig,
    scope_sets: [HashSet<ScopeId>; 4],
    dependency_sets: [HashSet<Asn>; 4],
    scopes: HashSet<ScopeId>,
    dependencies: HashSet<Asn>,
    scope_counts: HashMap<ScopeId, CategoryCounts>,
    dependency_counts: HashMap<Asn, CategoryCounts>,
    dependency_scopes: HashMap<Asn, HashSet<ScopeId>>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn ingest(&mut self, record: &ComparisonRecord) {
        let scope = record.scope;
        self.scopes.insert(scope);
        let scope_counts = self.scope_counts.entry(scope).or_default();

        for category in Category::ALL {
            let asns = record.dependencies(category);
            if asns.is_empty() {
                continue;
            }
            self.scope_sets[category.index()].insert(scope);
            scope_counts.add(category, asns.len());

            for asn in asns {
                self.dependencies.insert(asn);
                self.dependency_sets[category.index()].insert(asn);
                self.dependency_counts
                    .entry(asn)
                    .or_default()
                    .add(category, 1);
                self.dependency_scopes.entry(asn).or_default().insert(scope);
            }
        }
    }

    pub fn ingest_all<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a ComparisonRecord>,
    {
        for record in records {
            self.ingest(record);
        }
    }

    pub fn build(self) -> Snapshot {
        Snapshot {
            config: self.config,
            scope_sets: self.scope_sets,
            dependency_sets: self.dependency_sets,
            scopes: self.scopes,
            dependencies: self.dependencies,
            scope_counts: self.scope_counts,
            dependency_counts: self.dependency_counts,
            dependency_scopes: self.dependency_scopes,
        }
    }
}

// ------------------- Snapshot -------------------

/// Scope and dependency dimensions of one snapshot.
#[derive(Debug, Clone)]
pub struct Snapshot {
    config: ClassifierConfig,
    scope_sets: [HashSet<ScopeId>; 4],
    dependency_sets: [HashSet<Asn>; 4],
    scopes: HashSet<ScopeId>,
    dependencies: HashSet<Asn>,
    scope_counts: HashMap<ScopeId, CategoryCounts>,
    dependency_counts: HashMap<Asn, CategoryCounts>,
    dependency_scopes: HashMap<Asn, HashSet<ScopeId>>,
}

impl Snapshot {
    pub fn from_records<'a, I>(records: I) -> Snapshot
    where
        I: IntoIterator<Item = &'a ComparisonRecord>,
    {
        let mut builder = SnapshotBuilder::new();
        builder.ingest_all(records);
        builder.build()
    }

    /// Every scope seen, including scopes without any dependency.
    pub fn scopes(&self) -> &HashSet<ScopeId> {
        &self.scopes
    }

    pub fn dependencies(&self) -> &HashSet<Asn> {
        &self.dependencies
    }

    pub fn scope_set(&self, category: Category) -> &HashSet<ScopeId> {
        &self.scope_sets[category.index()]
    }

    pub fn dependency_set(&self, category: Category) -> &HashSet<Asn> {
        &self.dependency_sets[category.index()]
    }

    pub fn scope_counts(&self) -> &HashMap<ScopeId, CategoryCounts> {
        &self.scope_counts
    }

    pub fn dependency_counts(&self) -> &HashMap<Asn, CategoryCounts> {
        &self.dependency_counts
    }

    /// Scopes that list each dependency, in any category.
    pub fn dependency_scopes(&self) -> &HashMap<Asn, HashSet<ScopeId>> {
        &self.dependency_scopes
    }

    pub fn scope_classifier(&self) -> Result<PartitionClassifier<ScopeId>, ClassifierError> {
        self.classifier(&self.scope_sets, &self.scopes)
    }

    pub fn dependency_classifier(&self) -> Result<PartitionClassifier<Asn>, ClassifierError> {
        self.classifier(&self.dependency_sets, &self.dependencies)
    }

    fn classifier(
        &self,
        sets: &[HashSet<u64>; 4],
        universe: &HashSet<u64>,
    ) -> Result<PartitionClassifier<u64>, ClassifierError> {
        let mut classifier = PartitionClassifier::with_config(self.config.clone());
        for category in Category::ALL {
            classifier.register(category.name(), sets[category.index()].iter().copied())?;
        }
        classifier.declare_universe(universe.iter().copied())?;
        Ok(classifier)
    }

    /// Partition scopes and dependencies. The two are independent and run in parallel.
    pub fn classify(&self) -> Result<ClassifiedSnapshot, ClassifierError> {
        let (scopes, dependencies) = rayon::join(
            || self.scope_classifier().map(PartitionClassifier::into_partition),
            || {
                self.dependency_classifier()
                    .map(PartitionClassifier::into_partition)
            },
        );
        let classified = ClassifiedSnapshot {
            scopes: scopes?,
            dependencies: dependencies?,
        };
        if !classified.classes_match() {
            tracing::warn!("scope and dependency classes do not match");
        }
        Ok(classified)
    }
}

#[derive(Debug, Clone)]
pub struct ClassifiedSnapshot {
    pub scopes: Partition<ScopeId>,
    pub dependencies: Partition<Asn>,
}

impl ClassifiedSnapshot {
    pub fn classes_match(&self) -> bool {
        self.scopes.labels().eq(self.dependencies.labels())
    }

    /// Check both partitions against the snapshot's universes.
    ///
    /// Scopes without any dependency belong to no dimension, so a snapshot
    /// containing them fails the scope check.
    pub fn validate(&self, snapshot: &Snapshot) -> Result<(), IntegrityError> {
        validate(&self.scopes, snapshot.scopes())?;
        validate(&self.dependencies, snapshot.dependencies())
    }
}
