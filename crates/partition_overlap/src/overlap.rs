//! Day-over-day overlap of partition classes.
//!
//! For each class and each pair of consecutive dates, the number of elements
//! kept from the previous day and that number as a percentage of the previous
//! day's class size. A class without members on the previous day retains
//! 0% rather than an undefined ratio.
//!
//! Report rows keep the order of their input: key order for
//! `calculate_overlap`, partition order (arity, then registration) for the
//! tracker.

use crate::error::OverlapError;
use crate::label::ClassLabel;
use crate::partition::{Element, Partition};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt::Display;

/// Overlap of one class, aligned to the report's transition dates.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OverlapSeries {
    pub absolute: Vec<usize>,
    pub percentage: Vec<f64>,
}

impl OverlapSeries {
    pub fn len(&self) -> usize {
        self.absolute.len()
    }

    pub fn is_empty(&self) -> bool {
        self.absolute.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct OverlapReport<K, D> {
    dates: Vec<D>,
    series: Vec<(K, OverlapSeries)>,
}

impl<K: PartialEq, D> OverlapReport<K, D> {
    /// All dates, sorted ascending.
    pub fn dates(&self) -> &[D] {
        &self.dates
    }

    /// The dates each series entry refers to: every date but the first.
    pub fn transitions(&self) -> &[D] {
        if self.dates.is_empty() {
            &self.dates
        } else {
            &self.dates[1..]
        }
    }

    pub fn get(&self, class: &K) -> Option<&OverlapSeries> {
        self.series
            .iter()
            .find(|(key, _)| key == class)
            .map(|(_, series)| series)
    }

    /// Classes in row order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &OverlapSeries)> {
        self.series.iter().map(|(class, series)| (class, series))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn mean_percentage(&self, class: &K) -> Option<f64> {
        let series = self.get(class)?;
        if series.is_empty() {
            return None;
        }
        Some(series.percentage.iter().sum::<f64>() / series.len() as f64)
    }
}

/// Compute the overlap series of every class.
///
/// The dates are the sorted union of all date keys. Every class must have an
/// entry for every date; a gap fails the whole computation with
/// `MissingDateEntry`.
pub fn calculate_overlap<K, D, T>(
    data: &BTreeMap<K, BTreeMap<D, HashSet<T>>>,
) -> Result<OverlapReport<K, D>, OverlapError>
where
    K: Ord + Clone + Display + Send + Sync,
    D: Ord + Clone + Display + Send + Sync,
    T: Element,
{
    let dates: Vec<D> = data
        .values()
        .flat_map(|by_date| by_date.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    calculate_overlap_over(dates, data.iter().collect())
}

// Rows come out in the order of `classes`.
fn calculate_overlap_over<K, D, T>(
    dates: Vec<D>,
    classes: Vec<(&K, &BTreeMap<D, HashSet<T>>)>,
) -> Result<OverlapReport<K, D>, OverlapError>
where
    K: Clone + Display + Send + Sync,
    D: Ord + Clone + Display + Send + Sync,
    T: Element,
{
    let series: Vec<(K, OverlapSeries)> = classes
        .par_iter()
        .map(|(class, by_date)| {
            overlap_series(*class, &dates, by_date).map(|series| ((*class).clone(), series))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OverlapReport { dates, series })
}

fn overlap_series<K, D, T>(
    class: &K,
    dates: &[D],
    by_date: &BTreeMap<D, HashSet<T>>,
) -> Result<OverlapSeries, OverlapError>
where
    K: Display,
    D: Ord + Display,
    T: Element,
{
    let mut series = OverlapSeries::default();
    let mut prev: Option<&HashSet<T>> = None;

    for date in dates {
        let curr = by_date
            .get(date)
            .ok_or_else(|| OverlapError::MissingDateEntry {
                class: class.to_string(),
                date: date.to_string(),
            })?;
        if let Some(prev) = prev {
            let overlap = prev.intersection(curr).count();
            series.absolute.push(overlap);
            series.percentage.push(if prev.is_empty() {
                0.0
            } else {
                100.0 * overlap as f64 / prev.len() as f64
            });
        }
        prev = Some(curr);
    }

    tracing::debug!(class = %class, transitions = series.len(), "computed overlap series");
    Ok(series)
}

// ------------------- OverlapTracker -------------------

/// Collects one partition per date and computes the overlap report.
///
/// Classes are kept in the order they were first recorded, which for
/// partitions over the same dimensions is the partition's own class order.
#[derive(Debug, Clone)]
pub struct OverlapTracker<D: Ord, T: Element> {
    dates: BTreeSet<D>,
    classes: Vec<(ClassLabel, BTreeMap<D, HashSet<T>>)>,
    positions: HashMap<ClassLabel, usize>,
}

impl<D: Ord, T: Element> Default for OverlapTracker<D, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Ord, T: Element> OverlapTracker<D, T> {
    pub fn new() -> Self {
        Self {
            dates: BTreeSet::new(),
            classes: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub fn dates(&self) -> impl Iterator<Item = &D> {
        self.dates.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &ClassLabel> {
        self.classes.iter().map(|(label, _)| label)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl<D, T> OverlapTracker<D, T>
where
    D: Ord + Clone + Display + Send + Sync,
    T: Element,
{
    /// Store every class of the partition computed for `date`.
    pub fn record(&mut self, date: D, partition: &Partition<T>) -> Result<(), OverlapError> {
        if self.dates.contains(&date) {
            return Err(OverlapError::DuplicateDate(date.to_string()));
        }
        for class in partition.iter() {
            let pos = match self.positions.get(&class.label) {
                Some(&pos) => pos,
                None => {
                    self.classes.push((class.label.clone(), BTreeMap::new()));
                    self.positions.insert(class.label.clone(), self.classes.len() - 1);
                    self.classes.len() - 1
                }
            };
            self.classes[pos].1.insert(date.clone(), class.members.clone());
        }
        self.dates.insert(date);
        Ok(())
    }

    pub fn compute(&self) -> Result<OverlapReport<ClassLabel, D>, OverlapError> {
        let classes = self
            .classes
            .iter()
            .map(|(label, by_date)| (label, by_date))
            .collect();
        calculate_overlap_over(self.dates.iter().cloned().collect(), classes)
    }
}
