//! Integrity checks of a partition against the caller's universe.
//!
//! The classifier only knows the union of its dimensions. Callers that track
//! every element they have seen pass that universe here and treat a failure
//! as fatal before producing any output.

use crate::error::IntegrityError;
use crate::partition::{Element, Partition};
use itertools::Itertools;
use std::collections::HashSet;
use std::fmt::Debug;

// Elements named in an InconsistentUniverse message.
const SAMPLE_SIZE: usize = 5;

pub fn check_disjoint<T: Element>(partition: &Partition<T>) -> Result<(), IntegrityError> {
    for (a, b) in partition.iter().tuple_combinations() {
        let shared = a.members.intersection(&b.members).count();
        if shared > 0 {
            return Err(IntegrityError::Overlapping {
                first: a.label.to_string(),
                second: b.label.to_string(),
                shared,
            });
        }
    }
    Ok(())
}

/// The union of all classes must equal `universe` exactly.
pub fn check_universe<T>(
    partition: &Partition<T>,
    universe: &HashSet<T>,
) -> Result<(), IntegrityError>
where
    T: Element + Debug,
{
    let union = partition.union();
    let missing: Vec<&T> = universe.difference(&union).collect();
    let unexpected: Vec<&T> = union.difference(universe).collect();
    if missing.is_empty() && unexpected.is_empty() {
        return Ok(());
    }
    let sample = missing
        .iter()
        .chain(unexpected.iter())
        .map(|e| format!("{e:?}"))
        .sorted()
        .take(SAMPLE_SIZE)
        .join(", ");
    Err(IntegrityError::InconsistentUniverse {
        missing: missing.len(),
        unexpected: unexpected.len(),
        sample,
    })
}

pub fn validate<T>(partition: &Partition<T>, universe: &HashSet<T>) -> Result<(), IntegrityError>
where
    T: Element + Debug,
{
    check_disjoint(partition)?;
    check_universe(partition, universe)
}
