//! Category ratios of elements in multi-dimension classes.
//!
//! An element of class `"eq mm"` was listed both as equal and as mismatched.
//! Its ratio for `eq` is the share of its listings that were equal. Elements
//! whose share for one dimension dominates are reported as biased.

use crate::label::ClassLabel;
use crate::partition::Element;
use crate::snapshot::CategoryCounts;
use std::collections::{BTreeMap, HashMap, HashSet};

/// `(share, element)` pairs sorted by share, keyed by dimension name.
pub type ClassRatios<T> = BTreeMap<String, Vec<(f64, T)>>;

/// Per dimension of `label`, the share of each member's listings in that dimension.
///
/// Single-dimension classes have nothing to compare and yield an empty map.
/// Members without counts or with a zero total are skipped.
pub fn class_ratios<T>(
    label: &ClassLabel,
    members: &HashSet<T>,
    counts: &HashMap<T, CategoryCounts>,
) -> ClassRatios<T>
where
    T: Element + Ord,
{
    let mut ratios = ClassRatios::new();
    if label.arity() <= 1 {
        return ratios;
    }
    for name in label.names() {
        let mut shares: Vec<(f64, T)> = members
            .iter()
            .filter_map(|member| {
                let counts = counts.get(member)?;
                let total = counts.total();
                if total == 0 {
                    return None;
                }
                let count = counts.get_by_name(name)?;
                Some((count as f64 / total as f64, member.clone()))
            })
            .collect();
        shares.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        ratios.insert(name.clone(), shares);
    }
    ratios
}

/// Members whose share of a dimension is at least `threshold`.
///
/// Dimensions without any such member are left out.
pub fn check_bias<T>(
    label: &ClassLabel,
    members: &HashSet<T>,
    counts: &HashMap<T, CategoryCounts>,
    threshold: f64,
) -> ClassRatios<T>
where
    T: Element + Ord,
{
    class_ratios(label, members, counts)
        .into_iter()
        .filter_map(|(name, shares)| {
            let biased: Vec<(f64, T)> = shares
                .into_iter()
                .filter(|(share, _)| *share >= threshold)
                .collect();
            if biased.is_empty() {
                None
            } else {
                Some((name, biased))
            }
        })
        .collect()
}
