use std::collections::HashSet;

use partition_overlap::classifier::PartitionClassifier;
use partition_overlap::error::IntegrityError;
use partition_overlap::validation::{check_disjoint, check_universe, validate};

fn set(values: &[u64]) -> HashSet<u64> {
    values.iter().copied().collect()
}

fn classifier() -> PartitionClassifier<u64> {
    let mut classifier = PartitionClassifier::new();
    classifier.register("eq", [1u64, 2]).unwrap();
    classifier.register("mm", [2u64, 3]).unwrap();
    classifier.register("bgp", []).unwrap();
    classifier.register("tr", []).unwrap();
    classifier
}

#[test]
fn validate_accepts_matching_universe() {
    let classifier = classifier();
    let partition = classifier.partitions();
    assert!(check_disjoint(partition).is_ok());
    assert!(check_universe(partition, &set(&[1, 2, 3])).is_ok());
    assert!(validate(partition, &set(&[1, 2, 3])).is_ok());
}

#[test]
fn check_disjoint_over_every_class_pair() {
    let mut classifier = PartitionClassifier::new();
    classifier.register("eq", [1u64, 2, 5]).unwrap();
    classifier.register("mm", [2u64, 3, 5]).unwrap();
    classifier.register("bgp", [3u64, 4, 5]).unwrap();
    classifier.register("tr", [4u64, 5, 6]).unwrap();
    let partition = classifier.partitions();

    assert_eq!(partition.iter().len(), 15);
    assert!(check_disjoint(partition).is_ok());
    assert!(validate(partition, &set(&[1, 2, 3, 4, 5, 6])).is_ok());
}

#[test]
fn validate_reports_missing_elements() {
    let classifier = classifier();
    let err = validate(classifier.partitions(), &set(&[1, 2, 3, 9, 8])).unwrap_err();
    assert_eq!(
        err,
        IntegrityError::InconsistentUniverse {
            missing: 2,
            unexpected: 0,
            sample: "8, 9".to_string(),
        }
    );
    assert!(err.to_string().contains("2 missing"));
}

#[test]
fn validate_reports_unexpected_elements() {
    let classifier = classifier();
    let err = check_universe(classifier.partitions(), &set(&[1, 2])).unwrap_err();
    match err {
        IntegrityError::InconsistentUniverse {
            missing,
            unexpected,
            ..
        } => {
            assert_eq!(missing, 0);
            assert_eq!(unexpected, 1);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn validate_empty_partition_against_empty_universe() {
    let classifier: PartitionClassifier<u64> = PartitionClassifier::new();
    assert!(validate(classifier.partitions(), &HashSet::new()).is_ok());
}
