//! Integration tests for partition_overlap::snapshot

use std::collections::HashSet;

use partition_overlap::conf::{ClassifierConfig, UnclassifiedBehaviour};
use partition_overlap::error::IntegrityError;
use partition_overlap::snapshot::{
    Category, ComparisonRecord, EqualEntry, MismatchedEntry, SingleSourceEntry, Snapshot,
    SnapshotBuilder,
};

fn set(values: &[u64]) -> HashSet<u64> {
    values.iter().copied().collect()
}

fn equal(asn: u64) -> EqualEntry {
    EqualEntry {
        asn,
        bgp_score: 1.0,
        bgp_rank: 1,
        tr_score: 1.0,
        tr_rank: 1,
        rank: 1,
    }
}

fn mismatched(asn: u64) -> MismatchedEntry {
    MismatchedEntry {
        asn,
        bgp_score: 0.5,
        bgp_rank: 1,
        bgp_comparable_rank: 1,
        tr_score: 0.4,
        tr_rank: 2,
        tr_comparable_rank: 2,
    }
}

fn single(asn: u64) -> SingleSourceEntry {
    SingleSourceEntry {
        asn,
        score: 0.1,
        rank: 3,
    }
}

fn records() -> Vec<ComparisonRecord> {
    vec![
        ComparisonRecord {
            scope: 10,
            equal: vec![equal(100), equal(101)],
            mismatched: vec![mismatched(102)],
            ..Default::default()
        },
        ComparisonRecord {
            scope: 11,
            equal: vec![equal(100)],
            bgp_only: vec![single(103)],
            ..Default::default()
        },
        ComparisonRecord {
            scope: 12,
            tr_only: vec![single(102), single(104)],
            ..Default::default()
        },
    ]
}

#[test]
fn category_names_follow_registration_order() {
    let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["eq", "mm", "bgp", "tr"]);
    assert_eq!(Category::from_name("bgp"), Some(Category::BgpOnly));
    assert_eq!(Category::from_name("other"), None);
}

#[test]
fn record_deserializes_positional_entries() {
    let json = r#"{
        "scope": 7,
        "equal": [[100, 0.9, 1, 0.9, 1, 1]],
        "mismatched": [[101, 0.5, 2, 2, 0.3, 4, 3]],
        "bgp_only": [[102, 0.1, 5]]
    }"#;
    let record: ComparisonRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.scope, 7);
    assert_eq!(record.dependencies(Category::Equal), vec![100]);
    assert_eq!(record.dependencies(Category::Mismatched), vec![101]);
    assert_eq!(record.mismatched[0].tr_rank, 4);
    assert_eq!(record.dependencies(Category::BgpOnly), vec![102]);
    assert!(record.tr_only.is_empty());
}

#[test]
fn builder_collects_scope_and_dependency_dimensions() {
    let snapshot = Snapshot::from_records(&records());

    assert_eq!(snapshot.scope_set(Category::Equal), &set(&[10, 11]));
    assert_eq!(snapshot.scope_set(Category::Mismatched), &set(&[10]));
    assert_eq!(snapshot.scope_set(Category::BgpOnly), &set(&[11]));
    assert_eq!(snapshot.scope_set(Category::TrOnly), &set(&[12]));

    assert_eq!(snapshot.dependency_set(Category::Equal), &set(&[100, 101]));
    assert_eq!(snapshot.dependency_set(Category::Mismatched), &set(&[102]));
    assert_eq!(snapshot.dependency_set(Category::BgpOnly), &set(&[103]));
    assert_eq!(snapshot.dependency_set(Category::TrOnly), &set(&[102, 104]));

    assert_eq!(snapshot.scopes(), &set(&[10, 11, 12]));
    assert_eq!(snapshot.dependencies(), &set(&[100, 101, 102, 103, 104]));
}

#[test]
fn builder_counts_listings_per_category() {
    let snapshot = Snapshot::from_records(&records());

    let scope = snapshot.scope_counts()[&10];
    assert_eq!(scope.get(Category::Equal), 2);
    assert_eq!(scope.get(Category::Mismatched), 1);
    assert_eq!(scope.total(), 3);

    let dep = snapshot.dependency_counts()[&100];
    assert_eq!(dep.get(Category::Equal), 2);
    assert_eq!(dep.get_by_name("eq"), Some(2));
    assert_eq!(dep.get_by_name("nope"), None);

    let dep = snapshot.dependency_counts()[&102];
    assert_eq!(dep.get(Category::Mismatched), 1);
    assert_eq!(dep.get(Category::TrOnly), 1);

    assert_eq!(snapshot.dependency_scopes()[&100], set(&[10, 11]));
    assert_eq!(snapshot.dependency_scopes()[&102], set(&[10, 12]));
}

#[test]
fn snapshot_classify_partitions_both_sides() {
    let snapshot = Snapshot::from_records(&records());
    let classified = snapshot.classify().unwrap();

    assert!(classified.classes_match());
    assert_eq!(classified.scopes.get_str("eq mm").unwrap(), &set(&[10]));
    assert_eq!(classified.scopes.get_str("eq bgp").unwrap(), &set(&[11]));
    assert_eq!(classified.scopes.get_str("tr").unwrap(), &set(&[12]));

    assert_eq!(classified.dependencies.get_str("eq").unwrap(), &set(&[100, 101]));
    assert_eq!(classified.dependencies.get_str("mm tr").unwrap(), &set(&[102]));
    assert_eq!(classified.dependencies.get_str("bgp").unwrap(), &set(&[103]));
    assert_eq!(classified.dependencies.get_str("tr").unwrap(), &set(&[104]));

    assert!(classified.validate(&snapshot).is_ok());
}

#[test]
fn snapshot_scope_without_dependencies_breaks_universe_check() {
    let mut records = records();
    records.push(ComparisonRecord {
        scope: 13,
        ..Default::default()
    });
    let snapshot = Snapshot::from_records(&records);
    let classified = snapshot.classify().unwrap();

    match classified.validate(&snapshot) {
        Err(IntegrityError::InconsistentUniverse {
            missing,
            unexpected,
            sample,
        }) => {
            assert_eq!(missing, 1);
            assert_eq!(unexpected, 0);
            assert_eq!(sample, "13");
        }
        other => panic!("expected InconsistentUniverse, got {other:?}"),
    }
}

#[test]
fn snapshot_explicit_unclassified_scopes() {
    let config = ClassifierConfig::default().with_unclassified(UnclassifiedBehaviour::Explicit);
    let mut builder = SnapshotBuilder::with_config(config);
    builder.ingest_all(&records());
    builder.ingest(&ComparisonRecord {
        scope: 13,
        ..Default::default()
    });
    let snapshot = builder.build();

    let classified = snapshot.classify().unwrap();
    assert_eq!(classified.scopes.unclassified(), Some(&set(&[13])));
    assert_eq!(classified.dependencies.unclassified(), Some(&HashSet::new()));
}

#[test]
fn snapshot_classifiers_are_fresh_each_time() {
    let snapshot = Snapshot::from_records(&records());
    let first = snapshot.scope_classifier().unwrap();
    let _ = first.partitions();
    assert!(first.is_frozen());

    let second = snapshot.scope_classifier().unwrap();
    assert!(!second.is_frozen());
    assert_eq!(second.dimension_names(), vec!["eq", "mm", "bgp", "tr"]);
}
