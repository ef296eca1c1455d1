use std::collections::HashSet;

use partition_overlap::label::ClassLabel;

#[test]
fn label_identity_ignores_order() {
    let a = ClassLabel::new(["eq", "mm"]);
    let b = ClassLabel::new(["mm", "eq"]);
    assert_eq!(a, b);

    let set: HashSet<ClassLabel> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn label_display_keeps_given_order() {
    assert_eq!(ClassLabel::new(["mm", "eq"]).to_string(), "mm eq");
    assert_eq!(ClassLabel::with_separator(["eq", "tr"], "+").to_string(), "eq+tr");
}

#[test]
fn label_duplicates_are_dropped() {
    let label = ClassLabel::new(["eq", "eq", "mm"]);
    assert_eq!(label.arity(), 2);
    assert_eq!(label.names(), &["eq".to_string(), "mm".to_string()]);
}

#[test]
fn label_parse_with_separator() {
    let label = ClassLabel::parse("eq + bgp", "+");
    assert_eq!(label.names(), &["eq".to_string(), "bgp".to_string()]);
    assert_eq!(label.separator(), "+");

    let spaced = ClassLabel::parse("  eq   tr ", " ");
    assert_eq!(spaced.to_string(), "eq tr");
    assert_eq!(ClassLabel::from("tr eq"), spaced);
}

#[test]
fn label_contains() {
    let label = ClassLabel::from("tr eq bgp");
    assert!(label.contains("bgp"));
    assert!(label.contains("tr"));
    assert!(!label.contains("mm"));
    assert!(ClassLabel::from("").is_empty());
}

#[test]
fn label_ordering_by_arity_then_name() {
    let mut labels = vec![
        ClassLabel::from("eq mm"),
        ClassLabel::from("tr"),
        ClassLabel::from("bgp"),
        ClassLabel::from("bgp eq mm"),
    ];
    labels.sort();
    let shown: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
    assert_eq!(shown, vec!["bgp", "tr", "eq mm", "bgp eq mm"]);
}
