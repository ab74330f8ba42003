use super::*;
use crate::record::ImageRecord;
use crate::storage::{MockRecordStore, StorageError};

fn sample_set() -> RecordSet {
    let mut set = RecordSet::new();
    set.insert(
        "cat on mat",
        vec![
            ImageRecord::new("a.png"),
            ImageRecord::new("b.png").with_votes(["m1", "m2"]),
            ImageRecord::new("c.png")
                .with_votes(["m1", "m2", "m3", "m4"])
                .with_label(Label::True),
        ],
    );
    set.insert("dog", vec![ImageRecord::new("d.png")]);
    set
}

fn edits(pairs: &[(&str, Label)]) -> PendingEdits {
    pairs
        .iter()
        .map(|(path, label)| (path.to_string(), *label))
        .collect()
}

#[test]
fn test_reconcile_applies_changes_by_path() {
    let mut set = sample_set();

    let outcome = reconcile(
        &mut set,
        "cat on mat",
        &edits(&[("b.png", Label::Ambiguous), ("a.png", Label::False)]),
    )
    .expect("reconcile");

    assert_eq!(outcome.updated, 2);
    assert_eq!(outcome.changed_paths, vec!["a.png", "b.png"]);
    assert!(outcome.faults.is_empty());

    let records = set.get("cat on mat").unwrap();
    assert_eq!(records[0].label, Some(Label::False));
    assert_eq!(records[1].label, Some(Label::Ambiguous));
}

#[test]
fn test_reconcile_unchanged_labels_count_zero() {
    let mut set = sample_set();
    let before = set.clone();

    let outcome = reconcile(&mut set, "cat on mat", &edits(&[("c.png", Label::True)]))
        .expect("reconcile");

    assert_eq!(outcome.updated, 0);
    assert!(!outcome.has_changes());
    assert_eq!(set, before);
}

#[test]
fn test_reconcile_single_change_among_many() {
    let mut set = sample_set();
    set.get_mut("cat on mat").unwrap()[0].label = Some(Label::False);
    set.get_mut("cat on mat").unwrap()[1].label = Some(Label::Ambiguous);
    let before = set.clone();

    let outcome = reconcile(
        &mut set,
        "cat on mat",
        &edits(&[
            ("a.png", Label::False),
            ("b.png", Label::True),
            ("c.png", Label::True),
        ]),
    )
    .expect("reconcile");

    assert_eq!(outcome.updated, 1);

    let after = set.get("cat on mat").unwrap();
    let old = before.get("cat on mat").unwrap();
    let differing: Vec<_> = after
        .iter()
        .zip(old)
        .filter(|(a, b)| a != b)
        .map(|(a, _)| a.path.as_str())
        .collect();
    assert_eq!(differing, vec!["b.png"]);
}

#[test]
fn test_reconcile_unknown_path_is_fault_others_apply() {
    let mut set = sample_set();

    let outcome = reconcile(
        &mut set,
        "cat on mat",
        &edits(&[("a.png", Label::True), ("d.png", Label::True)]),
    )
    .expect("reconcile");

    assert_eq!(outcome.updated, 1);
    assert_eq!(
        outcome.faults,
        vec![ConsistencyFault {
            caption: "cat on mat".to_string(),
            path: "d.png".to_string(),
        }]
    );
    assert!(outcome.faults[0].to_string().contains("d.png"));
    // Lookup is scoped to the caption: the record under "dog" is untouched.
    assert_eq!(set.get("dog").unwrap()[0].label, None);
}

#[test]
fn test_reconcile_unknown_caption() {
    let mut set = sample_set();

    let result = reconcile(&mut set, "bird", &edits(&[("a.png", Label::True)]));

    assert!(matches!(result, Err(MergeError::UnknownCaption { ref caption }) if caption == "bird"));
}

#[test]
fn test_reconcile_and_persist_skips_write_without_changes() {
    let store = MockRecordStore::new();
    let mut set = sample_set();

    let report = reconcile_and_persist(
        &store,
        "set.json",
        &mut set,
        "cat on mat",
        &edits(&[("c.png", Label::True)]),
    )
    .expect("save");

    assert!(!report.written);
    assert_eq!(store.write_count(), 0);
    assert!(store.get("set.json").is_none());
}

#[test]
fn test_reconcile_and_persist_writes_changes() {
    let store = MockRecordStore::new();
    let mut set = sample_set();

    let report = reconcile_and_persist(
        &store,
        "set.json",
        &mut set,
        "cat on mat",
        &edits(&[("b.png", Label::True)]),
    )
    .expect("save");

    assert!(report.written);
    assert_eq!(report.outcome.updated, 1);
    assert_eq!(store.write_count(), 1);

    let reloaded = codec::parse(&store.get("set.json").unwrap()).expect("parse");
    assert_eq!(reloaded, set);
}

#[test]
fn test_persist_failure_keeps_memory() {
    let store = MockRecordStore::new();
    store.set_fail_writes(true);
    let mut set = sample_set();

    let result = reconcile_and_persist(
        &store,
        "set.json",
        &mut set,
        "cat on mat",
        &edits(&[("a.png", Label::Ambiguous)]),
    );

    match result {
        Err(MergeError::Persist { id, source }) => {
            assert_eq!(id, "set.json");
            assert!(matches!(
                source,
                codec::CodecError::Storage(StorageError::WriteFailed { .. })
            ));
        }
        other => panic!("expected persist failure, got {:?}", other),
    }
    assert_eq!(
        set.get("cat on mat").unwrap()[0].label,
        Some(Label::Ambiguous)
    );
}
