use avl::ingest::{self, TreeRecord};
use avl::{MalformedTreeData, Tree};

use crate::init_logging;

#[test]
fn imports_an_unbalanced_chain() {
    init_logging();

    let json = r#"{
        "key": 10, "left": [], "right": [
            { "key": 20, "left": [], "right": [
                { "key": 30, "left": [], "right": [
                    { "key": 40, "left": [], "right": [] }
                ] }
            ] }
        ]
    }"#;

    let tree = ingest::from_json::<i32>(json).unwrap();

    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [10, 20, 30, 40]);
    assert_eq!(tree.height(), 3);
    assert!(tree.is_well_balanced());
}

#[test]
fn imported_tree_accepts_further_mutation() {
    init_logging();

    let json = r#"{ "key": 5, "left": [ { "key": 3, "left": [], "right": [] } ], "right": [] }"#;
    let mut tree = ingest::from_json::<i32>(json).unwrap();

    tree.extend([1, 2, 4, 6, 7]);
    assert!(tree.delete(&5));

    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 6, 7]);
    assert_eq!(tree.validate(), Ok(()));
}

#[test]
fn converted_record_accepts_insert() {
    init_logging();

    let json = r#"{ "key": 1, "right": [ { "key": 2, "right": [
        { "key": 3, "right": [ { "key": 4 } ] }
    ] } ] }"#;
    let record: TreeRecord<i32> = serde_json::from_str(json).unwrap();
    let mut tree = Tree::try_from(record).unwrap();

    tree.insert(5);

    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    assert_eq!(tree.validate(), Ok(()));
    assert!(tree.is_well_balanced());
}

#[test]
fn imports_string_keys() {
    let json = r#"{ "key": "m", "left": [ { "key": "c" } ], "right": [ { "key": "x" } ] }"#;
    let tree = ingest::from_json::<String>(json).unwrap();

    assert!(tree.contains(&"c".to_owned()));
    assert_eq!(tree.len(), 3);
}

#[test]
fn rejects_malformed_records() {
    init_logging();

    let missing_key = r#"{ "key": 1, "right": [ { "right": [] } ] }"#;
    assert!(matches!(
        ingest::from_json::<i32>(missing_key),
        Err(MalformedTreeData::MissingKey { path }) if path == "root.right"
    ));

    let crowded = r#"{ "key": 1, "left": [ { "key": 0 }, { "key": -1 } ] }"#;
    assert!(matches!(
        ingest::from_json::<i32>(crowded),
        Err(MalformedTreeData::TooManyChildren { side: "left", count: 2, .. })
    ));

    assert!(matches!(
        ingest::from_json::<i32>("[1, 2, 3]"),
        Err(MalformedTreeData::Json(_))
    ));
}

#[test]
fn export_keeps_shape() {
    let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    let record = tree.to_record();

    assert_eq!(record.key, Some(2));
    assert_eq!(record.left.len(), 1);
    assert_eq!(record.right[0].key, Some(3));
    assert_eq!(Tree::try_from(record).unwrap(), tree);
}
