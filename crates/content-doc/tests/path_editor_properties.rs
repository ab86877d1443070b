use content_doc::editor::{slot_index, MAX_INDEX_GAP};
use content_doc::{add_to_array, get, get_array, remove_from_array, set, Document, Mapping, Path, PathStep};
use proptest::prelude::*;
use serde_json::Value;

fn arb_scalar() -> impl Strategy<Value = Document> {
    prop_oneof![
        Just(Document::Null),
        any::<bool>().prop_map(Document::from),
        any::<i64>().prop_map(Document::from),
        "[a-z]{0,6}".prop_map(Document::from),
    ]
}

fn arb_document() -> impl Strategy<Value = Document> {
    arb_scalar().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Document::from),
            prop::collection::vec(("[a-c]", inner), 0..4)
                .prop_map(|entries| Document::from(entries.into_iter().collect::<Mapping>())),
        ]
    })
}

fn arb_step() -> impl Strategy<Value = PathStep> {
    prop_oneof![
        4 => "[a-c]".prop_map(PathStep::Key),
        4 => (0usize..4).prop_map(PathStep::Index),
        1 => (4usize..40).prop_map(PathStep::Index),
        1 => prop_oneof![MAX_INDEX_GAP..=usize::MAX, Just(usize::MAX)].prop_map(PathStep::Index),
    ]
}

fn arb_path() -> impl Strategy<Value = Path> {
    prop::collection::vec(arb_step(), 1..5)
}

/// `path` with every index step replaced by the slot a write through `root`
/// lands at.
fn landing_path(root: &Document, path: &[PathStep]) -> Path {
    let mut current = Some(root);
    path.iter()
        .map(|step| match step {
            PathStep::Index(index) => {
                let items = current.and_then(Document::as_array).unwrap_or(&[]);
                let slot = slot_index(items.len(), *index);
                current = items.get(slot);
                PathStep::Index(slot)
            }
            PathStep::Key(key) => {
                current = current
                    .and_then(Document::as_object)
                    .and_then(|entries| entries.get(key.as_str()));
                step.clone()
            }
        })
        .collect()
}

/// A deep copy that shares nothing with the document.
fn snapshot(doc: &Document) -> Value {
    Value::from(doc.clone())
}

proptest! {
    #[test]
    fn empty_path_is_a_no_op(root in arb_document(), value in arb_document()) {
        let out = set(&root, &[], value);
        prop_assert_eq!(&out, &root);
        if root.is_array() || root.is_object() {
            prop_assert!(out.ptr_eq(&root));
        }
    }

    #[test]
    fn written_value_reads_back(root in arb_document(), path in arb_path(), value in arb_document()) {
        let out = set(&root, &path, value.clone());
        prop_assert_eq!(get(&out, &landing_path(&root, &path)), Some(&value));
    }

    #[test]
    fn input_root_is_never_modified(root in arb_document(), path in arb_path(), value in arb_document()) {
        let before = snapshot(&root);
        let _ = set(&root, &path, value.clone());
        let _ = add_to_array(&root, &path, value);
        let _ = remove_from_array(&root, &path, 0);
        prop_assert_eq!(snapshot(&root), before);
    }

    #[test]
    fn siblings_are_preserved(root in arb_document(), parent in prop::collection::vec(arb_step(), 0..3), value in arb_document()) {
        let mut target = parent.clone();
        target.push(PathStep::key("a"));
        let mut sibling = parent;
        sibling.push(PathStep::key("b"));

        let before = get(&root, &sibling).cloned();
        let out = set(&root, &target, value);
        if let Some(before) = before {
            prop_assert_eq!(get(&out, &sibling), Some(&before));
        }
    }

    #[test]
    fn append_adds_one_element_at_the_end(root in arb_document(), path in arb_path(), item in arb_document()) {
        let landing = landing_path(&root, &path);
        let mut expected = get_array(&root, &landing).to_vec();
        expected.push(item.clone());
        let out = add_to_array(&root, &path, item);
        prop_assert_eq!(get_array(&out, &landing), expected.as_slice());
    }

    #[test]
    fn remove_keeps_order_of_the_rest(root in arb_document(), path in arb_path(), index in 0usize..5) {
        let landing = landing_path(&root, &path);
        let expected: Vec<Document> = get_array(&root, &landing)
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, item)| item.clone())
            .collect();
        let out = remove_from_array(&root, &path, index);
        prop_assert!(get(&out, &landing).is_some_and(Document::is_array));
        prop_assert_eq!(get_array(&out, &landing), expected.as_slice());
    }
}
