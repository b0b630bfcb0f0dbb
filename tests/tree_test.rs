//! End-to-end tests over a built tree: rendering, traversal, MRCA

use kintree::{most_recent_common_ancestor, FamilyTree, TreeError};

fn sample() -> FamilyTree<String> {
    let mut tree = FamilyTree::from_str_names();
    tree.add_lines(["Root:A,B", "A:C,D", "B:E"]).unwrap();
    tree
}

#[test]
fn given_sample_tree_when_rendering_then_insertion_order_and_indentation_hold() {
    let tree = sample();
    let expected = "\
Root
  A
    C
    D
  B
    E
";
    let arena = tree.arena();
    assert_eq!(arena.render(arena.root().unwrap()), expected);
    assert_eq!(tree.to_string(), format!("Family Tree:\n\n{expected}"));
}

#[test]
fn given_sample_tree_when_rendering_subtree_then_starts_at_indent_zero() {
    let tree = sample();
    let arena = tree.arena();
    let a = arena.lookup(&"A".to_string()).unwrap();
    assert_eq!(arena.render(a), "A\n  C\n  D\n");
}

#[test]
fn given_sample_tree_when_searching_subtree_then_scoped_to_descendants() {
    let tree = sample();
    let arena = tree.arena();
    let root = arena.root().unwrap();
    let b = arena.lookup(&"B".to_string()).unwrap();

    assert_eq!(
        arena.find_in_subtree(root, &"E".to_string()),
        arena.lookup(&"E".to_string())
    );
    // C lives under A, so a search under B misses it
    assert_eq!(arena.find_in_subtree(b, &"C".to_string()), None);
}

#[test]
fn given_sample_tree_when_querying_mrca_matrix_then_matches_expectations() {
    let tree = sample();
    let arena = tree.arena();

    for (a, b, want) in [
        ("C", "D", "A"),
        ("C", "E", "Root"),
        ("A", "A", "A"),
        ("C", "Root", "Root"),
        ("D", "B", "Root"),
    ] {
        let idx = most_recent_common_ancestor(arena, &a.to_string(), &b.to_string())
            .unwrap()
            .expect("common ancestor");
        assert_eq!(
            arena.get_node(idx).unwrap().name,
            want,
            "mrca({a}, {b}) should be {want}"
        );
    }
}

#[test]
fn given_unknown_node_when_querying_then_error_names_the_missing_key() {
    let tree = sample();
    let err = tree
        .most_recent_common_ancestor(&"C".to_string(), &"Zzz".to_string())
        .unwrap_err();
    match err {
        TreeError::NodeNotFound(name) => assert_eq!(name, "Zzz"),
        other => panic!("expected NodeNotFound, got {other:?}"),
    }
}

#[test]
fn given_sample_tree_when_listing_leaves_then_left_to_right_order() {
    let tree = sample();
    assert_eq!(
        tree.arena().leaf_nodes(),
        vec!["C".to_string(), "D".to_string(), "E".to_string()]
    );
}

#[test]
fn given_sample_tree_when_measuring_then_depth_counts_levels() {
    let tree = sample();
    assert_eq!(tree.arena().depth(), 3);
}

#[test]
fn given_fancy_rendering_when_converted_then_root_label_matches() {
    let tree = sample();
    let arena = tree.arena();
    let display = arena.to_display_tree(arena.root().unwrap()).to_string();
    assert!(display.starts_with("Root"));
    for name in ["A", "B", "C", "D", "E"] {
        assert!(display.contains(name), "missing {name} in {display}");
    }
}

#[test]
fn given_empty_tree_when_displayed_then_header_only() {
    let tree = FamilyTree::from_str_names();
    assert_eq!(tree.to_string(), "Family Tree:\n\n");
}
