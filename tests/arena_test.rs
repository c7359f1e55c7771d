//! Tests for the arena-backed binary tree engine

use rstest::{fixture, rstest};

use treechat::domain::{BinaryTree, NodeRepr, Position};

/// Scenario tree:
///
/// ```text
///       10
///      /  \
///     5    15
/// ```
#[fixture]
fn small_tree() -> BinaryTree {
    let mut tree = BinaryTree::with_root(10);
    assert!(tree.insert(10, 5, Position::Left));
    assert!(tree.insert(10, 15, Position::Right));
    tree
}

#[rstest]
fn given_root_with_two_children_when_traversing_then_orders_match(small_tree: BinaryTree) {
    assert_eq!(small_tree.inorder(), vec![5, 10, 15]);
    assert_eq!(small_tree.preorder(), vec![10, 5, 15]);
    assert_eq!(small_tree.postorder(), vec![5, 15, 10]);
}

#[rstest]
fn given_tree_when_traversing_then_all_orders_are_permutations(small_tree: BinaryTree) {
    let count = small_tree.node_count();
    let mut inorder = small_tree.inorder();
    let mut preorder = small_tree.preorder();
    let mut postorder = small_tree.postorder();
    assert_eq!(inorder.len(), count);
    assert_eq!(preorder.len(), count);
    assert_eq!(postorder.len(), count);

    inorder.sort_unstable();
    preorder.sort_unstable();
    postorder.sort_unstable();
    assert_eq!(inorder, preorder);
    assert_eq!(inorder, postorder);
}

#[test]
fn given_empty_tree_when_measuring_then_height_is_zero() {
    let tree = BinaryTree::new();
    assert_eq!(tree.height(), 0);
    assert!(tree.inorder().is_empty());
    assert!(tree.leaves().is_empty());
}

#[test]
fn given_single_node_when_measuring_then_height_is_one() {
    assert_eq!(BinaryTree::with_root(42).height(), 1);
}

#[test]
fn given_left_leaning_tree_when_inspecting_then_height_and_leaves_match() {
    // 7 with left child 5 only
    let mut tree = BinaryTree::with_root(7);
    assert!(tree.insert(7, 5, Position::Left));

    assert_eq!(tree.height(), 2);
    assert_eq!(tree.leaves(), vec![5]);
}

#[rstest]
fn given_tree_when_searching_then_present_values_are_found(small_tree: BinaryTree) {
    for value in small_tree.preorder() {
        assert!(small_tree.contains(value));
    }
    assert!(!small_tree.contains(99));
}

#[rstest]
fn given_successful_insert_when_searching_then_new_value_is_found(mut small_tree: BinaryTree) {
    assert!(small_tree.insert(5, 3, Position::Left));
    assert!(small_tree.contains(3));
}

#[rstest]
fn given_missing_parent_when_inserting_then_tree_is_unchanged(mut small_tree: BinaryTree) {
    let before = small_tree.clone();
    assert!(!small_tree.insert(4, 8, Position::Left));
    assert_eq!(small_tree, before);
}

#[rstest]
fn given_absent_value_when_deleting_then_tree_is_structurally_equal(mut small_tree: BinaryTree) {
    let before = small_tree.clone();
    small_tree.delete(99);
    assert_eq!(small_tree, before);
}

#[test]
fn given_node_with_descendants_when_deleting_then_whole_subtree_is_gone() {
    let mut tree = BinaryTree::with_root(1);
    assert!(tree.insert(1, 2, Position::Left));
    assert!(tree.insert(2, 4, Position::Left));
    assert!(tree.insert(2, 5, Position::Right));
    assert!(tree.insert(1, 3, Position::Right));

    tree.delete(2);

    assert!(!tree.contains(2));
    assert!(!tree.contains(4));
    assert!(!tree.contains(5));
    assert!(tree.contains(1));
    assert!(tree.contains(3));
    assert_eq!(tree.node_count(), 2);
}

#[test]
fn given_matching_root_when_deleting_then_tree_is_empty() {
    let mut tree = BinaryTree::with_root(10);
    assert!(tree.insert(10, 5, Position::Left));

    tree.delete(10);

    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 0);
    assert_eq!(tree.height(), 0);
}

#[test]
fn given_duplicate_values_when_deleting_then_every_match_is_removed() {
    // 1 with children 2 and 2, the left 2 has child 3
    let mut tree = BinaryTree::with_root(1);
    assert!(tree.insert(1, 2, Position::Left));
    assert!(tree.insert(1, 2, Position::Right));
    assert!(tree.insert(2, 3, Position::Left));

    tree.delete(2);

    assert_eq!(tree.preorder(), vec![1]);
    assert_eq!(tree.node_count(), 1);
}

#[rstest]
fn given_existing_value_when_updating_then_only_value_changes(mut small_tree: BinaryTree) {
    assert!(small_tree.update(5, 6));
    assert_eq!(small_tree.inorder(), vec![6, 10, 15]);
}

#[rstest]
fn given_missing_value_when_updating_then_returns_false(mut small_tree: BinaryTree) {
    let before = small_tree.clone();
    assert!(!small_tree.update(99, 1));
    assert_eq!(small_tree, before);
}

#[test]
fn given_occupied_slot_when_inserting_then_old_subtree_is_silently_replaced() {
    let mut tree = BinaryTree::with_root(10);
    assert!(tree.insert(10, 5, Position::Left));
    assert!(tree.insert(5, 3, Position::Left));

    // Overwrites the whole subtree rooted at 5
    assert!(tree.insert(10, 7, Position::Left));

    assert_eq!(tree.inorder(), vec![7, 10]);
    assert!(!tree.contains(5));
    assert!(!tree.contains(3));
}

#[test]
fn given_leaf_collection_when_walking_then_order_is_left_to_right() {
    //        1
    //       / \
    //      2   3
    //     / \    \
    //    4   5    6
    let mut tree = BinaryTree::with_root(1);
    assert!(tree.insert(1, 2, Position::Left));
    assert!(tree.insert(1, 3, Position::Right));
    assert!(tree.insert(2, 4, Position::Left));
    assert!(tree.insert(2, 5, Position::Right));
    assert!(tree.insert(3, 6, Position::Right));

    assert_eq!(tree.leaves(), vec![4, 5, 6]);
}

#[rstest]
fn given_tree_when_round_tripping_repr_then_structure_survives(small_tree: BinaryTree) {
    let repr = small_tree.to_repr().expect("non-empty tree");
    let restored = BinaryTree::from_repr(Some(&repr));
    assert_eq!(restored, small_tree);
}

#[test]
fn given_nested_wire_json_when_deserializing_then_tree_matches() {
    let json = r#"{"value":7,"left":{"value":5,"left":null,"right":null},"right":null}"#;
    let repr: NodeRepr = serde_json::from_str(json).expect("valid wire shape");
    let tree = BinaryTree::from_repr(Some(&repr));

    assert_eq!(tree.height(), 2);
    assert_eq!(tree.leaves(), vec![5]);
    assert_eq!(tree.preorder(), vec![7, 5]);

    let back = serde_json::to_string(&tree.to_repr().expect("non-empty")).expect("serialize");
    assert_eq!(back, json);
}

#[test]
fn given_empty_tree_when_converting_then_repr_is_none() {
    assert_eq!(BinaryTree::new().to_repr(), None);
    assert!(BinaryTree::from_repr(None).is_empty());
}
