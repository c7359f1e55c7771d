use std::fmt;
use std::str::FromStr;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::NodeRepr;
use crate::domain::error::DomainError;

/// Child slot selector for insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Left,
    Right,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Left => write!(f, "left"),
            Position::Right => write!(f, "right"),
        }
    }
}

impl FromStr for Position {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Position::Left),
            "right" => Ok(Position::Right),
            other => Err(DomainError::InvalidPosition(other.to_string())),
        }
    }
}

/// Single vertex of a binary tree.
///
/// The integer value doubles as the node's identity: insert, delete, update
/// and search all resolve their target by value. With duplicate values they
/// act on the first pre-order match, a documented ambiguity of the data model.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pub value: i64,
    /// Index of the left child in the arena, None when absent
    pub left: Option<Index>,
    /// Index of the right child in the arena, None when absent
    pub right: Option<Index>,
}

impl Node {
    fn leaf(value: i64) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }
}

/// Arena-based binary tree.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// All mutating operations work in place; deleted or displaced subtrees are
/// freed from the arena immediately. There is no ordering invariant, this is
/// not a search tree: insert targets a parent by identity, not by comparison.
#[derive(Debug, Clone)]
pub struct BinaryTree {
    /// Arena storage for all tree nodes
    arena: Arena<Node>,
    /// Index of the root node, None for the empty tree
    root: Option<Index>,
}

impl Default for BinaryTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural equality: same shape and values, independent of arena layout.
impl PartialEq for BinaryTree {
    fn eq(&self, other: &Self) -> bool {
        self.to_repr() == other.to_repr()
    }
}

impl Eq for BinaryTree {}

impl BinaryTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Tree holding a single root node.
    pub fn with_root(value: i64) -> Self {
        let mut tree = Self::new();
        tree.root = Some(tree.arena.insert(Node::leaf(value)));
        tree
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn get(&self, idx: Index) -> Option<&Node> {
        self.arena.get(idx)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Height of the tree: 0 for the empty tree, 1 for a single node.
    #[instrument(level = "trace", skip(self))]
    pub fn height(&self) -> usize {
        self.height_below(self.root)
    }

    fn height_below(&self, slot: Option<Index>) -> usize {
        match slot.and_then(|idx| self.arena.get(idx)) {
            Some(node) => 1 + self.height_below(node.left).max(self.height_below(node.right)),
            None => 0,
        }
    }

    /// Values of all leaf nodes in left-to-right (pre-order) order.
    #[instrument(level = "trace", skip(self))]
    pub fn leaves(&self) -> Vec<i64> {
        let mut leaves = Vec::new();
        self.collect_leaves(self.root, &mut leaves);
        leaves
    }

    fn collect_leaves(&self, slot: Option<Index>, leaves: &mut Vec<i64>) {
        if let Some(node) = slot.and_then(|idx| self.arena.get(idx)) {
            if node.left.is_none() && node.right.is_none() {
                leaves.push(node.value);
            }
            self.collect_leaves(node.left, leaves);
            self.collect_leaves(node.right, leaves);
        }
    }

    /// First node with the given value in pre-order (self, left, right).
    fn find_first(&self, value: i64) -> Option<Index> {
        self.find_below(self.root, value)
    }

    fn find_below(&self, slot: Option<Index>, value: i64) -> Option<Index> {
        let idx = slot?;
        let node = self.arena.get(idx)?;
        if node.value == value {
            return Some(idx);
        }
        self.find_below(node.left, value)
            .or_else(|| self.find_below(node.right, value))
    }

    /// True iff any node holds the given value (pre-order, short-circuiting).
    pub fn contains(&self, value: i64) -> bool {
        self.find_first(value).is_some()
    }

    /// Attach a new leaf under the first node matching `parent_value`.
    ///
    /// An occupied child slot is silently overwritten: the displaced subtree
    /// is discarded and its nodes freed. This is part of the contract, not a
    /// side effect. Returns false and leaves the tree unchanged when no node
    /// matches `parent_value`.
    #[instrument(level = "debug", skip(self))]
    pub fn insert(&mut self, parent_value: i64, new_value: i64, position: Position) -> bool {
        let Some(parent_idx) = self.find_first(parent_value) else {
            return false;
        };
        let child_idx = self.arena.insert(Node::leaf(new_value));
        let displaced = match self.arena.get_mut(parent_idx) {
            Some(parent) => match position {
                Position::Left => parent.left.replace(child_idx),
                Position::Right => parent.right.replace(child_idx),
            },
            None => {
                self.arena.remove(child_idx);
                return false;
            }
        };
        if let Some(old_idx) = displaced {
            self.remove_subtree(old_idx);
        }
        true
    }

    /// Remove every node whose value matches, together with its entire
    /// subtree. Children are filtered before the current node is tested; a
    /// matching root empties the tree. Absent values are a structural no-op.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, value: i64) {
        self.root = self.filter_below(self.root, value);
    }

    fn filter_below(&mut self, slot: Option<Index>, value: i64) -> Option<Index> {
        let idx = slot?;
        let (left, right) = match self.arena.get(idx) {
            Some(node) => (node.left, node.right),
            None => return None,
        };
        let new_left = self.filter_below(left, value);
        let new_right = self.filter_below(right, value);
        let matches = match self.arena.get_mut(idx) {
            Some(node) => {
                node.left = new_left;
                node.right = new_right;
                node.value == value
            }
            None => return None,
        };
        if matches {
            self.remove_subtree(idx);
            None
        } else {
            Some(idx)
        }
    }

    /// Set the value of the first pre-order node matching `old_value`.
    /// Returns false when no node matches; duplicates beyond the first
    /// match are left untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn update(&mut self, old_value: i64, new_value: i64) -> bool {
        match self.find_first(old_value).and_then(|idx| self.arena.get_mut(idx)) {
            Some(node) => {
                node.value = new_value;
                true
            }
            None => false,
        }
    }

    /// Free a subtree from the arena with an explicit stack.
    fn remove_subtree(&mut self, root_idx: Index) {
        let mut stack = vec![root_idx];
        while let Some(idx) = stack.pop() {
            if let Some(node) = self.arena.remove(idx) {
                if let Some(left) = node.left {
                    stack.push(left);
                }
                if let Some(right) = node.right {
                    stack.push(right);
                }
            }
        }
    }

    pub fn iter_preorder(&self) -> PreOrderIter {
        PreOrderIter::new(self)
    }

    pub fn iter_inorder(&self) -> InOrderIter {
        InOrderIter::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIter {
        PostOrderIter::new(self)
    }

    pub fn preorder(&self) -> Vec<i64> {
        self.iter_preorder().collect()
    }

    pub fn inorder(&self) -> Vec<i64> {
        self.iter_inorder().collect()
    }

    pub fn postorder(&self) -> Vec<i64> {
        self.iter_postorder().collect()
    }

    /// Nested representation of the tree, None for the empty tree.
    pub fn to_repr(&self) -> Option<NodeRepr> {
        self.repr_below(self.root)
    }

    fn repr_below(&self, slot: Option<Index>) -> Option<NodeRepr> {
        let node = slot.and_then(|idx| self.arena.get(idx))?;
        Some(NodeRepr {
            value: node.value,
            left: self.repr_below(node.left).map(Box::new),
            right: self.repr_below(node.right).map(Box::new),
        })
    }

    /// Build a tree from its nested representation.
    pub fn from_repr(repr: Option<&NodeRepr>) -> Self {
        let mut tree = Self::new();
        tree.root = repr.map(|r| Self::graft(&mut tree.arena, r));
        tree
    }

    fn graft(arena: &mut Arena<Node>, repr: &NodeRepr) -> Index {
        let left = repr.left.as_deref().map(|r| Self::graft(arena, r));
        let right = repr.right.as_deref().map(|r| Self::graft(arena, r));
        arena.insert(Node {
            value: repr.value,
            left,
            right,
        })
    }
}

/// Pre-order traversal with an explicit stack (no recursion depth limit).
pub struct PreOrderIter<'a> {
    tree: &'a BinaryTree,
    stack: Vec<Index>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a BinaryTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl Iterator for PreOrderIter<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = self.tree.get(idx)?;
        // Right first so the left subtree is visited before it
        if let Some(right) = node.right {
            self.stack.push(right);
        }
        if let Some(left) = node.left {
            self.stack.push(left);
        }
        Some(node.value)
    }
}

/// In-order traversal via the classic left-spine stack.
pub struct InOrderIter<'a> {
    tree: &'a BinaryTree,
    stack: Vec<Index>,
    current: Option<Index>,
}

impl<'a> InOrderIter<'a> {
    fn new(tree: &'a BinaryTree) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: tree.root(),
        }
    }
}

impl Iterator for InOrderIter<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.current {
            self.stack.push(idx);
            self.current = self.tree.get(idx).and_then(|n| n.left);
        }
        let idx = self.stack.pop()?;
        let node = self.tree.get(idx)?;
        self.current = node.right;
        Some(node.value)
    }
}

/// Post-order traversal with a visited marker per stack entry.
pub struct PostOrderIter<'a> {
    tree: &'a BinaryTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a BinaryTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl Iterator for PostOrderIter<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get(idx) {
                if visited {
                    return Some(node.value);
                }
                self.stack.push((idx, true));
                if let Some(right) = node.right {
                    self.stack.push((right, false));
                }
                if let Some(left) = node.left {
                    self.stack.push((left, false));
                }
            }
        }
        None
    }
}
