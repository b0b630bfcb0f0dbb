use generational_arena::{Arena, Index};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use termtree::Tree;
use tracing::instrument;

/// Indent unit for the plain-text tree dump.
const INDENT: &str = "  ";

/// Tree node in the arena-based genealogy structure.
#[derive(Debug)]
pub struct TreeNode<T> {
    /// Immutable identity of this node
    pub name: T,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, insertion order preserved
    pub children: Vec<Index>,
}

/// Arena-based tree structure with a name registry.
///
/// Uses generational arena for memory-safe node references and a name-keyed
/// index for O(1) lookups. Nodes are created once and never removed; the
/// structure is built once (`&mut self`) and then queried read-only (`&self`),
/// so concurrent reads after construction are safe while concurrent mutation
/// requires external synchronization.
#[derive(Debug)]
pub struct TreeArena<T> {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode<T>>,
    /// Every node ever created, keyed by its name
    nodes_by_name: HashMap<T, Index>,
    /// Index of the current root node, None for empty trees
    root: Option<Index>,
}

impl<T> Default for TreeArena<T>
where
    T: Eq + Hash + Clone + fmt::Display + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeArena<T>
where
    T: Eq + Hash + Clone + fmt::Display + fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            nodes_by_name: HashMap::new(),
            root: None,
        }
    }

    /// Return the node registered under `name`, creating and registering it
    /// first if necessary. The very first node created becomes the root
    /// candidate until `recompute_root` finds a better one.
    #[instrument(level = "trace", skip(self))]
    pub fn get_or_create(&mut self, name: T) -> Index {
        if let Some(&idx) = self.nodes_by_name.get(&name) {
            return idx;
        }
        let node = TreeNode {
            name: name.clone(),
            parent: None,
            children: Vec::new(),
        };
        let idx = self.arena.insert(node);
        self.nodes_by_name.insert(name, idx);
        if self.root.is_none() {
            self.root = Some(idx);
        }
        idx
    }

    /// Link `child` under `parent`: appends to the parent's children and sets
    /// the child's back-reference, always together. Re-linking an existing
    /// parent/child pair is a no-op, so re-feeding the same line does not
    /// produce duplicate children.
    ///
    /// The child must not already have a different parent: re-parenting would
    /// leave a stale entry in the old parent's children. Callers check for
    /// conflicts first, the way `FamilyTree::add_line` does.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: Index, child: Index) {
        if let Some(node) = self.arena.get(child) {
            if node.parent == Some(parent) {
                return;
            }
            debug_assert!(
                node.parent.is_none(),
                "child {} already has a different parent",
                node.name
            );
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode<T>> {
        self.arena.get(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn lookup(&self, name: &T) -> Option<Index> {
        self.nodes_by_name.get(name).copied()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Rescan the full registry for a parentless node and make it the root.
    ///
    /// Arena iteration is insertion-ordered, so with several parentless nodes
    /// the first one created wins. If no parentless node exists (malformed
    /// cyclic input) the previous root is kept.
    #[instrument(level = "trace", skip(self))]
    pub fn recompute_root(&mut self) {
        for (idx, node) in self.arena.iter() {
            if node.parent.is_none() {
                self.root = Some(idx);
                return;
            }
        }
    }

    /// Depth-first search for `name` through the subtree rooted at `start`,
    /// children left-to-right, first match wins.
    #[instrument(level = "trace", skip(self))]
    pub fn find_in_subtree(&self, start: Index, name: &T) -> Option<Index> {
        let node = self.get_node(start)?;
        if node.name == *name {
            return Some(start);
        }
        for &child in &node.children {
            if let Some(found) = self.find_in_subtree(child, name) {
                return Some(found);
            }
        }
        None
    }

    /// Ancestors of `idx`, exclusive of the node itself: immediate parent
    /// first, root last.
    #[instrument(level = "trace", skip(self))]
    pub fn ancestors(&self, idx: Index) -> Vec<Index> {
        let mut chain = Vec::new();
        let mut current = self.get_node(idx).and_then(|n| n.parent);
        while let Some(cur) = current {
            chain.push(cur);
            current = self.get_node(cur).and_then(|n| n.parent);
        }
        chain
    }

    /// Inclusive ancestor chain: the node itself first, then ancestors toward
    /// the root. This is the chain the MRCA query walks.
    #[instrument(level = "trace", skip(self))]
    pub fn self_and_ancestors(&self, idx: Index) -> Vec<Index> {
        let mut chain = vec![idx];
        chain.extend(self.ancestors(idx));
        chain
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator<'_, T> {
        TreeIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects the names of all leaf nodes (nodes with no children).
    ///
    /// Returns names as strings for easy display. Empty trees return an
    /// empty vector.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        let mut leaves = Vec::new();
        if let Some(root) = self.root {
            self.collect_leaves(root, &mut leaves);
        }
        leaves
    }

    fn collect_leaves(&self, node_idx: Index, leaves: &mut Vec<String>) {
        if let Some(node) = self.get_node(node_idx) {
            if node.children.is_empty() {
                leaves.push(node.name.to_string());
            } else {
                for &child in &node.children {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }

    /// Indented plain-text dump of the subtree rooted at `start`: one name
    /// per line, two spaces per depth level, children in insertion order.
    #[instrument(level = "debug", skip(self))]
    pub fn render(&self, start: Index) -> String {
        let mut out = String::new();
        self.render_with_indent(start, "", &mut out);
        out
    }

    fn render_with_indent(&self, idx: Index, indent: &str, out: &mut String) {
        if let Some(node) = self.get_node(idx) {
            out.push_str(indent);
            out.push_str(&node.name.to_string());
            out.push('\n');
            let child_indent = format!("{indent}{INDENT}");
            for &child in &node.children {
                self.render_with_indent(child, &child_indent, out);
            }
        }
    }

    /// Box-drawing rendering of the subtree rooted at `start` for terminal
    /// display.
    pub fn to_display_tree(&self, start: Index) -> Tree<String> {
        let name = self
            .get_node(start)
            .map(|n| n.name.to_string())
            .unwrap_or_default();
        let leaves: Vec<_> = self
            .get_node(start)
            .map(|n| {
                n.children
                    .iter()
                    .map(|&child| self.to_display_tree(child))
                    .collect()
            })
            .unwrap_or_default();
        Tree::new(name).with_leaves(leaves)
    }
}

pub struct TreeIterator<'a, T> {
    arena: &'a TreeArena<T>,
    stack: Vec<Index>,
}

impl<'a, T> TreeIterator<'a, T>
where
    T: Eq + Hash + Clone + fmt::Display + fmt::Debug,
{
    fn new(arena: &'a TreeArena<T>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a, T> Iterator for TreeIterator<'a, T>
where
    T: Eq + Hash + Clone + fmt::Display + fmt::Debug,
{
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeArena<String> {
        let mut arena = TreeArena::new();
        let root = arena.get_or_create("root".to_string());
        let a = arena.get_or_create("a".to_string());
        let b = arena.get_or_create("b".to_string());
        let c = arena.get_or_create("c".to_string());
        arena.add_child(root, a);
        arena.add_child(root, b);
        arena.add_child(a, c);
        arena
    }

    #[test]
    fn given_first_node_when_created_then_becomes_root() {
        let mut arena: TreeArena<String> = TreeArena::new();
        let idx = arena.get_or_create("solo".to_string());
        assert_eq!(arena.root(), Some(idx));
    }

    #[test]
    fn given_same_name_twice_when_get_or_create_then_returns_same_index() {
        let mut arena: TreeArena<String> = TreeArena::new();
        let first = arena.get_or_create("x".to_string());
        let second = arena.get_or_create("x".to_string());
        assert_eq!(first, second);
        assert_eq!(arena.len(), 1);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "already has a different parent")]
    fn given_child_with_other_parent_when_add_child_then_panics() {
        let mut arena: TreeArena<String> = TreeArena::new();
        let a = arena.get_or_create("a".to_string());
        let b = arena.get_or_create("b".to_string());
        let c = arena.get_or_create("c".to_string());
        arena.add_child(a, c);
        arena.add_child(b, c);
    }

    #[test]
    fn given_relink_of_same_pair_when_add_child_then_no_duplicate_children() {
        let mut arena: TreeArena<String> = TreeArena::new();
        let p = arena.get_or_create("p".to_string());
        let c = arena.get_or_create("c".to_string());
        arena.add_child(p, c);
        arena.add_child(p, c);
        assert_eq!(arena.get_node(p).unwrap().children.len(), 1);
        assert_eq!(arena.get_node(c).unwrap().parent, Some(p));
    }

    #[test]
    fn given_sample_tree_when_collecting_ancestors_then_orders_nearest_first() {
        let arena = sample();
        let c = arena.lookup(&"c".to_string()).unwrap();
        let names: Vec<String> = arena
            .ancestors(c)
            .into_iter()
            .map(|idx| arena.get_node(idx).unwrap().name.clone())
            .collect();
        assert_eq!(names, vec!["a".to_string(), "root".to_string()]);
    }

    #[test]
    fn given_sample_tree_when_chain_inclusive_then_starts_with_self() {
        let arena = sample();
        let c = arena.lookup(&"c".to_string()).unwrap();
        let chain = arena.self_and_ancestors(c);
        assert_eq!(chain[0], c);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn given_sample_tree_when_searching_subtree_then_finds_descendant() {
        let arena = sample();
        let a = arena.lookup(&"a".to_string()).unwrap();
        let found = arena.find_in_subtree(a, &"c".to_string());
        assert_eq!(found, arena.lookup(&"c".to_string()));
        assert_eq!(arena.find_in_subtree(a, &"b".to_string()), None);
    }

    #[test]
    fn given_sample_tree_when_rendering_then_indents_two_spaces_per_level() {
        let arena = sample();
        let dump = arena.render(arena.root().unwrap());
        assert_eq!(dump, "root\n  a\n    c\n  b\n");
    }

    #[test]
    fn given_sample_tree_when_iterating_then_preorder_left_to_right() {
        let arena = sample();
        let names: Vec<&str> = arena.iter().map(|(_, n)| n.name.as_str()).collect();
        assert_eq!(names, vec!["root", "a", "c", "b"]);
    }

    #[test]
    fn given_sample_tree_when_measuring_then_depth_and_leaves_match() {
        let arena = sample();
        assert_eq!(arena.depth(), 3);
        assert_eq!(arena.leaf_nodes(), vec!["c".to_string(), "b".to_string()]);
    }
}
