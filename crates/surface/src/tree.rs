//! The retained element tree.

use crate::element::ElementData;
use crate::node::{Node, NodeId};
use slotmap::SlotMap;

/// The retained element tree a player widget lives in.
///
/// The host shell owns the tree and hands it to the controller by mutable
/// reference; everything the controller does to structure, classes,
/// attributes and inline styles is recorded here for the shell to paint.
/// The root node is created with the tree and cannot be removed.
pub struct SurfaceTree {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl SurfaceTree {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::root());
        Self { nodes, root }
    }

    /// Get the root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Look up a node mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Check whether `id` is still in the tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Element data for a node, when it is an element.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(id).and_then(Node::as_element)
    }

    /// Mutable element data for a node.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, data: ElementData) -> NodeId {
        self.nodes.insert(Node::element(data))
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// An attached child is detached from its old parent first, which makes
    /// this the reparenting primitive.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_child(parent, child, usize::MAX);
    }

    /// Insert `child` as the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_child(parent, child, 0);
    }

    /// Insert `child` directly before `reference` under `parent`.
    ///
    /// Without a reference this appends. A reference that is not a child of
    /// `parent` leaves `child` detached.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        match reference {
            Some(reference) => {
                self.remove_from_parent(child);
                if let Some(index) = self.child_index(parent, reference) {
                    self.insert_child(parent, child, index);
                }
            }
            None => self.append_child(parent, child),
        }
    }

    /// Detach a node from its parent, keeping its subtree intact.
    pub fn remove_from_parent(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|c| *c != node);
        }
        if let Some(n) = self.nodes.get_mut(node) {
            n.parent = None;
        }
    }

    /// Delete a node and its whole subtree. The root is kept.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.root {
            return;
        }
        self.remove_from_parent(node);

        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(removed) = self.nodes.remove(id) {
                stack.extend(removed.children);
            }
        }
    }

    /// Get the parent of `node`.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    /// Get the children of `node` in order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Get the first child of `node`.
    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).first().copied()
    }

    /// Get the last child of `node`.
    pub fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).last().copied()
    }

    /// Get the sibling immediately before `node`.
    pub fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let index = siblings.iter().position(|&c| c == node)?;
        index.checked_sub(1).map(|i| siblings[i])
    }

    /// Get the sibling immediately after `node`.
    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let index = siblings.iter().position(|&c| c == node)?;
        siblings.get(index + 1).copied()
    }

    /// Walk from the parent of `node` up to the root.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node), |&id| self.parent(id))
    }

    /// Collect the subtree under `node` in tree order, `node` excluded.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    /// Check if `node` sits somewhere under `ancestor`.
    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(node).any(|id| id == ancestor)
    }

    /// Find all elements carrying `class`, in tree order.
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&id| self.has_class(id, class))
            .collect()
    }

    /// Find the first direct child of `parent` with the given tag.
    pub fn find_child_by_tag(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&id| self.element(id).map_or(false, |e| e.tag == tag))
    }

    /// Add a class to an element node.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            element.add_class(class);
        }
    }

    /// Remove a class from an element node.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            element.remove_class(class);
        }
    }

    /// Toggle a class on an element node; returns whether it is now present.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        self.element_mut(node)
            .map_or(false, |element| element.toggle_class(class))
    }

    /// Check if an element node carries a class.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).map_or(false, |e| e.has_class(class))
    }

    /// Set an attribute on an element node.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.set_attribute(name, value);
        }
    }

    /// An attribute of an element node.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attribute(name)
    }

    /// Set an inline style property on an element node.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.set_style(property, value);
        }
    }

    /// Remove an inline style property from an element node.
    pub fn remove_style(&mut self, node: NodeId, property: &str) {
        if let Some(element) = self.element_mut(node) {
            element.remove_style(property);
        }
    }

    /// An inline style property of an element node.
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.element(node)?.style(property)
    }

    /// Get the number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if only the root remains.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    fn child_index(&self, parent: NodeId, node: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == node)
    }

    // Single mutation primitive behind append/prepend/insert_before. The
    // index is clamped to the child count; inserting a node above itself or
    // above one of its ancestors is refused.
    fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return;
        }
        if self.is_descendant_of(parent, child) {
            return;
        }
        self.remove_from_parent(child);

        let siblings = &mut self.nodes[parent].children;
        let index = index.min(siblings.len());
        siblings.insert(index, child);
        self.nodes[child].parent = Some(parent);
    }
}

impl Default for SurfaceTree {
    fn default() -> Self {
        Self::new()
    }
}
