//! Nodes of the surface tree.

use crate::element::ElementData;
use slotmap::new_key_type;
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a node in a [`SurfaceTree`](crate::SurfaceTree).
    pub struct NodeId;
}

/// What a node is.
#[derive(Clone, Debug)]
pub enum NodeData {
    /// The single root everything else hangs off.
    Root,
    /// An element carrying a tag, attributes, classes and inline styles.
    Element(ElementData),
}

/// One record in the tree.
///
/// Sibling order lives in the parent's child list; nodes carry no sibling
/// links of their own.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 8]>,
}

impl Node {
    pub(crate) fn root() -> Self {
        Self {
            data: NodeData::Root,
            parent: None,
            children: SmallVec::new(),
        }
    }

    pub(crate) fn element(data: ElementData) -> Self {
        Self {
            data: NodeData::Element(data),
            parent: None,
            children: SmallVec::new(),
        }
    }

    /// Get the node kind and payload.
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Get the parent, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Get the children in order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Check if this is the tree root.
    pub fn is_root(&self) -> bool {
        matches!(self.data, NodeData::Root)
    }

    /// Get element data if this is an element.
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(data) => Some(data),
            NodeData::Root => None,
        }
    }

    /// Get mutable element data if this is an element.
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(data) => Some(data),
            NodeData::Root => None,
        }
    }
}
