//! Input events and bindings.
//!
//! The host shell translates its own pointer/touch machinery into the two
//! affordance kinds a player widget cares about and delivers them here. The
//! controller registers a binding per control node at surface creation and
//! dispatches on the resolved action token, so no callbacks cross the seam.

use crate::node::NodeId;
use std::collections::HashMap;

/// Kind of input affordance event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// A press (tap, click) on a control.
    Press,
    /// A slider drag carrying the slider's current value.
    SliderInput,
}

/// An input event delivered by the host shell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputEvent {
    /// Which affordance fired.
    pub kind: InputKind,
    /// The node the event targets.
    pub target: NodeId,
    /// Slider value, present for `SliderInput`.
    pub value: Option<f64>,
}

impl InputEvent {
    /// A press on a control.
    pub fn press(target: NodeId) -> Self {
        Self {
            kind: InputKind::Press,
            target,
            value: None,
        }
    }

    /// A slider drag with the slider's current value.
    pub fn slider(target: NodeId, value: f64) -> Self {
        Self {
            kind: InputKind::SliderInput,
            target,
            value: Some(value),
        }
    }
}

/// Binding table from (node, kind) to a domain action token.
#[derive(Clone, Debug)]
pub struct BindingMap<A> {
    bindings: HashMap<(NodeId, InputKind), A>,
}

impl<A: Copy> BindingMap<A> {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind an action to a node and affordance kind.
    ///
    /// A later bind for the same (node, kind) replaces the earlier one.
    pub fn bind(&mut self, target: NodeId, kind: InputKind, action: A) {
        self.bindings.insert((target, kind), action);
    }

    /// Resolve an event to its bound action, if any.
    pub fn resolve(&self, event: &InputEvent) -> Option<A> {
        self.bindings.get(&(event.target, event.kind)).copied()
    }

    /// Remove the binding for a node and kind.
    pub fn unbind(&mut self, target: NodeId, kind: InputKind) {
        self.bindings.remove(&(target, kind));
    }

    /// Remove every binding for a node.
    pub fn unbind_all(&mut self, target: NodeId) {
        self.bindings.retain(|(node, _), _| *node != target);
    }

    /// Get number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Clear all bindings.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

impl<A: Copy> Default for BindingMap<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementData, TagName};
    use crate::tree::SurfaceTree;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Action {
        Toggle,
        Adjust,
    }

    fn node(tree: &mut SurfaceTree) -> NodeId {
        tree.create_element(ElementData::new(TagName::a()))
    }

    #[test]
    fn test_bind_and_resolve() {
        let mut tree = SurfaceTree::new();
        let button = node(&mut tree);
        let slider = node(&mut tree);

        let mut bindings = BindingMap::new();
        bindings.bind(button, InputKind::Press, Action::Toggle);
        bindings.bind(slider, InputKind::SliderInput, Action::Adjust);

        assert_eq!(
            bindings.resolve(&InputEvent::press(button)),
            Some(Action::Toggle)
        );
        assert_eq!(
            bindings.resolve(&InputEvent::slider(slider, 0.4)),
            Some(Action::Adjust)
        );
        // Wrong kind on a bound node resolves to nothing
        assert_eq!(bindings.resolve(&InputEvent::press(slider)), None);
    }

    #[test]
    fn test_unbind_all() {
        let mut tree = SurfaceTree::new();
        let control = node(&mut tree);

        let mut bindings = BindingMap::new();
        bindings.bind(control, InputKind::Press, Action::Toggle);
        bindings.bind(control, InputKind::SliderInput, Action::Adjust);
        assert_eq!(bindings.len(), 2);

        bindings.unbind_all(control);
        assert!(bindings.is_empty());
        assert_eq!(bindings.resolve(&InputEvent::press(control)), None);
    }

    #[test]
    fn test_rebind_replaces() {
        let mut tree = SurfaceTree::new();
        let control = node(&mut tree);

        let mut bindings = BindingMap::new();
        bindings.bind(control, InputKind::Press, Action::Toggle);
        bindings.bind(control, InputKind::Press, Action::Adjust);

        assert_eq!(bindings.len(), 1);
        assert_eq!(
            bindings.resolve(&InputEvent::press(control)),
            Some(Action::Adjust)
        );
    }
}
