//! Fullscreen presentation strategies.

use surface::{ElementData, NodeId, SurfaceTree, TagName};

/// Strategy for moving a widget in and out of its maximized presentation.
///
/// The controller calls `enter` and `exit` strictly alternating, starting
/// with `enter`. Hosts install their own strategy (for example one backed by
/// a platform fullscreen API) with
/// [`PlayerController::set_fullscreen_handler`](crate::PlayerController::set_fullscreen_handler);
/// an installed strategy replaces both directions.
pub trait FullscreenHandler {
    /// Enter the maximized presentation.
    fn enter(&mut self, tree: &mut SurfaceTree, widget_root: NodeId);

    /// Leave the maximized presentation.
    fn exit(&mut self, tree: &mut SurfaceTree, widget_root: NodeId);
}

/// Default strategy: reparent the widget into a viewport-sized overlay.
///
/// The overlay is prepended to the document root so it paints in front, and
/// the widget's original parent is remembered so `exit` can restore it.
/// Custom controls stay interactive because the widget subtree itself is
/// what moves.
#[derive(Debug, Default)]
pub struct OverlayFullscreen {
    /// Overlay node while maximized.
    overlay: Option<NodeId>,
    /// The widget's parent before maximizing.
    origin: Option<NodeId>,
}

impl OverlayFullscreen {
    /// Create a new overlay strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the overlay node, if currently maximized.
    pub fn overlay(&self) -> Option<NodeId> {
        self.overlay
    }
}

impl FullscreenHandler for OverlayFullscreen {
    fn enter(&mut self, tree: &mut SurfaceTree, widget_root: NodeId) {
        if self.overlay.is_some() {
            return;
        }

        self.origin = tree.parent(widget_root);

        let overlay = tree.create_element(ElementData::new(TagName::div()));
        tree.add_class(overlay, "player-overlay");
        tree.set_style(overlay, "display", "block");
        tree.set_style(overlay, "position", "fixed");
        tree.set_style(overlay, "width", "100vw");
        tree.set_style(overlay, "height", "100vh");
        tree.set_style(overlay, "z-index", "1000");

        tree.append_child(overlay, widget_root);
        let root = tree.root();
        tree.prepend_child(root, overlay);
        self.overlay = Some(overlay);
    }

    fn exit(&mut self, tree: &mut SurfaceTree, widget_root: NodeId) {
        let overlay = match self.overlay.take() {
            Some(overlay) => overlay,
            None => return,
        };

        match self.origin.take() {
            Some(origin) => tree.append_child(origin, widget_root),
            None => tree.remove_from_parent(widget_root),
        }
        tree.remove(overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget_in_host(tree: &mut SurfaceTree) -> (NodeId, NodeId) {
        let root = tree.root();
        let host = tree.create_element(ElementData::new(TagName::div()));
        let widget = tree.create_element(ElementData::new(TagName::div()));
        tree.append_child(root, host);
        tree.append_child(host, widget);
        (host, widget)
    }

    #[test]
    fn test_overlay_round_trip() {
        let mut tree = SurfaceTree::new();
        let (host, widget) = widget_in_host(&mut tree);
        let mut fullscreen = OverlayFullscreen::new();

        fullscreen.enter(&mut tree, widget);
        let overlay = fullscreen.overlay().unwrap();
        assert_eq!(tree.parent(widget), Some(overlay));
        assert_eq!(tree.first_child(tree.root()), Some(overlay));
        assert_eq!(tree.style(overlay, "position"), Some("fixed"));
        assert_eq!(tree.style(overlay, "z-index"), Some("1000"));

        fullscreen.exit(&mut tree, widget);
        assert_eq!(tree.parent(widget), Some(host));
        assert!(!tree.contains(overlay));
        assert!(fullscreen.overlay().is_none());
    }

    #[test]
    fn test_second_cycle_works() {
        let mut tree = SurfaceTree::new();
        let (host, widget) = widget_in_host(&mut tree);
        let mut fullscreen = OverlayFullscreen::new();

        fullscreen.enter(&mut tree, widget);
        fullscreen.exit(&mut tree, widget);
        fullscreen.enter(&mut tree, widget);

        let overlay = fullscreen.overlay().unwrap();
        assert_eq!(tree.parent(widget), Some(overlay));

        fullscreen.exit(&mut tree, widget);
        assert_eq!(tree.parent(widget), Some(host));
    }

    #[test]
    fn test_exit_without_enter_is_noop() {
        let mut tree = SurfaceTree::new();
        let (host, widget) = widget_in_host(&mut tree);
        let mut fullscreen = OverlayFullscreen::new();

        fullscreen.exit(&mut tree, widget);
        assert_eq!(tree.parent(widget), Some(host));
    }

    #[test]
    fn test_double_enter_keeps_first_overlay() {
        let mut tree = SurfaceTree::new();
        let (_, widget) = widget_in_host(&mut tree);
        let mut fullscreen = OverlayFullscreen::new();

        fullscreen.enter(&mut tree, widget);
        let overlay = fullscreen.overlay().unwrap();
        fullscreen.enter(&mut tree, widget);

        assert_eq!(fullscreen.overlay(), Some(overlay));
        assert_eq!(tree.parent(widget), Some(overlay));
    }
}
