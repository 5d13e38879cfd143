//! Widget surface construction.

use crate::config::{DisplayMode, PlayerConfig};
use surface::{ElementData, NodeId, SurfaceTree, TagName};
use url::Url;

/// Class applied to the root while playback is paused.
pub const CLASS_PAUSED: &str = "paused";
/// Class applied to the root until first playback, and toggled by
/// touch-layout cover presses while playing.
pub const CLASS_VISIBLE: &str = "visible";
/// Class applied to the mute button while the effective volume is zero.
pub const CLASS_MUTED: &str = "muted";
/// Class applied to the root while maximized.
pub const CLASS_FULLSCREEN: &str = "fullscreen";
/// Class applied to the loop button while looping is on.
pub const CLASS_ACTIVE: &str = "active";
/// Class applied to the side panel in collapsed display mode.
pub const CLASS_COLLAPSED: &str = "collapsed";
/// Class toggled on the root by touch-layout cover presses while paused.
pub const CLASS_HIDDEN: &str = "hidden";

/// Named handles to the control nodes of a built widget.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceHandles {
    /// Outermost element of the widget subtree.
    pub root: NodeId,
    /// Cover layer over the video.
    pub cover: NodeId,
    /// The video element.
    pub video: NodeId,
    /// Progress range input.
    pub progress_slider: NodeId,
    /// Progress fill element.
    pub progress_fill: NodeId,
    /// Play/pause button.
    pub play_button: NodeId,
    /// Loop button.
    pub loop_button: NodeId,
    /// Maximize button.
    pub maximize_button: NodeId,
    /// Side panel.
    pub side_panel: NodeId,
    /// Mute button.
    pub mute_button: NodeId,
    /// Volume range input.
    pub volume_slider: NodeId,
    /// Volume fill element.
    pub volume_fill: NodeId,
}

/// Build the widget subtree under `host` and return its handles.
pub(crate) fn build_widget(
    tree: &mut SurfaceTree,
    host: NodeId,
    source: &Url,
    config: &PlayerConfig,
) -> SurfaceHandles {
    let root = element(tree, host, TagName::div(), "player");
    tree.add_class(root, CLASS_PAUSED);
    tree.add_class(root, CLASS_VISIBLE);

    let cover = element(tree, root, TagName::div(), "player-cover");

    let video = element(tree, root, TagName::video(), "player-video");
    tree.set_attribute(video, "src", source.as_str());
    if config.plays_inline {
        tree.set_attribute(video, "playsinline", "");
    }

    let progress = element(tree, root, TagName::div(), "player-progress");
    let progress_bar = element(tree, progress, TagName::div(), "progress-bar");
    let progress_slider = range_input(tree, progress_bar, "progress-slider");
    let progress_fill = element(tree, progress_bar, TagName::div(), "progress-fill");
    tree.set_style(progress_fill, "width", "0%");

    let controls = element(tree, root, TagName::div(), "player-controls");
    let loop_button = element(tree, controls, TagName::a(), "loop-button");
    let play_button = element(tree, controls, TagName::a(), "play-button");
    let maximize_button = element(tree, controls, TagName::a(), "maximize-button");

    let side_panel = element(tree, root, TagName::div(), "player-side");
    if config.display_mode == DisplayMode::Collapsed {
        tree.add_class(side_panel, CLASS_COLLAPSED);
    }
    let mute_button = element(tree, side_panel, TagName::a(), "mute-button");
    let volume = element(tree, side_panel, TagName::div(), "player-volume");
    let volume_bar = element(tree, volume, TagName::div(), "volume-bar");
    let volume_fill = element(tree, volume_bar, TagName::div(), "volume-fill");
    tree.set_style(volume_fill, "height", "0%");
    let volume_slider = range_input(tree, volume, "volume-slider");

    SurfaceHandles {
        root,
        cover,
        video,
        progress_slider,
        progress_fill,
        play_button,
        loop_button,
        maximize_button,
        side_panel,
        mute_button,
        volume_slider,
        volume_fill,
    }
}

fn element(tree: &mut SurfaceTree, parent: NodeId, tag: TagName, class: &str) -> NodeId {
    let node = tree.create_element(ElementData::new(tag));
    tree.add_class(node, class);
    tree.append_child(parent, node);
    node
}

fn range_input(tree: &mut SurfaceTree, parent: NodeId, class: &str) -> NodeId {
    let node = element(tree, parent, TagName::input(), class);
    tree.set_attribute(node, "type", "range");
    tree.set_attribute(node, "min", "0");
    tree.set_attribute(node, "max", "1");
    tree.set_attribute(node, "step", "0.01");
    tree.set_attribute(node, "value", "0");
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(config: &PlayerConfig) -> (SurfaceTree, SurfaceHandles) {
        let mut tree = SurfaceTree::new();
        let root = tree.root();
        let host = tree.create_element(ElementData::new(TagName::div()));
        tree.append_child(root, host);

        let source = Url::parse("https://example.com/clip.mp4").unwrap();
        let handles = build_widget(&mut tree, host, &source, config);
        (tree, handles)
    }

    #[test]
    fn test_widget_structure() {
        let (tree, handles) = build(&PlayerConfig::default());

        assert!(tree.has_class(handles.root, CLASS_PAUSED));
        assert!(tree.has_class(handles.root, CLASS_VISIBLE));
        assert_eq!(tree.first_child(handles.root), Some(handles.cover));
        assert!(tree.is_descendant_of(handles.video, handles.root));
        assert!(tree.is_descendant_of(handles.volume_fill, handles.side_panel));
        assert_eq!(
            tree.attribute(handles.video, "src"),
            Some("https://example.com/clip.mp4")
        );
        assert!(tree.attribute(handles.video, "playsinline").is_some());
    }

    #[test]
    fn test_range_inputs() {
        let (tree, handles) = build(&PlayerConfig::default());

        for slider in [handles.progress_slider, handles.volume_slider] {
            assert_eq!(tree.attribute(slider, "type"), Some("range"));
            assert_eq!(tree.attribute(slider, "min"), Some("0"));
            assert_eq!(tree.attribute(slider, "max"), Some("1"));
            assert_eq!(tree.attribute(slider, "step"), Some("0.01"));
        }
        assert_eq!(tree.style(handles.progress_fill, "width"), Some("0%"));
    }

    #[test]
    fn test_collapsed_side_panel() {
        let (tree, handles) = build(&PlayerConfig::collapsed());
        assert!(tree.has_class(handles.side_panel, CLASS_COLLAPSED));

        let (tree, handles) = build(&PlayerConfig::default());
        assert!(!tree.has_class(handles.side_panel, CLASS_COLLAPSED));
    }

    #[test]
    fn test_inline_playback_opt_out() {
        let config = PlayerConfig::new().with_plays_inline(false);
        let (tree, handles) = build(&config);
        assert!(tree.attribute(handles.video, "playsinline").is_none());
    }
}
