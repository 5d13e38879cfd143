//! Oxide Player - an embeddable video-player widget engine.
//!
//! This crate integrates the player components:
//! - Surface construction for the widget subtree
//! - The controller owning all playback state
//! - Fullscreen presentation strategies
//! - Configuration
//!
//! The host owns the surface tree and the event loop. It delivers input and
//! media events to the controller and ticks the deferred-action queue:
//!
//! ```
//! use player::{PlayerConfig, PlayerController};
//! use surface::{ElementData, SurfaceTree, TagName};
//!
//! let mut tree = SurfaceTree::new();
//! let root = tree.root();
//! let host = tree.create_element(ElementData::new(TagName::div()));
//! tree.append_child(root, host);
//!
//! let mut player = PlayerController::new(
//!     "https://example.com/clip.mp4",
//!     PlayerConfig::default(),
//! )?;
//! player.create_surface(&mut tree, host)?;
//! player.toggle_playback(&mut tree);
//! # Ok::<(), common::PlayerError>(())
//! ```

pub mod config;
pub mod controller;
pub mod fullscreen;
pub mod widget;

pub use config::{DisplayMode, PlayerConfig};
pub use controller::{
    ControlAction, DeferredAction, PlayerController, IDLE_ANIMATION_SUPPRESS,
    MAX_REFRESH_ATTEMPTS,
};
pub use fullscreen::{FullscreenHandler, OverlayFullscreen};
pub use widget::SurfaceHandles;

/// Player version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
