//! Player configuration.

use serde::{Deserialize, Serialize};

/// Side-panel display mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Side panel shown expanded.
    #[default]
    Normal,
    /// Side panel starts collapsed.
    Collapsed,
}

/// Player configuration.
#[derive(Clone, Debug)]
pub struct PlayerConfig {
    /// Side-panel display mode, observed at surface-creation time.
    pub display_mode: DisplayMode,
    /// Whether the video element requests inline playback.
    pub plays_inline: bool,
    /// Volume applied when the surface is created.
    pub initial_volume: f64,
    /// Whether the host uses a touch layout (cover presses toggle visibility).
    pub mobile_layout: bool,
}

impl PlayerConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with the side panel collapsed.
    pub fn collapsed() -> Self {
        Self {
            display_mode: DisplayMode::Collapsed,
            ..Self::default()
        }
    }

    /// Create a touch-layout configuration.
    pub fn mobile() -> Self {
        Self {
            mobile_layout: true,
            ..Self::default()
        }
    }

    /// Set the display mode.
    pub fn with_display_mode(mut self, mode: DisplayMode) -> Self {
        self.display_mode = mode;
        self
    }

    /// Set inline playback.
    pub fn with_plays_inline(mut self, inline: bool) -> Self {
        self.plays_inline = inline;
        self
    }

    /// Set the initial volume.
    pub fn with_initial_volume(mut self, volume: f64) -> Self {
        self.initial_volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Set the touch layout flag.
    pub fn with_mobile_layout(mut self, mobile: bool) -> Self {
        self.mobile_layout = mobile;
        self
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::Normal,
            plays_inline: true,
            initial_volume: 0.5,
            mobile_layout: false,
        }
    }
}
