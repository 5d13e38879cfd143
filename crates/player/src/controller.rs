//! The player controller.

use crate::config::{DisplayMode, PlayerConfig};
use crate::fullscreen::{FullscreenHandler, OverlayFullscreen};
use crate::widget::{self, SurfaceHandles};
use common::{Percentage, PlayerError, PlayerResult};
use player_media::{MediaBackend, MediaEvent, VideoBackend};
use std::sync::Arc;
use std::time::{Duration, Instant};
use surface::{BindingMap, InputEvent, InputKind, NodeId, SurfaceTree, TimerQueue};
use tracing::{debug, warn};
use url::Url;

/// Maximum forced-reload attempts.
pub const MAX_REFRESH_ATTEMPTS: u32 = 3;

/// How long the idle animation stays suppressed after starting playback.
pub const IDLE_ANIMATION_SUPPRESS: Duration = Duration::from_millis(50);

/// Control actions bound to widget nodes at surface creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlAction {
    /// Toggle between playing and paused.
    TogglePlayback,
    /// Toggle looping.
    ToggleLoop,
    /// Toggle the maximized presentation.
    ToggleFullscreen,
    /// Toggle mute.
    ToggleMute,
    /// Seek to the slider position.
    SeekTo,
    /// Apply the volume slider position.
    SetVolume,
    /// Cover layer pressed.
    CoverPressed,
}

/// Deferred actions the controller schedules on its timer queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredAction {
    /// Restore the idle animation on the loop and maximize buttons.
    RestoreIdleAnimation,
}

/// The video-player widget controller.
///
/// One controller owns one widget: it builds the widget's surface subtree,
/// keeps all playback state, and reacts to host input events and media
/// backend events. The host owns the [`SurfaceTree`] and passes it into every
/// operation that touches the surface; the controller never outlives the
/// single event loop it runs on.
pub struct PlayerController {
    /// Media source URL, immutable after construction.
    source: Url,
    /// Configuration.
    config: PlayerConfig,
    /// Media backend.
    backend: Arc<dyn MediaBackend>,
    /// Widget node handles, present once the surface is built.
    surface: Option<SurfaceHandles>,
    /// Input bindings registered at surface creation.
    bindings: BindingMap<ControlAction>,
    /// Deferred-action queue.
    timers: TimerQueue<DeferredAction>,
    /// Fullscreen strategy.
    fullscreen: Box<dyn FullscreenHandler>,
    /// Forced-reload attempts so far.
    refresh_attempts: u32,
    /// The backend has reported readiness.
    ready: bool,
    /// Media duration, recorded on readiness.
    duration: Option<Duration>,
    /// Last explicit user-chosen volume.
    volume_level: f64,
    /// The maximized presentation is active.
    maximized: bool,
    /// Playback has started at least once.
    has_played: bool,
}

impl PlayerController {
    /// Create a controller with the built-in video backend.
    pub fn new(source_url: &str, config: PlayerConfig) -> PlayerResult<Self> {
        Self::with_backend(source_url, config, Arc::new(VideoBackend::new()))
    }

    /// Create a controller driving a host-supplied backend.
    pub fn with_backend(
        source_url: &str,
        config: PlayerConfig,
        backend: Arc<dyn MediaBackend>,
    ) -> PlayerResult<Self> {
        let source = Url::parse(source_url)?;
        let volume_level = if config.initial_volume.is_finite() {
            config.initial_volume.clamp(0.0, 1.0)
        } else {
            debug!("non-finite initial volume in config, using the default");
            PlayerConfig::default().initial_volume
        };

        Ok(Self {
            source,
            config,
            backend,
            surface: None,
            bindings: BindingMap::new(),
            timers: TimerQueue::new(),
            fullscreen: Box::new(OverlayFullscreen::new()),
            refresh_attempts: 0,
            ready: false,
            duration: None,
            volume_level,
            maximized: false,
            has_played: false,
        })
    }

    /// Get the media source URL.
    pub fn source(&self) -> &Url {
        &self.source
    }

    /// Get the display mode.
    pub fn display_mode(&self) -> DisplayMode {
        self.config.display_mode
    }

    /// Check if the surface has been created.
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Check if the backend has reported readiness.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Check if playback is paused.
    pub fn is_paused(&self) -> bool {
        self.backend.paused()
    }

    /// Check if muted: effective volume is zero while a level is stored.
    pub fn is_muted(&self) -> bool {
        self.backend.volume() == 0.0 && self.volume_level > 0.0
    }

    /// Check if the maximized presentation is active.
    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    /// Check if looping is on.
    pub fn is_looping(&self) -> bool {
        self.backend.looping()
    }

    /// Check if playback has ever started.
    pub fn has_played(&self) -> bool {
        self.has_played
    }

    /// Get the last explicit user-chosen volume.
    pub fn volume_level(&self) -> f64 {
        self.volume_level
    }

    /// Get the volume currently applied to the backend.
    pub fn effective_volume(&self) -> f64 {
        self.backend.volume()
    }

    /// Get the current playback position.
    pub fn position(&self) -> Duration {
        self.backend.position()
    }

    /// Get the media duration, if known.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Get the forced-reload attempts so far.
    pub fn refresh_attempts(&self) -> u32 {
        self.refresh_attempts
    }

    /// Get the widget node handles, if the surface has been created.
    pub fn surface(&self) -> Option<&SurfaceHandles> {
        self.surface.as_ref()
    }

    /// Replace the fullscreen strategy.
    pub fn set_fullscreen_handler(&mut self, handler: Box<dyn FullscreenHandler>) {
        self.fullscreen = handler;
    }

    /// Set the display mode.
    ///
    /// Only observed at surface-creation time; changing it afterwards has no
    /// retroactive effect on an existing surface.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.config.display_mode = mode;
    }

    /// Build the widget subtree under `host` and register its input bindings.
    ///
    /// Points the backend at the source, applies the configured initial
    /// volume, and returns the widget root. A controller can only be attached
    /// once.
    pub fn create_surface(
        &mut self,
        tree: &mut SurfaceTree,
        host: NodeId,
    ) -> PlayerResult<NodeId> {
        if self.surface.is_some() {
            return Err(PlayerError::AlreadyAttached);
        }

        let handles = widget::build_widget(tree, host, &self.source, &self.config);
        self.backend.set_source(&self.source);

        self.bindings
            .bind(handles.cover, InputKind::Press, ControlAction::CoverPressed);
        self.bindings.bind(
            handles.play_button,
            InputKind::Press,
            ControlAction::TogglePlayback,
        );
        self.bindings.bind(
            handles.loop_button,
            InputKind::Press,
            ControlAction::ToggleLoop,
        );
        self.bindings.bind(
            handles.maximize_button,
            InputKind::Press,
            ControlAction::ToggleFullscreen,
        );
        self.bindings.bind(
            handles.mute_button,
            InputKind::Press,
            ControlAction::ToggleMute,
        );
        self.bindings.bind(
            handles.progress_slider,
            InputKind::SliderInput,
            ControlAction::SeekTo,
        );
        self.bindings.bind(
            handles.volume_slider,
            InputKind::SliderInput,
            ControlAction::SetVolume,
        );

        self.surface = Some(handles);
        self.set_volume(tree, self.volume_level);
        Ok(handles.root)
    }

    /// Toggle between playing and paused.
    ///
    /// Without a surface this logs a warning and returns; playback requests
    /// on a widget that was never built are not errors.
    pub fn toggle_playback(&mut self, tree: &mut SurfaceTree) {
        let handles = match self.surface {
            Some(handles) => handles,
            None => {
                warn!("playback toggled with no surface attached");
                return;
            }
        };

        if !self.backend.paused() {
            self.apply_pause(tree, handles);
            return;
        }

        self.backend.play();
        self.suppress_idle_animation(tree, handles);
        tree.remove_class(handles.root, widget::CLASS_PAUSED);
        tree.remove_class(handles.root, widget::CLASS_VISIBLE);
        self.has_played = true;
    }

    /// Pause playback.
    pub fn pause(&mut self, tree: &mut SurfaceTree) -> PlayerResult<()> {
        let handles = self.attached()?;
        self.apply_pause(tree, handles);
        Ok(())
    }

    /// Force the backend to re-fetch the media source.
    ///
    /// Each attempt re-points the source at the original URL with a
    /// cache-busting `reload=<n>` query parameter. Attempts are capped; once
    /// the cap is reached further calls log a warning and change nothing.
    pub fn refresh(&mut self, tree: &mut SurfaceTree) -> PlayerResult<()> {
        let handles = self.attached()?;

        if self.refresh_attempts >= MAX_REFRESH_ATTEMPTS {
            warn!("refresh limit reached after {} attempts", self.refresh_attempts);
            return Ok(());
        }
        self.refresh_attempts += 1;

        let mut reload = self.source.clone();
        reload
            .query_pairs_mut()
            .append_pair("reload", &self.refresh_attempts.to_string());
        self.backend.set_source(&reload);
        tree.set_attribute(handles.video, "src", reload.as_str());
        Ok(())
    }

    /// Toggle the maximized presentation.
    pub fn toggle_fullscreen(&mut self, tree: &mut SurfaceTree) -> PlayerResult<()> {
        let handles = self.attached()?;

        if self.maximized {
            self.fullscreen.exit(tree, handles.root);
            tree.remove_class(handles.root, widget::CLASS_FULLSCREEN);
            self.maximized = false;
        } else {
            self.fullscreen.enter(tree, handles.root);
            tree.add_class(handles.root, widget::CLASS_FULLSCREEN);
            self.maximized = true;
        }
        Ok(())
    }

    /// Toggle mute.
    ///
    /// Muting zeroes the effective volume only; the stored volume level
    /// survives and is restored exactly on unmute.
    pub fn toggle_mute(&mut self, tree: &mut SurfaceTree) -> PlayerResult<()> {
        let handles = self.attached()?;

        if self.is_muted() {
            self.backend.set_volume(self.volume_level);
            tree.remove_class(handles.mute_button, widget::CLASS_MUTED);
        } else {
            self.backend.set_volume(0.0);
            tree.add_class(handles.mute_button, widget::CLASS_MUTED);
        }
        Ok(())
    }

    /// Apply explicit user volume input.
    ///
    /// Non-finite input is ignored. The level is clamped to [0.0, 1.0] and
    /// becomes both the effective volume and the stored volume level.
    pub fn set_volume(&mut self, tree: &mut SurfaceTree, level: f64) {
        let handles = match self.surface {
            Some(handles) => handles,
            None => {
                debug!("volume input with no surface attached");
                return;
            }
        };
        if !level.is_finite() {
            debug!("ignoring non-finite volume input");
            return;
        }

        let level = level.clamp(0.0, 1.0);
        self.backend.set_volume(level);
        self.volume_level = level;
        tree.remove_class(handles.mute_button, widget::CLASS_MUTED);
        tree.set_attribute(handles.volume_slider, "value", &level.to_string());
        tree.set_style(
            handles.volume_fill,
            "height",
            &Percentage::from_fraction(level as f32).to_string(),
        );
    }

    /// Seek to a position.
    ///
    /// Ignored until the backend reports readiness; the position is clamped
    /// to the media duration.
    pub fn seek(&mut self, tree: &mut SurfaceTree, position: Duration) {
        let handles = match self.surface {
            Some(handles) => handles,
            None => {
                debug!("seek input with no surface attached");
                return;
            }
        };
        if !self.ready {
            debug!("seek ignored before readiness");
            return;
        }
        let duration = match self.duration {
            Some(duration) => duration,
            None => return,
        };

        let position = position.min(duration);
        self.backend.set_position(position);
        self.update_progress(tree, handles, position, duration);
    }

    /// Set looping.
    pub fn set_loop(&mut self, tree: &mut SurfaceTree, enabled: bool) {
        let handles = match self.surface {
            Some(handles) => handles,
            None => {
                debug!("loop input with no surface attached");
                return;
            }
        };

        self.backend.set_looping(enabled);
        if enabled {
            tree.add_class(handles.loop_button, widget::CLASS_ACTIVE);
        } else {
            tree.remove_class(handles.loop_button, widget::CLASS_ACTIVE);
        }
    }

    /// Apply a backend event.
    pub fn handle_media_event(&mut self, tree: &mut SurfaceTree, event: MediaEvent) {
        let handles = match self.surface {
            Some(handles) => handles,
            None => return,
        };

        match event {
            MediaEvent::Ready { duration } => {
                self.ready = true;
                self.duration = Some(duration);
                tree.set_attribute(
                    handles.progress_slider,
                    "max",
                    &duration.as_secs_f64().to_string(),
                );
            }
            MediaEvent::TimeUpdate { position } => {
                if !self.ready {
                    debug!("time update ignored before readiness");
                    return;
                }
                let duration = match self.duration {
                    Some(duration) => duration,
                    None => return,
                };

                self.update_progress(tree, handles, position, duration);
                // End of media pauses in place; the position is not reset
                if position >= duration {
                    self.apply_pause(tree, handles);
                }
            }
            MediaEvent::Ended => {
                self.apply_pause(tree, handles);
            }
        }
    }

    /// Drain backend events and apply them.
    pub fn process_media_events(&mut self, tree: &mut SurfaceTree) {
        for event in self.backend.poll_events() {
            self.handle_media_event(tree, event);
        }
    }

    /// Resolve a host input event against the registered bindings and apply
    /// the bound action.
    pub fn handle_input(&mut self, tree: &mut SurfaceTree, event: &InputEvent) {
        let action = match self.bindings.resolve(event) {
            Some(action) => action,
            None => {
                debug!("input event with no binding");
                return;
            }
        };

        match action {
            ControlAction::TogglePlayback => self.toggle_playback(tree),
            ControlAction::ToggleLoop => {
                let enabled = !self.backend.looping();
                self.set_loop(tree, enabled);
            }
            ControlAction::ToggleFullscreen => {
                if let Err(err) = self.toggle_fullscreen(tree) {
                    warn!("fullscreen toggle failed: {}", err);
                }
            }
            ControlAction::ToggleMute => {
                if let Err(err) = self.toggle_mute(tree) {
                    warn!("mute toggle failed: {}", err);
                }
            }
            ControlAction::SeekTo => {
                if let Some(value) = event.value {
                    if !value.is_finite() {
                        debug!("ignoring non-finite seek input");
                        return;
                    }
                    // Oversized values saturate; `seek` clamps to the duration.
                    let position = Duration::try_from_secs_f64(value.max(0.0))
                        .unwrap_or(Duration::MAX);
                    self.seek(tree, position);
                }
            }
            ControlAction::SetVolume => {
                if let Some(value) = event.value {
                    self.set_volume(tree, value);
                }
            }
            ControlAction::CoverPressed => self.cover_pressed(tree),
        }
    }

    /// Run deferred actions that are due at `now`.
    pub fn process_timers(&mut self, tree: &mut SurfaceTree, now: Instant) {
        for action in self.timers.fire_due(now) {
            match action {
                DeferredAction::RestoreIdleAnimation => {
                    if let Some(handles) = self.surface {
                        tree.remove_style(handles.loop_button, "animation");
                        tree.remove_style(handles.maximize_button, "animation");
                    }
                }
            }
        }
    }

    fn attached(&self) -> PlayerResult<SurfaceHandles> {
        self.surface.ok_or(PlayerError::NotAttached)
    }

    fn apply_pause(&mut self, tree: &mut SurfaceTree, handles: SurfaceHandles) {
        self.backend.pause();
        tree.add_class(handles.root, widget::CLASS_PAUSED);
    }

    fn suppress_idle_animation(&mut self, tree: &mut SurfaceTree, handles: SurfaceHandles) {
        tree.set_style(handles.loop_button, "animation", "none");
        tree.set_style(handles.maximize_button, "animation", "none");
        // Fire-and-forget: the restore is idempotent, so overlapping
        // schedules are harmless and nothing is ever cancelled
        self.timers
            .schedule(DeferredAction::RestoreIdleAnimation, IDLE_ANIMATION_SUPPRESS);
    }

    fn cover_pressed(&mut self, tree: &mut SurfaceTree) {
        if !self.config.mobile_layout {
            debug!("cover press ignored outside touch layout");
            return;
        }
        let handles = match self.surface {
            Some(handles) => handles,
            None => return,
        };

        if self.backend.paused() {
            tree.toggle_class(handles.root, widget::CLASS_HIDDEN);
        } else {
            tree.toggle_class(handles.root, widget::CLASS_VISIBLE);
        }
    }

    fn update_progress(
        &mut self,
        tree: &mut SurfaceTree,
        handles: SurfaceHandles,
        position: Duration,
        duration: Duration,
    ) {
        tree.set_attribute(
            handles.progress_slider,
            "value",
            &position.as_secs_f64().to_string(),
        );

        let fraction = if duration.is_zero() {
            0.0
        } else {
            (position.as_secs_f64() / duration.as_secs_f64()) as f32
        };
        tree.set_style(
            handles.progress_fill,
            "width",
            &Percentage::from_fraction(fraction).to_string(),
        );
    }
}
