//! Media backend seam.

use std::time::Duration;
use url::Url;

/// An event produced by a media backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaEvent {
    /// The media is ready to play and its duration is known.
    Ready { duration: Duration },
    /// The playback position advanced.
    TimeUpdate { position: Duration },
    /// Playback reached the end of the media.
    Ended,
}

/// Commands a player widget issues to its media engine.
///
/// The contract is infallible: out-of-range values are clamped and commands
/// that cannot take effect yet (play before readiness) record intent instead
/// of failing. Events travel the other way and are drained with
/// [`poll_events`](MediaBackend::poll_events) from the host loop.
pub trait MediaBackend: Send + Sync {
    /// Point the backend at a media source.
    fn set_source(&self, url: &Url);

    /// Get the current media source.
    fn source(&self) -> Option<Url>;

    /// Begin or resume playback.
    fn play(&self);

    /// Suspend playback.
    fn pause(&self);

    /// Check if playback is suspended.
    fn paused(&self) -> bool;

    /// Set the effective volume (0.0 to 1.0, clamped; non-finite ignored).
    fn set_volume(&self, volume: f64);

    /// Get the effective volume.
    fn volume(&self) -> f64;

    /// Enable or disable looping.
    fn set_looping(&self, looping: bool);

    /// Check if looping.
    fn looping(&self) -> bool;

    /// Move the playback position (clamped to the duration once known).
    fn set_position(&self, position: Duration);

    /// Get the playback position.
    fn position(&self) -> Duration;

    /// Get the media duration, if known yet.
    fn duration(&self) -> Option<Duration>;

    /// Drain events produced since the last poll.
    fn poll_events(&self) -> Vec<MediaEvent>;
}
