//! Built-in deterministic video backend.

use crate::backend::{MediaBackend, MediaEvent};
use parking_lot::RwLock;
use std::mem;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Where the video is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoState {
    /// No source assigned.
    Idle,
    /// Source set, waiting for readiness.
    Loading,
    /// Playable, not yet started.
    Ready,
    /// Position advances on each update.
    Playing,
    /// Playback suspended.
    Paused,
    /// Reached the end of the media.
    Ended,
}

#[derive(Debug)]
struct Inner {
    source: Option<Url>,
    state: VideoState,
    position: Duration,
    duration: Option<Duration>,
    rate: f64,
    volume: f64,
    looping: bool,
    play_when_ready: bool,
    events: Vec<MediaEvent>,
}

/// Deterministic video engine.
///
/// Simulates decoding for tests and headless hosts: the driver announces
/// readiness with [`set_ready`](VideoBackend::set_ready) and advances time
/// with [`update`](VideoBackend::update). A production host wraps its
/// platform decoder behind [`MediaBackend`] instead. All state sits behind
/// one lock, which keeps the `&self` trait surface usable from a shared
/// handle.
#[derive(Debug)]
pub struct VideoBackend {
    inner: RwLock<Inner>,
}

impl VideoBackend {
    /// Create a new video backend.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                source: None,
                state: VideoState::Idle,
                position: Duration::ZERO,
                duration: None,
                rate: 1.0,
                volume: 1.0,
                looping: false,
                play_when_ready: false,
                events: Vec::new(),
            }),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> VideoState {
        self.inner.read().state
    }

    /// Current playback rate.
    pub fn playback_rate(&self) -> f64 {
        self.inner.read().rate
    }

    /// Set the playback rate, clamped to [0.25, 4.0].
    ///
    /// Non-finite rates are ignored.
    pub fn set_playback_rate(&self, rate: f64) {
        if !rate.is_finite() {
            return;
        }
        self.inner.write().rate = rate.clamp(0.25, 4.0);
    }

    /// Mark the media as ready.
    ///
    /// Queues the readiness event; if playback was requested while loading
    /// it starts now.
    pub fn set_ready(&self, duration: Duration) {
        let mut inner = self.inner.write();
        inner.duration = Some(duration);
        inner.state = if mem::take(&mut inner.play_when_ready) {
            VideoState::Playing
        } else {
            VideoState::Ready
        };
        inner.events.push(MediaEvent::Ready { duration });
    }

    /// Advance playback (called each host tick).
    ///
    /// Queues a time update for the resulting position. At the end of the
    /// media the position wraps to zero when looping; otherwise it clamps to
    /// the duration and the ended event is queued after the time update.
    pub fn update(&self, delta: Duration) {
        let mut inner = self.inner.write();
        if inner.state != VideoState::Playing {
            return;
        }

        let advance = Duration::try_from_secs_f64(delta.as_secs_f64() * inner.rate)
            .unwrap_or(Duration::MAX);
        inner.position = inner.position.saturating_add(advance);

        let mut ended = false;
        if let Some(duration) = inner.duration {
            if inner.position >= duration {
                if inner.looping {
                    inner.position = Duration::ZERO;
                } else {
                    inner.position = duration;
                    inner.state = VideoState::Ended;
                    ended = true;
                }
            }
        }

        let position = inner.position;
        inner.events.push(MediaEvent::TimeUpdate { position });
        if ended {
            inner.events.push(MediaEvent::Ended);
        }
    }
}

impl Default for VideoBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaBackend for VideoBackend {
    fn set_source(&self, url: &Url) {
        let mut inner = self.inner.write();
        inner.source = Some(url.clone());
        inner.position = Duration::ZERO;
        inner.state = VideoState::Loading;
    }

    fn source(&self) -> Option<Url> {
        self.inner.read().source.clone()
    }

    fn play(&self) {
        let mut inner = self.inner.write();
        match inner.state {
            VideoState::Ready | VideoState::Paused => {
                inner.state = VideoState::Playing;
            }
            VideoState::Ended => {
                // Restarting a finished video begins from the start
                inner.position = Duration::ZERO;
                inner.state = VideoState::Playing;
            }
            VideoState::Idle | VideoState::Loading => {
                debug!("play requested before readiness");
                inner.play_when_ready = true;
            }
            VideoState::Playing => {}
        }
    }

    fn pause(&self) {
        let mut inner = self.inner.write();
        inner.play_when_ready = false;
        if inner.state == VideoState::Playing {
            inner.state = VideoState::Paused;
        }
    }

    fn paused(&self) -> bool {
        let inner = self.inner.read();
        inner.state != VideoState::Playing && !inner.play_when_ready
    }

    fn set_volume(&self, volume: f64) {
        if !volume.is_finite() {
            return;
        }
        self.inner.write().volume = volume.clamp(0.0, 1.0);
    }

    fn volume(&self) -> f64 {
        self.inner.read().volume
    }

    fn set_looping(&self, looping: bool) {
        self.inner.write().looping = looping;
    }

    fn looping(&self) -> bool {
        self.inner.read().looping
    }

    fn set_position(&self, position: Duration) {
        let mut inner = self.inner.write();
        let clamped = match inner.duration {
            Some(duration) => position.min(duration),
            None => position,
        };
        inner.position = clamped;

        // Seeking back out of the ended state leaves the video paused
        if inner.state == VideoState::Ended && inner.duration.map_or(false, |d| clamped < d) {
            inner.state = VideoState::Paused;
        }
    }

    fn position(&self) -> Duration {
        self.inner.read().position
    }

    fn duration(&self) -> Option<Duration> {
        self.inner.read().duration
    }

    fn poll_events(&self) -> Vec<MediaEvent> {
        mem::take(&mut self.inner.write().events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Url {
        Url::parse("https://example.com/clip.mp4").unwrap()
    }

    #[test]
    fn test_video_backend() {
        let video = VideoBackend::new();
        assert_eq!(video.state(), VideoState::Idle);
        assert!(video.paused());

        video.set_source(&source());
        assert_eq!(video.state(), VideoState::Loading);

        video.set_ready(Duration::from_secs(120));
        assert_eq!(video.state(), VideoState::Ready);
        assert_eq!(video.duration(), Some(Duration::from_secs(120)));
        assert_eq!(
            video.poll_events(),
            vec![MediaEvent::Ready {
                duration: Duration::from_secs(120)
            }]
        );

        video.play();
        assert!(!video.paused());

        video.update(Duration::from_secs(1));
        assert_eq!(video.position(), Duration::from_secs(1));
        assert_eq!(
            video.poll_events(),
            vec![MediaEvent::TimeUpdate {
                position: Duration::from_secs(1)
            }]
        );

        video.pause();
        assert_eq!(video.state(), VideoState::Paused);
        assert!(video.paused());
    }

    #[test]
    fn test_play_before_ready() {
        let video = VideoBackend::new();
        video.set_source(&source());

        video.play();
        assert_eq!(video.state(), VideoState::Loading);
        assert!(!video.paused());

        video.set_ready(Duration::from_secs(60));
        assert_eq!(video.state(), VideoState::Playing);
    }

    #[test]
    fn test_end_of_media() {
        let video = VideoBackend::new();
        video.set_source(&source());
        video.set_ready(Duration::from_secs(2));
        video.poll_events();

        video.play();
        video.update(Duration::from_secs(3));

        assert_eq!(video.state(), VideoState::Ended);
        assert_eq!(video.position(), Duration::from_secs(2));
        assert!(video.paused());
        assert_eq!(
            video.poll_events(),
            vec![
                MediaEvent::TimeUpdate {
                    position: Duration::from_secs(2)
                },
                MediaEvent::Ended,
            ]
        );
    }

    #[test]
    fn test_loop_wraps_to_start() {
        let video = VideoBackend::new();
        video.set_source(&source());
        video.set_ready(Duration::from_secs(2));
        video.set_looping(true);
        video.poll_events();

        video.play();
        video.update(Duration::from_secs(3));

        assert_eq!(video.state(), VideoState::Playing);
        assert_eq!(video.position(), Duration::ZERO);
        assert_eq!(
            video.poll_events(),
            vec![MediaEvent::TimeUpdate {
                position: Duration::ZERO
            }]
        );
    }

    #[test]
    fn test_update_with_huge_delta_saturates() {
        let video = VideoBackend::new();
        video.set_source(&source());
        video.set_ready(Duration::from_secs(10));
        video.play();

        video.update(Duration::MAX);

        assert_eq!(video.state(), VideoState::Ended);
        assert_eq!(video.position(), Duration::from_secs(10));
    }

    #[test]
    fn test_volume_clamping() {
        let video = VideoBackend::new();

        video.set_volume(1.5);
        assert_eq!(video.volume(), 1.0);

        video.set_volume(-0.5);
        assert_eq!(video.volume(), 0.0);

        video.set_volume(0.4);
        assert_eq!(video.volume(), 0.4);

        video.set_volume(f64::NAN);
        assert_eq!(video.volume(), 0.4);

        video.set_playback_rate(f64::NAN);
        assert_eq!(video.playback_rate(), 1.0);
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let video = VideoBackend::new();
        video.set_source(&source());
        video.set_ready(Duration::from_secs(120));

        video.set_position(Duration::from_secs(200));
        assert_eq!(video.position(), Duration::from_secs(120));

        video.set_position(Duration::from_secs(60));
        assert_eq!(video.position(), Duration::from_secs(60));
    }

    #[test]
    fn test_seek_leaves_ended_state() {
        let video = VideoBackend::new();
        video.set_source(&source());
        video.set_ready(Duration::from_secs(2));
        video.play();
        video.update(Duration::from_secs(3));
        assert_eq!(video.state(), VideoState::Ended);

        video.set_position(Duration::from_secs(1));
        assert_eq!(video.state(), VideoState::Paused);
    }

    #[test]
    fn test_play_after_ended_restarts() {
        let video = VideoBackend::new();
        video.set_source(&source());
        video.set_ready(Duration::from_secs(2));
        video.play();
        video.update(Duration::from_secs(3));
        assert_eq!(video.state(), VideoState::Ended);

        video.play();
        assert_eq!(video.state(), VideoState::Playing);
        assert_eq!(video.position(), Duration::ZERO);
    }

    #[test]
    fn test_set_source_resets_position() {
        let video = VideoBackend::new();
        video.set_source(&source());
        video.set_ready(Duration::from_secs(120));
        video.set_position(Duration::from_secs(60));

        let reloaded = Url::parse("https://example.com/clip.mp4?reload=1").unwrap();
        video.set_source(&reloaded);

        assert_eq!(video.position(), Duration::ZERO);
        assert_eq!(video.state(), VideoState::Loading);
        assert_eq!(video.source(), Some(reloaded));
    }
}
