//! Media playback for the player engine.
//!
//! This crate provides:
//! - The backend abstraction the controller drives playback through
//! - A deterministic built-in video engine for tests and headless hosts

pub mod backend;
pub mod video;

pub use backend::{MediaBackend, MediaEvent};
pub use video::{VideoBackend, VideoState};
