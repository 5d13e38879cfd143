//! Common utilities and types used across the player engine.

pub mod error;
pub mod units;

pub use error::{PlayerError, PlayerResult};
pub use units::Percentage;
