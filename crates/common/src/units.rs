//! Units for style values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A percentage, stored as its unit fraction.
///
/// `Percentage::new(25.0)` and `Percentage::from_fraction(0.25)` name the
/// same value. Formatting renders percent notation for style strings.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage {
    fraction: f32,
}

impl Percentage {
    /// Zero percent.
    pub const ZERO: Percentage = Percentage { fraction: 0.0 };

    /// One hundred percent.
    pub const FULL: Percentage = Percentage { fraction: 1.0 };

    /// Percentage from percent points.
    pub fn new(points: f32) -> Self {
        Self {
            fraction: points / 100.0,
        }
    }

    /// Percentage from a unit fraction (0.0 to 1.0).
    #[inline]
    pub const fn from_fraction(fraction: f32) -> Self {
        Self { fraction }
    }

    /// Percent points (0.0 to 100.0 over the unit range).
    pub fn points(self) -> f32 {
        self.fraction * 100.0
    }

    /// The unit fraction backing this percentage.
    #[inline]
    pub const fn as_fraction(self) -> f32 {
        self.fraction
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.points())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_and_fractions_agree() {
        assert_eq!(Percentage::new(50.0), Percentage::from_fraction(0.5));
        assert_eq!(Percentage::new(50.0).points(), 50.0);
        assert_eq!(Percentage::from_fraction(0.25).as_fraction(), 0.25);
    }

    #[test]
    fn test_style_notation() {
        assert_eq!(Percentage::from_fraction(0.5).to_string(), "50%");
        assert_eq!(Percentage::ZERO.to_string(), "0%");
        assert_eq!(Percentage::FULL.to_string(), "100%");
    }
}
