#![forbid(unsafe_code)]

//! Viewport-space geometry shared by the pointer and scroll behaviors.

/// A point in CSS pixels, relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The viewport origin.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Move `factor` of the way from `self` toward `target`.
    ///
    /// `factor` is clamped to `[0, 1]`, so the result never passes `target`.
    #[must_use]
    pub fn lerp_toward(self, target: Self, factor: f64) -> Self {
        let t = factor.clamp(0.0, 1.0);
        Self {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
        }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Format a pixel length the way the DOM style setters expect it.
#[must_use]
pub fn px(value: f64) -> String {
    format!("{value}px")
}
