#![forbid(unsafe_code)]

//! Custom cursor with an eased follower.
//!
//! Two elements track the pointer. The cursor dot jumps to the raw pointer
//! position on every move; the follower ring closes a fixed fraction of the
//! remaining distance on every animation frame, which gives an exponential
//! ease: after `n` frames the gap is `d * (1 - factor)^n`.

use crate::effect::{Effect, Effects, Target};
use crate::geometry::{Point, px};

/// Default fraction of the remaining distance covered per frame.
pub const DEFAULT_FOLLOW_FACTOR: f64 = 0.1;

const SCALE_HOVER: &str = "scale(1.5)";
const SCALE_REST: &str = "scale(1)";
const FOLLOWER_OPACITY_HOVER: &str = "0.8";
const FOLLOWER_OPACITY_REST: &str = "0.5";

/// Pointer and follower positions plus hover state.
#[derive(Debug, Clone)]
pub struct CursorTracker {
    pointer: Point,
    follower: Point,
    factor: f64,
    hovering: bool,
}

impl Default for CursorTracker {
    fn default() -> Self {
        Self::new(DEFAULT_FOLLOW_FACTOR)
    }
}

impl CursorTracker {
    /// Both points start at the viewport origin.
    #[must_use]
    pub fn new(factor: f64) -> Self {
        Self {
            pointer: Point::ORIGIN,
            follower: Point::ORIGIN,
            factor: factor.clamp(0.0, 1.0),
            hovering: false,
        }
    }

    #[must_use]
    pub const fn pointer(&self) -> Point {
        self.pointer
    }

    #[must_use]
    pub const fn follower(&self) -> Point {
        self.follower
    }

    #[must_use]
    pub const fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Remaining distance between follower and pointer.
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.follower.distance_to(self.pointer)
    }

    /// Record a pointer move and place the cursor dot on it.
    pub fn pointer_moved(&mut self, at: Point) -> Effects {
        self.pointer = at;
        vec![
            Effect::set_style(Target::Cursor, "left", px(at.x)),
            Effect::set_style(Target::Cursor, "top", px(at.y)),
        ]
    }

    /// Advance the follower by one frame.
    pub fn frame(&mut self) -> Effects {
        self.follower = self.follower.lerp_toward(self.pointer, self.factor);
        vec![
            Effect::set_style(Target::Follower, "left", px(self.follower.x)),
            Effect::set_style(Target::Follower, "top", px(self.follower.y)),
        ]
    }

    /// Pointer entered (`true`) or left (`false`) an interactive element.
    pub fn set_hover(&mut self, hovering: bool) -> Effects {
        self.hovering = hovering;
        let (scale, opacity) = if hovering {
            (SCALE_HOVER, FOLLOWER_OPACITY_HOVER)
        } else {
            (SCALE_REST, FOLLOWER_OPACITY_REST)
        };
        vec![
            Effect::set_style(Target::Cursor, "transform", scale),
            Effect::set_style(Target::Follower, "transform", scale),
            Effect::set_style(Target::Follower, "opacity", opacity),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_move_positions_cursor_immediately() {
        let mut cursor = CursorTracker::default();
        let effects = cursor.pointer_moved(Point::new(120.0, 48.5));
        assert_eq!(
            effects,
            vec![
                Effect::set_style(Target::Cursor, "left", "120px"),
                Effect::set_style(Target::Cursor, "top", "48.5px"),
            ]
        );
        assert_eq!(cursor.follower(), Point::ORIGIN);
    }

    #[test]
    fn follower_covers_a_tenth_per_frame() {
        let mut cursor = CursorTracker::default();
        cursor.pointer_moved(Point::new(200.0, 0.0));
        cursor.frame();
        assert!((cursor.follower().x - 20.0).abs() < 1e-9);
        cursor.frame();
        assert!((cursor.follower().x - 38.0).abs() < 1e-9);
    }

    #[test]
    fn follower_never_overshoots() {
        let mut cursor = CursorTracker::default();
        cursor.pointer_moved(Point::new(-300.0, 150.0));
        let mut last_gap = cursor.gap();
        for _ in 0..200 {
            cursor.frame();
            assert!(cursor.follower().x >= -300.0);
            assert!(cursor.follower().y <= 150.0);
            assert!(cursor.gap() <= last_gap);
            last_gap = cursor.gap();
        }
        assert!(last_gap < 1e-6);
    }

    #[test]
    fn hover_scales_both_elements() {
        let mut cursor = CursorTracker::default();
        let enter = cursor.set_hover(true);
        assert!(cursor.is_hovering());
        assert!(enter.contains(&Effect::set_style(Target::Cursor, "transform", "scale(1.5)")));
        assert!(enter.contains(&Effect::set_style(Target::Follower, "transform", "scale(1.5)")));
        assert!(enter.contains(&Effect::set_style(Target::Follower, "opacity", "0.8")));

        let leave = cursor.set_hover(false);
        assert!(!cursor.is_hovering());
        assert!(leave.contains(&Effect::set_style(Target::Cursor, "transform", "scale(1)")));
        assert!(leave.contains(&Effect::set_style(Target::Follower, "opacity", "0.5")));
    }

    #[test]
    fn factor_is_clamped() {
        let mut cursor = CursorTracker::new(3.0);
        cursor.pointer_moved(Point::new(10.0, 10.0));
        cursor.frame();
        assert_eq!(cursor.follower(), Point::new(10.0, 10.0));
    }
}
