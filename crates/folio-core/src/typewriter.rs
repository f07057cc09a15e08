#![forbid(unsafe_code)]

//! Character-by-character text reveal.
//!
//! Opt-in: the default page never enables it. When started, the first
//! character shows immediately and one more appears every `delay`, driven by
//! the host frame clock. A slow frame catches up by revealing several
//! characters at once.

use core::time::Duration;

use crate::effect::{Effect, Effects, Target};

/// Default per-character delay.
pub const DEFAULT_TYPE_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
    delay: Duration,
    started_at: Option<Duration>,
}

impl Typewriter {
    #[must_use]
    pub fn new(text: &str, delay: Duration) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
            delay,
            started_at: None,
        }
    }

    /// Number of characters currently visible.
    #[must_use]
    pub const fn shown(&self) -> usize {
        self.shown
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.started_at.is_some() && self.shown >= self.chars.len()
    }

    /// Clear the element and reveal the first character.
    pub fn start(&mut self, now: Duration) -> Effects {
        self.started_at = Some(now);
        self.shown = self.chars.len().min(1);
        vec![self.text_effect()]
    }

    /// Reveal every character that is due at `now`.
    pub fn frame(&mut self, now: Duration) -> Effects {
        let Some(started_at) = self.started_at else {
            return Vec::new();
        };
        if self.is_done() {
            return Vec::new();
        }
        let due = if self.delay.is_zero() {
            self.chars.len()
        } else {
            let elapsed = now.saturating_sub(started_at);
            let steps = elapsed.as_nanos() / self.delay.as_nanos();
            usize::try_from(steps)
                .unwrap_or(usize::MAX)
                .saturating_add(1)
                .min(self.chars.len())
        };
        if due <= self.shown {
            return Vec::new();
        }
        self.shown = due;
        vec![self.text_effect()]
    }

    fn text_effect(&self) -> Effect {
        Effect::SetText {
            target: Target::Typewriter,
            text: self.chars[..self.shown].iter().collect(),
        }
    }
}
