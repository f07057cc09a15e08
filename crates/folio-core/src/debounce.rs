#![forbid(unsafe_code)]

//! Host-clocked debouncing for bursty DOM events.
//!
//! [`Debouncer`] collapses a burst of triggers into at most two firings,
//! selected by [`Edge`]:
//!
//! - **Trailing**: fire once, `quiet` after the last trigger, carrying the
//!   latest payload (latest wins).
//! - **Leading**: fire on the first trigger of a burst and swallow the rest
//!   until `quiet` has passed without a trigger.
//! - **Both**: leading fire, plus a trailing fire if more triggers arrived
//!   during the burst.
//!
//! Time is supplied by the caller as a [`Duration`] since an arbitrary epoch
//! (page start on the web), so identical trigger sequences always produce
//! identical firings.
//!
//! # Usage
//!
//! ```
//! use core::time::Duration;
//! use folio_core::debounce::{DebounceConfig, Debouncer, Edge};
//!
//! let mut scroll = Debouncer::new(DebounceConfig::new(Duration::from_millis(100), Edge::Trailing));
//!
//! assert_eq!(scroll.trigger(Duration::from_millis(0), 10.0), None);
//! assert_eq!(scroll.trigger(Duration::from_millis(40), 25.0), None);
//! assert_eq!(scroll.poll(Duration::from_millis(120)), None);
//! assert_eq!(scroll.poll(Duration::from_millis(140)), Some(25.0));
//! ```
//!
//! # Invariants
//!
//! - **Latest-wins**: the trailing payload is always the last one triggered.
//! - **At most once per edge**: a burst fires at most one leading and one
//!   trailing event.
//! - **No spurious fires**: `poll` without a pending payload returns `None`.

use core::time::Duration;

use serde::{Deserialize, Serialize};

/// Which end of a burst produces a firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    #[default]
    Trailing,
    Leading,
    Both,
}

impl Edge {
    #[must_use]
    pub const fn leading(self) -> bool {
        matches!(self, Self::Leading | Self::Both)
    }

    #[must_use]
    pub const fn trailing(self) -> bool {
        matches!(self, Self::Trailing | Self::Both)
    }
}

/// Debounce configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    /// Quiet period that ends a burst.
    pub quiet: Duration,
    pub edge: Edge,
}

impl DebounceConfig {
    #[must_use]
    pub const fn new(quiet: Duration, edge: Edge) -> Self {
        Self { quiet, edge }
    }

    /// Trailing-edge debounce with the given quiet period.
    #[must_use]
    pub const fn trailing(quiet: Duration) -> Self {
        Self::new(quiet, Edge::Trailing)
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::trailing(Duration::from_millis(100))
    }
}

/// Rate limiter that fires at the edges of trigger bursts.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    config: DebounceConfig,
    last_trigger: Option<Duration>,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub const fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            last_trigger: None,
            pending: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> DebounceConfig {
        self.config
    }

    /// Record a trigger at `now`.
    ///
    /// Returns the payload immediately when this trigger opens a burst and
    /// the edge includes the leading side. Otherwise the payload is held for
    /// the trailing edge (if enabled) and `None` is returned.
    pub fn trigger(&mut self, now: Duration, payload: T) -> Option<T> {
        let in_burst = self
            .last_trigger
            .is_some_and(|last| now.saturating_sub(last) < self.config.quiet);
        self.last_trigger = Some(now);

        if !in_burst && self.config.edge.leading() {
            self.pending = None;
            return Some(payload);
        }
        if self.config.edge.trailing() {
            self.pending = Some(payload);
        }
        None
    }

    /// Advance to `now`; returns the trailing payload once the quiet period
    /// since the last trigger has elapsed.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        let last = self.last_trigger?;
        if now.saturating_sub(last) < self.config.quiet {
            return None;
        }
        self.last_trigger = None;
        self.pending.take()
    }

    /// Whether a trailing payload is waiting.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time at which the pending payload will fire, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        match (&self.pending, self.last_trigger) {
            (Some(_), Some(last)) => Some(last.saturating_add(self.config.quiet)),
            _ => None,
        }
    }

    /// Drop any pending payload and forget the current burst.
    pub fn cancel(&mut self) {
        self.last_trigger = None;
        self.pending = None;
    }
}
