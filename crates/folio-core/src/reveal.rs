#![forbid(unsafe_code)]

//! Visibility-driven one-shot transitions.
//!
//! Two element sets react to intersection reports from the host:
//!
//! - [`RevealSet`]: sections and cards fade in the first time they become
//!   visible and stay visible.
//! - [`LazyImages`]: images carrying a deferred source swap it in on their
//!   first intersection and are then unobserved.
//!
//! Both transitions are irreversible; repeated reports are no-ops.

use serde::{Deserialize, Serialize};

use crate::effect::{Effect, Effects, Target};
use crate::{debug, trace};

/// Class put on every reveal candidate at startup.
pub const FADE_IN_CLASS: &str = "fade-in";
/// Class added once a candidate has been seen.
pub const VISIBLE_CLASS: &str = "visible";
/// Attribute holding the deferred image URL.
pub const DEFERRED_SRC_ATTRIBUTE: &str = "data-src";

/// Options passed to the host's intersection observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverOptions {
    /// Visible fraction that counts as an intersection.
    pub threshold: f64,
    /// CSS margin applied to the root bounds.
    pub root_margin: String,
}

impl ObserverOptions {
    /// Options for the fade-in observer.
    #[must_use]
    pub fn reveal() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }

    /// Options for the lazy-image observer (browser defaults).
    #[must_use]
    pub fn lazy_images() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px".to_string(),
        }
    }
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self::reveal()
    }
}

/// Fade-in candidates and whether each has been revealed.
#[derive(Debug, Clone, Default)]
pub struct RevealSet {
    revealed: Vec<bool>,
}

impl RevealSet {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            revealed: vec![false; count],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    #[must_use]
    pub fn is_revealed(&self, idx: usize) -> bool {
        self.revealed.get(idx).copied().unwrap_or(false)
    }

    /// Tag every candidate for the fade-in transition.
    #[must_use]
    pub fn startup_effects(&self) -> Effects {
        (0..self.revealed.len())
            .map(|idx| Effect::add_class(Target::Reveal(idx), FADE_IN_CLASS))
            .collect()
    }

    /// Handle an intersection report for candidate `idx`.
    pub fn intersect(&mut self, idx: usize, intersecting: bool) -> Effects {
        if !intersecting {
            return Vec::new();
        }
        match self.revealed.get_mut(idx) {
            Some(seen) if !*seen => {
                *seen = true;
                trace!(idx, "reveal");
                vec![Effect::add_class(Target::Reveal(idx), VISIBLE_CLASS)]
            }
            _ => Vec::new(),
        }
    }
}

/// Load state of one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageState {
    /// Carries a deferred source not yet swapped in.
    Pending { deferred_src: String },
    /// Deferred source promoted to `src`.
    Loaded,
    /// No deferred source; loads eagerly and is never observed.
    Eager,
    /// Hidden after a load error. Terminal.
    Failed,
}

/// Every `img` on the page, indexed in manifest order.
#[derive(Debug, Clone, Default)]
pub struct LazyImages {
    images: Vec<ImageState>,
}

impl LazyImages {
    /// Build from each image's deferred source, if it has one.
    #[must_use]
    pub fn new<I, S>(deferred_sources: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let images = deferred_sources
            .into_iter()
            .map(|src| match src {
                Some(deferred) => ImageState::Pending {
                    deferred_src: deferred.into(),
                },
                None => ImageState::Eager,
            })
            .collect();
        Self { images }
    }

    #[must_use]
    pub fn state(&self, idx: usize) -> Option<&ImageState> {
        self.images.get(idx)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Indices the host should observe.
    pub fn pending(&self) -> impl Iterator<Item = usize> + '_ {
        self.images
            .iter()
            .enumerate()
            .filter(|(_, state)| matches!(state, ImageState::Pending { .. }))
            .map(|(idx, _)| idx)
    }

    /// Handle an intersection report for image `idx`.
    pub fn intersect(&mut self, idx: usize, intersecting: bool) -> Effects {
        if !intersecting {
            return Vec::new();
        }
        let Some(state) = self.images.get_mut(idx) else {
            return Vec::new();
        };
        let ImageState::Pending { deferred_src } = state else {
            return Vec::new();
        };
        let deferred_src = std::mem::take(deferred_src);
        *state = ImageState::Loaded;
        debug!(idx, src = %deferred_src, "lazy image promoted");
        vec![
            Effect::SetAttribute {
                target: Target::Image(idx),
                name: "src",
                value: deferred_src,
            },
            Effect::RemoveAttribute {
                target: Target::Image(idx),
                name: DEFERRED_SRC_ATTRIBUTE,
            },
            Effect::Unobserve(Target::Image(idx)),
        ]
    }

    /// Handle a load error for image `idx`: hide it and warn.
    ///
    /// An image still waiting for its deferred source is also unobserved;
    /// a hidden element never needs the swap.
    pub fn load_failed(&mut self, idx: usize, src: &str) -> Effects {
        let mut effects = vec![
            Effect::set_style(Target::Image(idx), "display", "none"),
            Effect::Warn(format!("Image failed to load: {src}")),
        ];
        if let Some(state) = self.images.get_mut(idx) {
            if matches!(state, ImageState::Pending { .. }) {
                effects.push(Effect::Unobserve(Target::Image(idx)));
            }
            *state = ImageState::Failed;
        }
        effects
    }
}
