#![forbid(unsafe_code)]

//! Scroll-driven behaviors: active-section highlight, navbar tint, hero
//! parallax and in-page smooth scrolling.
//!
//! All functions here are pure. The host reports the window position as a
//! [`ScrollSnapshot`], measures sections through a [`SectionLayout`] when
//! asked, and the controller decides what to change.

use serde::{Deserialize, Serialize};

use crate::effect::{Effect, Effects, Target};
use crate::geometry::px;
use crate::theme::Theme;

/// Class that marks the nav link of the section in view.
pub const ACTIVE_CLASS: &str = "active";

/// Vertical extent of one `section[id]`, in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    #[must_use]
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Whether `offset` falls in `[top - lookahead, top - lookahead + height)`.
    #[must_use]
    pub fn contains(&self, offset: f64, lookahead: f64) -> bool {
        let start = self.top - lookahead;
        offset >= start && offset < start + self.height
    }
}

/// Window measurements taken at one scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollSnapshot {
    /// `window.scrollY`.
    pub offset: f64,
    /// `window.innerHeight`.
    pub viewport_height: f64,
}

impl ScrollSnapshot {
    #[must_use]
    pub const fn at(offset: f64, viewport_height: f64) -> Self {
        Self {
            offset,
            viewport_height,
        }
    }
}

/// Measures the sections in document order.
///
/// Reading section geometry forces layout, so the controller calls this only
/// when it recomputes the active section: at start and when the scroll
/// debouncer fires.
pub type SectionLayout = Box<dyn Fn() -> Vec<SectionSpan>>;

/// Pixel constants for the scroll behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollTuning {
    /// Space left above a smooth-scroll target for the fixed header.
    pub header_offset: f64,
    /// How far ahead of a section's top it already counts as active.
    pub section_lookahead: f64,
    /// Offset beyond which the navbar switches to its scrolled tint.
    pub navbar_threshold: f64,
    /// Hero translation per pixel scrolled.
    pub parallax_rate: f64,
    /// Opacity lost by the hero over one viewport height.
    pub parallax_fade: f64,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            header_offset: 80.0,
            section_lookahead: 100.0,
            navbar_threshold: 50.0,
            parallax_rate: 0.3,
            parallax_fade: 0.5,
        }
    }
}

/// Index of the section whose span contains `offset`.
///
/// When spans overlap the later section wins.
#[must_use]
pub fn active_section(sections: &[SectionSpan], offset: f64, lookahead: f64) -> Option<usize> {
    sections
        .iter()
        .rposition(|section| section.contains(offset, lookahead))
}

/// The `href` a nav link carries to point at section `id`.
#[must_use]
pub fn section_anchor(id: &str) -> String {
    format!("#{id}")
}

/// Class changes that leave exactly the link pointing at `section_id`
/// active (or none, when `section_id` is `None`).
#[must_use]
pub fn highlight_links(link_hrefs: &[String], section_id: Option<&str>) -> Effects {
    let anchor = section_id.map(section_anchor);
    link_hrefs
        .iter()
        .enumerate()
        .map(|(idx, href)| {
            if anchor.as_deref() == Some(href.as_str()) {
                Effect::add_class(Target::NavLink(idx), ACTIVE_CLASS)
            } else {
                Effect::remove_class(Target::NavLink(idx), ACTIVE_CLASS)
            }
        })
        .collect()
}

/// Navbar background for the given theme and scroll offset.
#[must_use]
pub fn navbar_effect(theme: Theme, offset: f64, threshold: f64) -> Effect {
    Effect::set_style(
        Target::Navbar,
        "background",
        theme.navbar_background(offset > threshold),
    )
}

/// Hero translation and fade while the hero is still on screen.
///
/// Returns no effects once `offset` reaches one viewport height; the last
/// applied values stay in place.
#[must_use]
pub fn parallax_effects(offset: f64, viewport_height: f64, tuning: &ScrollTuning) -> Effects {
    if viewport_height <= 0.0 || offset >= viewport_height {
        return Vec::new();
    }
    let translate = offset * tuning.parallax_rate;
    let opacity = 1.0 - (offset / viewport_height) * tuning.parallax_fade;
    vec![
        Effect::set_style(
            Target::HeroContent,
            "transform",
            format!("translateY({})", px(translate)),
        ),
        Effect::set_style(Target::HeroContent, "opacity", opacity.to_string()),
    ]
}

/// Smooth scroll to an anchor target, leaving room for the header.
///
/// `target_top` is `None` when the anchor points nowhere.
#[must_use]
pub fn anchor_scroll(target_top: Option<f64>, header_offset: f64) -> Option<Effect> {
    target_top.map(|top| Effect::ScrollTo {
        top: top - header_offset,
        smooth: true,
    })
}
