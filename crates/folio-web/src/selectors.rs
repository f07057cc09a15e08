#![forbid(unsafe_code)]

//! The document structure the controller expects.

pub const THEME_TOGGLE: &str = "#theme-toggle";
pub const CURSOR: &str = ".cursor";
pub const CURSOR_FOLLOWER: &str = ".cursor-follower";
pub const HAMBURGER: &str = "#hamburger";
pub const NAV_MENU: &str = "#nav-menu";
pub const NAV_LINKS: &str = ".nav-link";
pub const NAVBAR: &str = "#navbar";
pub const HERO_CONTENT: &str = "#hero .hero-content";
/// Sections that nav links can point at.
pub const SECTIONS: &str = "section[id]";
/// Fade-in candidates.
pub const REVEAL: &str = "section, .project-card, .skill-card";
/// Elements that enlarge the custom cursor on hover.
pub const INTERACTIVE: &str = "a, button, .project-card, .skill-card, .contact-link";
/// In-page anchors handled by smooth scrolling.
pub const ANCHORS: &str = "a[href^=\"#\"]";
pub const IMAGES: &str = "img";

/// Selector for the element an in-page `href` points at.
///
/// Returns `None` for a bare `#` and for anything that is not a simple
/// fragment, so the host never hands `querySelector` a string that throws.
#[must_use]
pub fn anchor_target(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    let mut chars = id.chars();
    let first = chars.next()?;
    let valid_start = first.is_alphabetic() || first == '_' || first == '-';
    let valid_rest = chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-');
    (valid_start && valid_rest).then_some(href)
}
