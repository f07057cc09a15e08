#![forbid(unsafe_code)]

//! DOM mutations requested by the controller.
//!
//! The core never touches the document. Every behavior returns [`Effect`]s
//! and the host applies them in order. Element addressing is by role or by
//! index into the lists of the page manifest.

/// An element the controller can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// `document.documentElement`.
    Root,
    /// `document.body`.
    Body,
    /// `.cursor`.
    Cursor,
    /// `.cursor-follower`.
    Follower,
    /// `#hamburger`.
    Hamburger,
    /// `#nav-menu`.
    NavMenu,
    /// `#navbar`.
    Navbar,
    /// `#hero .hero-content`.
    HeroContent,
    /// Element receiving the typing effect.
    Typewriter,
    /// The n-th `.nav-link`.
    NavLink(usize),
    /// The n-th fade-in candidate (sections and cards).
    Reveal(usize),
    /// The n-th `img`.
    Image(usize),
}

/// A single DOM mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SetAttribute {
        target: Target,
        name: &'static str,
        value: String,
    },
    RemoveAttribute {
        target: Target,
        name: &'static str,
    },
    AddClass {
        target: Target,
        class: &'static str,
    },
    RemoveClass {
        target: Target,
        class: &'static str,
    },
    SetStyle {
        target: Target,
        property: &'static str,
        value: String,
    },
    SetText {
        target: Target,
        text: String,
    },
    /// Scroll the window to an absolute vertical offset.
    ScrollTo { top: f64, smooth: bool },
    /// Stop reporting intersections for the element.
    Unobserve(Target),
    /// Emit a console warning.
    Warn(String),
}

impl Effect {
    pub fn set_style(target: Target, property: &'static str, value: impl Into<String>) -> Self {
        Self::SetStyle {
            target,
            property,
            value: value.into(),
        }
    }

    pub fn add_class(target: Target, class: &'static str) -> Self {
        Self::AddClass { target, class }
    }

    pub fn remove_class(target: Target, class: &'static str) -> Self {
        Self::RemoveClass { target, class }
    }

    /// The element this effect touches, if any.
    #[must_use]
    pub const fn target(&self) -> Option<Target> {
        match self {
            Self::SetAttribute { target, .. }
            | Self::RemoveAttribute { target, .. }
            | Self::AddClass { target, .. }
            | Self::RemoveClass { target, .. }
            | Self::SetStyle { target, .. }
            | Self::SetText { target, .. }
            | Self::Unobserve(target) => Some(*target),
            Self::ScrollTo { .. } | Self::Warn(_) => None,
        }
    }
}

/// Ordered batch of effects produced by one controller call.
pub type Effects = Vec<Effect>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_of_element_effects() {
        assert_eq!(
            Effect::add_class(Target::NavLink(2), "active").target(),
            Some(Target::NavLink(2))
        );
        assert_eq!(
            Effect::Unobserve(Target::Image(0)).target(),
            Some(Target::Image(0))
        );
    }

    #[test]
    fn window_effects_have_no_target() {
        assert_eq!(
            Effect::ScrollTo {
                top: 0.0,
                smooth: true
            }
            .target(),
            None
        );
        assert_eq!(Effect::Warn("x".into()).target(), None);
    }
}
