#![forbid(unsafe_code)]

//! Mobile navigation menu.
//!
//! The open flag is mirrored as the `active` class on both the hamburger
//! button and the menu panel. Every transition emits the class for both
//! elements together, so the two flags can never disagree.

use crate::effect::{Effect, Effects, Target};

/// Class that marks the menu (and its button) as open.
pub const OPEN_CLASS: &str = "active";

/// Input to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuInput {
    /// The hamburger button was activated.
    Toggle,
    /// A navigation link inside the menu was activated.
    LinkActivated,
    /// A click landed somewhere in the document. `inside` is true when the
    /// click target is contained by the button or the panel.
    DocumentClick { inside: bool },
}

/// Open/closed state of the mobile menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        self.open
    }

    /// Apply `input` and return the class changes.
    ///
    /// Inside clicks produce no effects; the button's own handler already
    /// toggled the state for the same click.
    pub fn apply(&mut self, input: MenuInput) -> Effects {
        let next = match input {
            MenuInput::Toggle => !self.open,
            MenuInput::LinkActivated => false,
            MenuInput::DocumentClick { inside: true } => return Vec::new(),
            MenuInput::DocumentClick { inside: false } => false,
        };
        self.open = next;
        Self::effects_for(next)
    }

    fn effects_for(open: bool) -> Effects {
        if open {
            vec![
                Effect::add_class(Target::Hamburger, OPEN_CLASS),
                Effect::add_class(Target::NavMenu, OPEN_CLASS),
            ]
        } else {
            vec![
                Effect::remove_class(Target::Hamburger, OPEN_CLASS),
                Effect::remove_class(Target::NavMenu, OPEN_CLASS),
            ]
        }
    }
}
