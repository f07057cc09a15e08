#![forbid(unsafe_code)]

//! Color theme and the navbar tints that depend on it.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Root-element attribute that carries the active theme.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Page color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Value written to `data-theme` and to the preference store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Navbar background for this theme.
    ///
    /// `scrolled` is true once the page has moved past the navbar threshold;
    /// the bar becomes slightly more opaque there.
    #[must_use]
    pub const fn navbar_background(self, scrolled: bool) -> &'static str {
        match (self, scrolled) {
            (Self::Light, true) => "rgba(255, 255, 255, 0.95)",
            (Self::Light, false) => "rgba(255, 255, 255, 0.9)",
            (Self::Dark, true) => "rgba(26, 31, 58, 0.95)",
            (Self::Dark, false) => "rgba(26, 31, 58, 0.8)",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored preference that is neither `dark` nor `light`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme {:?}", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_an_involution() {
        for theme in [Theme::Dark, Theme::Light] {
            assert_ne!(theme.toggled(), theme);
            assert_eq!(theme.toggled().toggled(), theme);
        }
    }

    #[test]
    fn parse_accepts_only_stored_spellings() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!(
            "Light".parse::<Theme>(),
            Err(UnknownTheme("Light".to_string()))
        );
    }

    #[test]
    fn default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn navbar_tints() {
        assert_eq!(Theme::Dark.navbar_background(false), "rgba(26, 31, 58, 0.8)");
        assert_eq!(Theme::Dark.navbar_background(true), "rgba(26, 31, 58, 0.95)");
        assert_eq!(Theme::Light.navbar_background(false), "rgba(255, 255, 255, 0.9)");
        assert_eq!(Theme::Light.navbar_background(true), "rgba(255, 255, 255, 0.95)");
    }
}
