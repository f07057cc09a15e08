#![forbid(unsafe_code)]

//! Core: deterministic page behaviors for the Folio portfolio controller.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding page pushes pointer, click, scroll,
//!   intersection and frame events into a [`PageController`].
//! - **Deterministic time**: the host supplies a monotonic clock reading
//!   with every time-dependent call.
//! - **No DOM access**: every behavior returns [`Effect`]s that the host
//!   applies, so the whole controller runs and tests on native targets.

pub mod config;
pub mod cursor;
pub mod debounce;
pub mod effect;
pub mod geometry;
pub mod logging;
pub mod menu;
pub mod page;
pub mod preference;
pub mod reveal;
pub mod scroll;
pub mod theme;
pub mod typewriter;

use core::fmt;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, trace, warn};

pub use config::{FeatureSet, PageConfig};
pub use effect::{Effect, Effects, Target};
pub use page::{InitReport, PageController, PageManifest};
pub use preference::{MemoryStore, PreferenceStore, StorageError};
pub use theme::Theme;

/// Controller error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// A feature's collaborator element is missing from the page.
    Absent {
        feature: FeatureSet,
        element: &'static str,
    },
    /// The preference store failed.
    Storage(StorageError),
    /// Options could not be parsed or hold unusable values.
    Config(String),
    /// `init` was called on a controller that already started.
    AlreadyStarted,
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent { feature, element } => {
                write!(f, "{} disabled: missing {element}", feature.name())
            }
            Self::Storage(err) => write!(f, "preference store: {err}"),
            Self::Config(msg) => write!(f, "invalid options: {msg}"),
            Self::AlreadyStarted => f.write_str("controller already started"),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for PageError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}
