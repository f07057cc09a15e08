#![forbid(unsafe_code)]

//! Controller configuration.
//!
//! [`PageConfig`] carries every tunable of the page behaviors. All fields
//! have defaults matching the stock portfolio page, so an empty JSON object
//! (or no options at all) yields the standard behavior.
//!
//! ```
//! use folio_core::config::{FeatureSet, PageConfig};
//!
//! let config = PageConfig::from_json(r#"{ "scroll_debounce_ms": 50 }"#).unwrap();
//! assert_eq!(config.scroll_debounce_ms, 50);
//! assert!(config.features.contains(FeatureSet::CURSOR));
//! assert!(!config.features.contains(FeatureSet::TYPEWRITER));
//! ```

use core::time::Duration;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::PageError;
use crate::debounce::{DebounceConfig, Edge};
use crate::reveal::ObserverOptions;
use crate::scroll::ScrollTuning;
use crate::theme::Theme;
use crate::typewriter::DEFAULT_TYPE_DELAY;

bitflags! {
    /// Independently switchable page behaviors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct FeatureSet: u16 {
        const THEME          = 1 << 0;
        const CURSOR         = 1 << 1;
        const MENU           = 1 << 2;
        const SMOOTH_SCROLL  = 1 << 3;
        const REVEAL         = 1 << 4;
        const ACTIVE_SECTION = 1 << 5;
        const NAVBAR         = 1 << 6;
        const PARALLAX       = 1 << 7;
        const TYPEWRITER     = 1 << 8;
        const LAZY_IMAGES    = 1 << 9;
        const IMAGE_FALLBACK = 1 << 10;
    }
}

impl FeatureSet {
    /// Everything the stock page runs. The typing effect is opt-in.
    #[must_use]
    pub const fn standard() -> Self {
        Self::all().difference(Self::TYPEWRITER)
    }

    /// Name of a single flag (or the first flag of a set).
    #[must_use]
    pub fn name(self) -> &'static str {
        self.iter_names().next().map_or("NONE", |(name, _)| name)
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Opt-in typing effect settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypewriterConfig {
    /// Element whose text is retyped.
    pub selector: String,
    /// Delay between characters, in milliseconds.
    #[serde(default = "default_type_delay_ms")]
    pub delay_ms: u64,
}

fn default_type_delay_ms() -> u64 {
    DEFAULT_TYPE_DELAY.as_millis() as u64
}

impl TypewriterConfig {
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            delay_ms: default_type_delay_ms(),
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Configuration for the page controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Preference-store key holding the theme.
    pub storage_key: String,
    /// Theme used when nothing valid is stored.
    pub default_theme: Theme,
    /// Behaviors to run.
    pub features: FeatureSet,
    /// Fraction of the remaining distance the cursor follower covers per frame.
    pub follow_factor: f64,
    pub scroll: ScrollTuning,
    /// Quiet period before the active section is recomputed.
    pub scroll_debounce_ms: u64,
    pub scroll_debounce_edge: Edge,
    pub reveal_observer: ObserverOptions,
    pub image_observer: ObserverOptions,
    /// Typing effect; only runs when set and `TYPEWRITER` is in `features`.
    pub typewriter: Option<TypewriterConfig>,
    /// Maximum log level (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            default_theme: Theme::Dark,
            features: FeatureSet::standard(),
            follow_factor: crate::cursor::DEFAULT_FOLLOW_FACTOR,
            scroll: ScrollTuning::default(),
            scroll_debounce_ms: 100,
            scroll_debounce_edge: Edge::Trailing,
            reveal_observer: ObserverOptions::reveal(),
            image_observer: ObserverOptions::lazy_images(),
            typewriter: None,
            log_level: "info".to_string(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON options object.
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PageError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no page could use.
    pub fn validate(&self) -> Result<(), PageError> {
        if self.storage_key.is_empty() {
            return Err(PageError::Config("storage_key must not be empty".into()));
        }
        if !(0.0..=1.0).contains(&self.follow_factor) {
            return Err(PageError::Config(format!(
                "follow_factor must be within [0, 1], got {}",
                self.follow_factor
            )));
        }
        for (name, observer) in [
            ("reveal_observer", &self.reveal_observer),
            ("image_observer", &self.image_observer),
        ] {
            if !(0.0..=1.0).contains(&observer.threshold) {
                return Err(PageError::Config(format!(
                    "{name}.threshold must be within [0, 1], got {}",
                    observer.threshold
                )));
            }
        }
        if let Some(tw) = &self.typewriter {
            if tw.selector.trim().is_empty() {
                return Err(PageError::Config(
                    "typewriter.selector must not be empty".into(),
                ));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }

    #[must_use]
    pub fn with_default_theme(mut self, theme: Theme) -> Self {
        self.default_theme = theme;
        self
    }

    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Enable the typing effect on `config.selector`.
    #[must_use]
    pub fn with_typewriter(mut self, config: TypewriterConfig) -> Self {
        self.typewriter = Some(config);
        self.features |= FeatureSet::TYPEWRITER;
        self
    }

    /// Debounce settings for the active-section recomputation.
    #[must_use]
    pub const fn scroll_debounce(&self) -> DebounceConfig {
        DebounceConfig::new(
            Duration::from_millis(self.scroll_debounce_ms),
            self.scroll_debounce_edge,
        )
    }
}
