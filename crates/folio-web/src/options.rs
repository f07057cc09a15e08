#![forbid(unsafe_code)]

//! JS options handling.
//!
//! The JS host passes a plain object; the wasm layer serializes it with
//! `JSON.stringify` and hands the text here.

use core::time::Duration;

use folio_core::{PageConfig, PageError};
use tracing::Level;

/// Parse the options JSON, treating absent/`null`/`undefined` as defaults.
pub fn parse_options(json: Option<&str>) -> Result<PageConfig, PageError> {
    match json.map(str::trim) {
        None | Some("") | Some("null") | Some("undefined") => Ok(PageConfig::default()),
        Some(text) => PageConfig::from_json(text),
    }
}

/// The effective options as JSON, defaults filled in.
pub fn effective_options(config: &PageConfig) -> Result<String, PageError> {
    serde_json::to_string(config).map_err(|e| PageError::Config(e.to_string()))
}

/// Maximum log level named by the config.
pub fn log_level(config: &PageConfig) -> Result<Level, PageError> {
    config
        .log_level
        .parse::<Level>()
        .map_err(|_| PageError::Config(format!("unknown log level {:?}", config.log_level)))
}

/// Convert a DOM high-resolution timestamp (milliseconds) to the controller
/// clock. Negative and non-finite readings map to zero.
#[must_use]
pub fn host_time(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::from_secs_f64(ms / 1_000.0)
    } else {
        Duration::ZERO
    }
}
