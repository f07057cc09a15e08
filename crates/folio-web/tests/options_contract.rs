//! Options and selector contract shared with the JS host.
//!
//! These run natively; the wasm layer only adds `JSON.stringify` in front of
//! `parse_options`.

use core::time::Duration;

use folio_core::debounce::Edge;
use folio_core::{FeatureSet, PageError, Theme};
use folio_web::options::{effective_options, parse_options};
use folio_web::selectors;
use pretty_assertions::assert_eq;

#[test]
fn host_defaults_match_the_portfolio_page() {
    let config = parse_options(None).unwrap();
    assert_eq!(config.storage_key, "theme");
    assert_eq!(config.default_theme, Theme::Dark);
    assert_eq!(config.features, FeatureSet::standard());
    assert!(!config.features.contains(FeatureSet::TYPEWRITER));
    assert_eq!(config.scroll.header_offset, 80.0);
    assert_eq!(config.scroll_debounce().quiet, Duration::from_millis(100));
    assert_eq!(config.scroll_debounce().edge, Edge::Trailing);
    assert_eq!(config.reveal_observer.root_margin, "0px 0px -50px 0px");
}

#[test]
fn typewriter_options_from_js() {
    let config = parse_options(Some(
        r##"{
            "features": "THEME | TYPEWRITER",
            "typewriter": { "selector": "#hero h1", "delay_ms": 80 }
        }"##,
    ))
    .unwrap();
    let typewriter = config.typewriter.as_ref().unwrap();
    assert_eq!(typewriter.selector, "#hero h1");
    assert_eq!(typewriter.delay(), Duration::from_millis(80));
    assert!(config.features.contains(FeatureSet::TYPEWRITER));
}

#[test]
fn unknown_fields_are_ignored_and_bad_values_rejected() {
    // Unknown keys are ignored.
    assert!(parse_options(Some(r#"{ "sparkles": true }"#)).is_ok());
    assert!(matches!(
        parse_options(Some(r#"{ "default_theme": "sepia" }"#)),
        Err(PageError::Config(_))
    ));
    assert!(matches!(
        parse_options(Some(r#"{ "storage_key": "" }"#)),
        Err(PageError::Config(_))
    ));
}

#[test]
fn effective_options_round_trip_through_the_host() {
    let config = parse_options(Some(r#"{ "default_theme": "light" }"#)).unwrap();
    let json = effective_options(&config).unwrap();
    assert_eq!(parse_options(Some(&json)).unwrap(), config);
}

#[test]
fn anchors_resolve_to_section_selectors() {
    assert_eq!(selectors::anchor_target("#projects"), Some("#projects"));
    assert_eq!(selectors::anchor_target("#"), None);
    assert_eq!(selectors::anchor_target("https://example.com/#x"), None);
}
