//! Property-based invariant tests for the page controller.
//!
//! Verifies:
//! 1. Theme parity: N toggles from dark leave dark iff N is even
//! 2. Theme persistence: stored value equals applied value after each toggle
//! 3. Menu flags: button and panel classes never disagree
//! 4. Menu closing: link and outside clicks always leave the menu closed
//! 5. Active section: an offset inside exactly one span activates its link only
//! 6. Lazy images: each deferred image promotes exactly once
//! 7. Follower easing: gap after N frames is D * 0.9^N, never overshooting
//! 8. Debounce: a burst below the quiet period fires once with the last payload

use core::time::Duration;
use std::collections::HashMap;

use folio_core::debounce::{DebounceConfig, Debouncer};
use folio_core::geometry::Point;
use folio_core::menu::{MenuInput, MenuState};
use folio_core::reveal::LazyImages;
use folio_core::scroll::{ScrollSnapshot, SectionSpan, highlight_links};
use folio_core::{
    Effect, FeatureSet, MemoryStore, PageConfig, PageController, PageManifest, Target, Theme,
};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_menu_input() -> impl Strategy<Value = MenuInput> {
    prop_oneof![
        Just(MenuInput::Toggle),
        Just(MenuInput::LinkActivated),
        any::<bool>().prop_map(|inside| MenuInput::DocumentClick { inside }),
    ]
}

/// Contiguous, non-overlapping sections with heights above the lookahead.
fn arb_sections() -> impl Strategy<Value = Vec<SectionSpan>> {
    prop::collection::vec(150.0f64..2_000.0, 1..8).prop_map(|heights| {
        let mut top = 0.0;
        heights
            .into_iter()
            .enumerate()
            .map(|(idx, height)| {
                let span = SectionSpan::new(format!("s{idx}"), top, height);
                top += height;
                span
            })
            .collect()
    })
}

fn started_page() -> PageController<MemoryStore> {
    let mut page = PageController::new(PageConfig::default(), MemoryStore::new());
    page.init(
        PageManifest::complete(),
        ScrollSnapshot::at(0.0, 900.0),
        Duration::ZERO,
    )
    .expect("first init succeeds");
    page
}

/// Replays class effects onto a name -> set map.
fn apply_classes(classes: &mut HashMap<Target, Vec<&'static str>>, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::AddClass { target, class } => {
                let entry = classes.entry(*target).or_default();
                if !entry.contains(class) {
                    entry.push(class);
                }
            }
            Effect::RemoveClass { target, class } => {
                classes.entry(*target).or_default().retain(|c| c != class);
            }
            _ => {}
        }
    }
}

fn has_class(classes: &HashMap<Target, Vec<&'static str>>, target: Target, class: &str) -> bool {
    classes
        .get(&target)
        .is_some_and(|set| set.iter().any(|c| *c == class))
}

proptest! {
    // 1 + 2
    #[test]
    fn theme_parity_and_persistence(toggles in 0usize..40) {
        let mut page = started_page();
        for _ in 0..toggles {
            page.toggle_theme();
            prop_assert_eq!(page.store().peek("theme"), Some(page.theme().as_str()));
        }
        let expected = if toggles % 2 == 0 { Theme::Dark } else { Theme::Light };
        prop_assert_eq!(page.theme(), expected);
    }

    // 3 + 4
    #[test]
    fn menu_flags_never_disagree(inputs in prop::collection::vec(arb_menu_input(), 0..64)) {
        let mut menu = MenuState::default();
        let mut classes = HashMap::new();
        for input in inputs {
            let effects = menu.apply(input);
            apply_classes(&mut classes, &effects);
            let button = has_class(&classes, Target::Hamburger, "active");
            let panel = has_class(&classes, Target::NavMenu, "active");
            prop_assert_eq!(button, panel);
            prop_assert_eq!(button, menu.is_open());
            if matches!(input, MenuInput::LinkActivated | MenuInput::DocumentClick { inside: false }) {
                prop_assert!(!menu.is_open());
            }
        }
    }

    // 5
    #[test]
    fn active_section_marks_single_link(sections in arb_sections(), pick in any::<prop::sample::Index>(), frac in 0.01f64..0.99) {
        let idx = pick.index(sections.len());
        let section = &sections[idx];
        let start = section.top - 100.0;
        let offset = start + section.height * frac;

        let hrefs: Vec<String> = sections.iter().map(|s| format!("#{}", s.id)).collect();
        let found = folio_core::scroll::active_section(&sections, offset, 100.0);
        prop_assert_eq!(found, Some(idx));

        let effects = highlight_links(&hrefs, Some(section.id.as_str()));
        let active: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::AddClass { target: Target::NavLink(i), .. } => Some(*i),
                _ => None,
            })
            .collect();
        prop_assert_eq!(active, vec![idx]);
    }

    // 6
    #[test]
    fn lazy_images_promote_once(
        deferred in prop::collection::vec(prop::option::of("[a-z]{1,8}\\.png"), 1..12),
        reports in prop::collection::vec((any::<prop::sample::Index>(), any::<bool>()), 0..64),
    ) {
        let mut images = LazyImages::new(deferred.clone());
        let mut promotions = vec![0usize; deferred.len()];
        for (pick, intersecting) in reports {
            let idx = pick.index(deferred.len());
            let effects = images.intersect(idx, intersecting);
            if effects.contains(&Effect::Unobserve(Target::Image(idx))) {
                promotions[idx] += 1;
            }
        }
        for (idx, src) in deferred.iter().enumerate() {
            prop_assert!(promotions[idx] <= 1);
            if src.is_none() {
                prop_assert_eq!(promotions[idx], 0);
            }
        }
    }

    // 7
    #[test]
    fn follower_gap_decays_geometrically(
        tx in -2_000.0f64..2_000.0,
        ty in -2_000.0f64..2_000.0,
        frames in 0u32..120,
    ) {
        let mut page = started_page();
        let target = Point::new(tx, ty);
        page.pointer_moved(target);
        let start = page.cursor().gap();
        let mut last = start;
        for _ in 0..frames {
            page.frame(Duration::ZERO);
            let gap = page.cursor().gap();
            prop_assert!(gap <= last + 1e-9);
            last = gap;
        }
        let expected = start * 0.9f64.powi(frames as i32);
        prop_assert!((last - expected).abs() <= 1e-6 * start.max(1.0));
        let follower = page.cursor().follower();
        prop_assert!(follower.x.abs() <= tx.abs() + 1e-9);
        prop_assert!(follower.y.abs() <= ty.abs() + 1e-9);
    }

    // 8
    #[test]
    fn trailing_burst_fires_once(gaps in prop::collection::vec(0u64..100, 1..32)) {
        let mut debouncer = Debouncer::new(DebounceConfig::trailing(Duration::from_millis(100)));
        let mut now = 0u64;
        let mut fired = Vec::new();
        for (i, gap) in gaps.iter().enumerate() {
            now += gap;
            if let Some(v) = debouncer.poll(Duration::from_millis(now)) {
                fired.push(v);
            }
            prop_assert!(debouncer.trigger(Duration::from_millis(now), i).is_none());
        }
        prop_assert!(fired.is_empty());
        prop_assert_eq!(debouncer.poll(Duration::from_millis(now + 100)), Some(gaps.len() - 1));
        prop_assert_eq!(debouncer.poll(Duration::from_millis(now + 500)), None);
    }
}

#[test]
fn disabled_features_never_emit() {
    let config = PageConfig::default().with_features(FeatureSet::THEME);
    let mut page = PageController::new(config, MemoryStore::new());
    page.init(
        PageManifest::complete(),
        ScrollSnapshot::at(0.0, 900.0),
        Duration::ZERO,
    )
    .expect("first init succeeds");
    assert!(page.pointer_moved(Point::new(3.0, 4.0)).is_empty());
    assert!(page.menu(MenuInput::Toggle).is_empty());
    assert!(page.anchor_activated(Some(100.0)).is_empty());
    assert!(page.frame(Duration::from_millis(16)).is_empty());
    assert!(!page.toggle_theme().is_empty());
}
