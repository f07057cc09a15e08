#![forbid(unsafe_code)]

//! The page behavior controller.
//!
//! [`PageController`] owns every piece of mutable page state: theme, cursor
//! positions, menu flag, reveal and lazy-image sets, the scroll debouncer
//! and the optional typing effect. The host drives it:
//!
//! 1. [`PageController::new`] with a [`PageConfig`] and a preference store,
//!    plus [`with_section_layout`](PageController::with_section_layout) to
//!    measure sections on demand.
//! 2. [`PageController::init`] once, with a [`PageManifest`] describing what
//!    the page actually contains and the initial [`ScrollSnapshot`].
//! 3. Event methods ([`scrolled`](PageController::scrolled),
//!    [`pointer_moved`](PageController::pointer_moved), ...) as DOM events
//!    arrive, and [`frame`](PageController::frame) once per animation frame.
//! 4. [`teardown`](PageController::teardown) when the page goes away.
//!
//! Every call returns the [`Effects`] to apply, in order.
//!
//! # Invariants
//!
//! - A feature whose elements are missing is disabled and produces no
//!   effects; the other features are unaffected.
//! - Nothing but `init` produces effects before `init` or after `teardown`.
//! - The root `data-theme` attribute always equals the last theme written
//!   to the store in this session.

use core::time::Duration;

use crate::{PageError, debug, info, warn};
use crate::config::{FeatureSet, PageConfig};
use crate::cursor::CursorTracker;
use crate::debounce::Debouncer;
use crate::effect::{Effect, Effects, Target};
use crate::geometry::Point;
use crate::menu::{MenuInput, MenuState};
use crate::preference::{PreferenceStore, load_theme, save_theme};
use crate::reveal::{LazyImages, RevealSet};
use crate::scroll::{
    ScrollSnapshot, SectionLayout, SectionSpan, active_section, anchor_scroll, highlight_links,
    navbar_effect, parallax_effects,
};
use crate::theme::{THEME_ATTRIBUTE, Theme};
use crate::typewriter::Typewriter;

/// Class added to `<body>` once the controller has started.
pub const LOADED_CLASS: &str = "loaded";

/// What the host found on the page.
///
/// Booleans report whether a single required element exists. Lists are in
/// document order and define the indices used by [`Target::NavLink`],
/// [`Target::Reveal`] and [`Target::Image`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageManifest {
    pub theme_toggle: bool,
    pub cursor: bool,
    pub follower: bool,
    pub hamburger: bool,
    pub nav_menu: bool,
    pub navbar: bool,
    pub hero_content: bool,
    /// `href` of each `.nav-link`.
    pub nav_links: Vec<String>,
    /// Number of fade-in candidates (sections and cards).
    pub reveal_count: usize,
    /// Deferred source of each `img`, `None` for eager images.
    pub images: Vec<Option<String>>,
    /// Original text of the typing-effect target, when it exists.
    pub typewriter_text: Option<String>,
}

impl PageManifest {
    /// A manifest in which every single-element collaborator exists.
    #[must_use]
    pub fn complete() -> Self {
        Self {
            theme_toggle: true,
            cursor: true,
            follower: true,
            hamburger: true,
            nav_menu: true,
            navbar: true,
            hero_content: true,
            ..Self::default()
        }
    }

    fn missing_for(&self, feature: FeatureSet, config: &PageConfig) -> Option<&'static str> {
        let required: Vec<(bool, &'static str)> = if feature == FeatureSet::THEME {
            vec![(self.theme_toggle, "#theme-toggle")]
        } else if feature == FeatureSet::CURSOR {
            vec![(self.cursor, ".cursor"), (self.follower, ".cursor-follower")]
        } else if feature == FeatureSet::MENU {
            vec![(self.hamburger, "#hamburger"), (self.nav_menu, "#nav-menu")]
        } else if feature == FeatureSet::NAVBAR {
            vec![(self.navbar, "#navbar")]
        } else if feature == FeatureSet::PARALLAX {
            vec![(self.hero_content, "#hero .hero-content")]
        } else if feature == FeatureSet::TYPEWRITER {
            vec![
                (config.typewriter.is_some(), "typewriter options"),
                (self.typewriter_text.is_some(), "typewriter target"),
            ]
        } else {
            Vec::new()
        };
        required
            .into_iter()
            .find(|(present, _)| !present)
            .map(|(_, element)| element)
    }
}

/// Outcome of [`PageController::init`].
#[derive(Debug, Clone, PartialEq)]
pub struct InitReport {
    /// Features that are running.
    pub enabled: FeatureSet,
    /// Requested features that were skipped, one error each.
    pub absent: Vec<PageError>,
    /// Theme applied at startup.
    pub theme: Theme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Running,
    TornDown,
}

/// Host-driven page behavior controller.
pub struct PageController<S: PreferenceStore = Box<dyn PreferenceStore>> {
    config: PageConfig,
    store: S,
    lifecycle: Lifecycle,
    enabled: FeatureSet,
    theme: Theme,
    cursor: CursorTracker,
    menu: MenuState,
    nav_links: Vec<String>,
    reveal: RevealSet,
    images: LazyImages,
    scroll_debounce: Debouncer<f64>,
    sections: SectionLayout,
    last_offset: f64,
    active_section: Option<String>,
    typewriter: Option<Typewriter>,
}

impl<S: PreferenceStore> PageController<S> {
    #[must_use]
    pub fn new(config: PageConfig, store: S) -> Self {
        let theme = config.default_theme;
        let cursor = CursorTracker::new(config.follow_factor);
        let scroll_debounce = Debouncer::new(config.scroll_debounce());
        Self {
            config,
            store,
            lifecycle: Lifecycle::Created,
            enabled: FeatureSet::empty(),
            theme,
            cursor,
            menu: MenuState::default(),
            nav_links: Vec::new(),
            reveal: RevealSet::default(),
            images: LazyImages::default(),
            scroll_debounce,
            sections: Box::new(Vec::new),
            last_offset: 0.0,
            active_section: None,
            typewriter: None,
        }
    }

    /// Measure sections with `layout` whenever the active section is
    /// recomputed. Without a layout the page has no sections and no link is
    /// ever highlighted.
    #[must_use]
    pub fn with_section_layout(
        mut self,
        layout: impl Fn() -> Vec<SectionSpan> + 'static,
    ) -> Self {
        self.sections = Box::new(layout);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &PageConfig {
        &self.config
    }

    /// The preference store, for inspection.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Features that passed the presence checks in `init`.
    #[must_use]
    pub const fn enabled(&self) -> FeatureSet {
        self.enabled
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Running)
    }

    #[must_use]
    pub const fn menu_open(&self) -> bool {
        self.menu.is_open()
    }

    #[must_use]
    pub const fn cursor(&self) -> &CursorTracker {
        &self.cursor
    }

    #[must_use]
    pub fn reveal(&self) -> &RevealSet {
        &self.reveal
    }

    #[must_use]
    pub fn images(&self) -> &LazyImages {
        &self.images
    }

    /// Id of the section whose nav link is currently active.
    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    fn runs(&self, feature: FeatureSet) -> bool {
        self.is_running() && self.enabled.contains(feature)
    }

    /// Start the controller.
    ///
    /// Applies the stored theme, tags fade-in candidates, sets the initial
    /// navbar tint and active link, marks the body loaded and starts the
    /// typing effect when configured. Missing collaborators disable only
    /// their own feature and are listed in the report.
    pub fn init(
        &mut self,
        manifest: PageManifest,
        snapshot: ScrollSnapshot,
        now: Duration,
    ) -> Result<(InitReport, Effects), PageError> {
        if self.lifecycle != Lifecycle::Created {
            return Err(PageError::AlreadyStarted);
        }

        let mut enabled = FeatureSet::empty();
        let mut absent = Vec::new();
        for (_, feature) in self.config.features.iter_names() {
            match manifest.missing_for(feature, &self.config) {
                None => enabled |= feature,
                Some(element) => {
                    warn!(feature = feature.name(), element, "feature disabled");
                    absent.push(PageError::Absent { feature, element });
                }
            }
        }
        self.enabled = enabled;
        self.lifecycle = Lifecycle::Running;

        let mut effects = Effects::new();

        // The root element always exists, so the stored theme is applied even
        // when the toggle button is missing.
        self.theme = load_theme(
            &self.store,
            &self.config.storage_key,
            self.config.default_theme,
        );
        effects.push(self.theme_attribute());

        if self.runs(FeatureSet::NAVBAR) {
            // Startup always uses the top-of-page tint.
            effects.push(Effect::set_style(
                Target::Navbar,
                "background",
                self.theme.navbar_background(false),
            ));
        }

        self.reveal = RevealSet::new(manifest.reveal_count);
        if self.runs(FeatureSet::REVEAL) {
            effects.extend(self.reveal.startup_effects());
        }

        self.images = LazyImages::new(manifest.images);
        self.nav_links = manifest.nav_links;
        self.last_offset = snapshot.offset;
        if self.runs(FeatureSet::ACTIVE_SECTION) {
            effects.extend(self.highlight(snapshot.offset));
        }

        effects.push(Effect::add_class(Target::Body, LOADED_CLASS));

        if self.runs(FeatureSet::TYPEWRITER) {
            if let (Some(tw), Some(text)) = (&self.config.typewriter, &manifest.typewriter_text) {
                let mut typewriter = Typewriter::new(text, tw.delay());
                effects.extend(typewriter.start(now));
                self.typewriter = Some(typewriter);
            }
        }

        info!(
            enabled = ?self.enabled,
            skipped = absent.len(),
            theme = %self.theme,
            "page controller started"
        );
        let report = InitReport {
            enabled: self.enabled,
            absent,
            theme: self.theme,
        };
        Ok((report, effects))
    }

    fn theme_attribute(&self) -> Effect {
        Effect::SetAttribute {
            target: Target::Root,
            name: THEME_ATTRIBUTE,
            value: self.theme.as_str().to_string(),
        }
    }

    /// Flip the theme, apply it and persist it.
    ///
    /// A store failure is logged; the page still switches theme.
    pub fn toggle_theme(&mut self) -> Effects {
        if !self.runs(FeatureSet::THEME) {
            return Vec::new();
        }
        self.theme = self.theme.toggled();
        if let Err(err) = save_theme(&mut self.store, &self.config.storage_key, self.theme) {
            warn!(store = self.store.name(), error = %err, "theme not persisted");
        }
        debug!(theme = %self.theme, "theme toggled");

        let mut effects = vec![self.theme_attribute()];
        if self.enabled.contains(FeatureSet::NAVBAR) {
            effects.push(navbar_effect(
                self.theme,
                self.last_offset,
                self.config.scroll.navbar_threshold,
            ));
        }
        effects
    }

    /// Pointer moved to viewport coordinates `at`.
    pub fn pointer_moved(&mut self, at: Point) -> Effects {
        if !self.runs(FeatureSet::CURSOR) {
            return Vec::new();
        }
        self.cursor.pointer_moved(at)
    }

    /// Pointer entered (`true`) or left (`false`) an interactive element.
    pub fn hover(&mut self, entered: bool) -> Effects {
        if !self.runs(FeatureSet::CURSOR) {
            return Vec::new();
        }
        self.cursor.set_hover(entered)
    }

    /// Menu button, nav link or document click.
    pub fn menu(&mut self, input: MenuInput) -> Effects {
        if !self.runs(FeatureSet::MENU) {
            return Vec::new();
        }
        self.menu.apply(input)
    }

    /// An in-page anchor was activated. `target_top` is the target's
    /// `offsetTop`, or `None` when the anchor points nowhere.
    pub fn anchor_activated(&mut self, target_top: Option<f64>) -> Effects {
        if !self.runs(FeatureSet::SMOOTH_SCROLL) {
            return Vec::new();
        }
        anchor_scroll(target_top, self.config.scroll.header_offset)
            .into_iter()
            .collect()
    }

    /// The window scrolled.
    ///
    /// Navbar tint and parallax follow every event; the active section is
    /// recomputed through the debouncer.
    pub fn scrolled(&mut self, snapshot: ScrollSnapshot, now: Duration) -> Effects {
        if !self.is_running() {
            return Vec::new();
        }
        self.last_offset = snapshot.offset;
        let mut effects = Effects::new();

        if self.enabled.contains(FeatureSet::NAVBAR) {
            effects.push(navbar_effect(
                self.theme,
                snapshot.offset,
                self.config.scroll.navbar_threshold,
            ));
        }
        if self.enabled.contains(FeatureSet::PARALLAX) {
            effects.extend(parallax_effects(
                snapshot.offset,
                snapshot.viewport_height,
                &self.config.scroll,
            ));
        }
        if self.enabled.contains(FeatureSet::ACTIVE_SECTION) {
            if let Some(offset) = self.scroll_debounce.trigger(now, snapshot.offset) {
                effects.extend(self.highlight(offset));
            }
        }
        effects
    }

    /// One animation frame at time `now`.
    pub fn frame(&mut self, now: Duration) -> Effects {
        if !self.is_running() {
            return Vec::new();
        }
        let mut effects = Effects::new();
        if self.enabled.contains(FeatureSet::CURSOR) {
            effects.extend(self.cursor.frame());
        }
        if self.enabled.contains(FeatureSet::ACTIVE_SECTION) {
            if let Some(offset) = self.scroll_debounce.poll(now) {
                effects.extend(self.highlight(offset));
            }
        }
        if let Some(typewriter) = self.typewriter.as_mut() {
            effects.extend(typewriter.frame(now));
        }
        effects
    }

    fn highlight(&mut self, offset: f64) -> Effects {
        let mut sections = (self.sections)();
        let idx = active_section(&sections, offset, self.config.scroll.section_lookahead);
        self.active_section = idx.map(|i| sections.swap_remove(i).id);
        highlight_links(&self.nav_links, self.active_section.as_deref())
    }

    /// Intersection report for fade-in candidate `idx`.
    pub fn reveal_intersection(&mut self, idx: usize, intersecting: bool) -> Effects {
        if !self.runs(FeatureSet::REVEAL) {
            return Vec::new();
        }
        self.reveal.intersect(idx, intersecting)
    }

    /// Image indices the host should observe for lazy loading.
    #[must_use]
    pub fn lazy_image_targets(&self) -> Vec<usize> {
        if !self.runs(FeatureSet::LAZY_IMAGES) {
            return Vec::new();
        }
        self.images.pending().collect()
    }

    /// Intersection report for image `idx`.
    pub fn image_intersection(&mut self, idx: usize, intersecting: bool) -> Effects {
        if !self.runs(FeatureSet::LAZY_IMAGES) {
            return Vec::new();
        }
        self.images.intersect(idx, intersecting)
    }

    /// Image `idx` failed to load `src`.
    pub fn image_error(&mut self, idx: usize, src: &str) -> Effects {
        if !self.runs(FeatureSet::IMAGE_FALLBACK) {
            return Vec::new();
        }
        warn!(idx, src, "image failed to load");
        self.images.load_failed(idx, src)
    }

    /// Stop the controller. Pending debounced work is dropped and later
    /// events produce nothing.
    pub fn teardown(&mut self) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        self.scroll_debounce.cancel();
        self.typewriter = None;
        self.lifecycle = Lifecycle::TornDown;
        info!("page controller torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TypewriterConfig;
    use crate::preference::MemoryStore;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn manifest() -> PageManifest {
        PageManifest {
            nav_links: vec!["#hero".into(), "#about".into()],
            reveal_count: 2,
            images: vec![Some("a.png".into()), None],
            ..PageManifest::complete()
        }
    }

    fn sections() -> Vec<SectionSpan> {
        vec![
            SectionSpan::new("hero", 0.0, 800.0),
            SectionSpan::new("about", 800.0, 600.0),
        ]
    }

    fn snapshot(offset: f64) -> ScrollSnapshot {
        ScrollSnapshot::at(offset, 800.0)
    }

    fn started(store: MemoryStore) -> (PageController<MemoryStore>, InitReport, Effects) {
        let mut page =
            PageController::new(PageConfig::default(), store).with_section_layout(sections);
        let (report, effects) = page.init(manifest(), snapshot(0.0), ms(0)).unwrap();
        (page, report, effects)
    }

    #[test]
    fn events_before_init_are_ignored() {
        let mut page = PageController::new(PageConfig::default(), MemoryStore::new())
            .with_section_layout(sections);
        assert!(page.toggle_theme().is_empty());
        assert!(page.pointer_moved(Point::new(1.0, 1.0)).is_empty());
        assert!(page.frame(ms(16)).is_empty());
        assert!(page.scrolled(snapshot(10.0), ms(0)).is_empty());
        assert!(!page.is_running());
    }

    #[test]
    fn init_twice_is_an_error() {
        let (mut page, _, _) = started(MemoryStore::new());
        assert_eq!(
            page.init(manifest(), snapshot(0.0), ms(0)).unwrap_err(),
            PageError::AlreadyStarted
        );
    }

    #[test]
    fn init_applies_defaults() {
        let (page, report, effects) = started(MemoryStore::new());
        assert_eq!(report.theme, Theme::Dark);
        assert_eq!(report.enabled, FeatureSet::standard());
        assert!(report.absent.is_empty());
        assert_eq!(
            effects[0],
            Effect::SetAttribute {
                target: Target::Root,
                name: "data-theme",
                value: "dark".into(),
            }
        );
        assert!(effects.contains(&Effect::set_style(
            Target::Navbar,
            "background",
            "rgba(26, 31, 58, 0.8)"
        )));
        assert!(effects.contains(&Effect::add_class(Target::Reveal(1), "fade-in")));
        assert!(effects.contains(&Effect::add_class(Target::NavLink(0), "active")));
        assert!(effects.contains(&Effect::add_class(Target::Body, "loaded")));
        assert_eq!(page.active_section(), Some("hero"));
    }

    #[test]
    fn missing_elements_disable_only_their_feature() {
        let mut page = PageController::new(PageConfig::default(), MemoryStore::new())
            .with_section_layout(sections);
        let manifest = PageManifest {
            follower: false,
            navbar: false,
            ..manifest()
        };
        let (report, effects) = page.init(manifest, snapshot(0.0), ms(0)).unwrap();
        assert!(!report.enabled.contains(FeatureSet::CURSOR));
        assert!(!report.enabled.contains(FeatureSet::NAVBAR));
        assert!(report.enabled.contains(FeatureSet::MENU));
        assert_eq!(
            report.absent,
            vec![
                PageError::Absent {
                    feature: FeatureSet::CURSOR,
                    element: ".cursor-follower",
                },
                PageError::Absent {
                    feature: FeatureSet::NAVBAR,
                    element: "#navbar",
                },
            ]
        );
        assert!(effects.iter().all(|e| e.target() != Some(Target::Navbar)));
        assert!(page.pointer_moved(Point::new(5.0, 5.0)).is_empty());
        assert!(!page.menu(MenuInput::Toggle).is_empty());
    }

    #[test]
    fn stored_theme_is_applied_without_toggle_button() {
        let mut page =
            PageController::new(PageConfig::default(), MemoryStore::with_entry("theme", "light"))
                .with_section_layout(sections);
        let manifest = PageManifest {
            theme_toggle: false,
            ..manifest()
        };
        let (report, effects) = page.init(manifest, snapshot(0.0), ms(0)).unwrap();
        assert_eq!(report.theme, Theme::Light);
        assert!(!report.enabled.contains(FeatureSet::THEME));
        assert!(effects.contains(&Effect::SetAttribute {
            target: Target::Root,
            name: "data-theme",
            value: "light".into(),
        }));
        assert!(page.toggle_theme().is_empty());
    }

    #[test]
    fn toggle_persists_and_refreshes_navbar() {
        let (mut page, _, _) = started(MemoryStore::new());
        page.scrolled(snapshot(60.0), ms(0));
        let effects = page.toggle_theme();
        assert_eq!(page.theme(), Theme::Light);
        assert_eq!(page.store().peek("theme"), Some("light"));
        assert_eq!(
            effects,
            vec![
                Effect::SetAttribute {
                    target: Target::Root,
                    name: "data-theme",
                    value: "light".into(),
                },
                Effect::set_style(Target::Navbar, "background", "rgba(255, 255, 255, 0.95)"),
            ]
        );
    }

    #[test]
    fn toggle_survives_store_failure() {
        let (mut page, _, _) = started(MemoryStore::unavailable());
        let effects = page.toggle_theme();
        assert_eq!(page.theme(), Theme::Light);
        assert!(!effects.is_empty());
    }

    #[test]
    fn active_section_waits_for_quiet_period() {
        let (mut page, _, _) = started(MemoryStore::new());
        let effects = page.scrolled(snapshot(750.0), ms(1_000));
        assert!(
            effects
                .iter()
                .all(|e| !matches!(e.target(), Some(Target::NavLink(_))))
        );
        assert!(page.frame(ms(1_050)).iter().all(|e| !matches!(
            e.target(),
            Some(Target::NavLink(_))
        )));
        let fired = page.frame(ms(1_100));
        assert!(fired.contains(&Effect::add_class(Target::NavLink(1), "active")));
        assert!(fired.contains(&Effect::remove_class(Target::NavLink(0), "active")));
        assert_eq!(page.active_section(), Some("about"));
    }

    #[test]
    fn sections_are_measured_only_when_the_debouncer_fires() {
        use std::cell::Cell;
        use std::rc::Rc;

        let measured = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&measured);
        let mut page = PageController::new(PageConfig::default(), MemoryStore::new())
            .with_section_layout(move || {
                counter.set(counter.get() + 1);
                sections()
            });
        page.init(manifest(), snapshot(0.0), ms(0)).unwrap();
        assert_eq!(measured.get(), 1);

        for (i, offset) in [100.0, 300.0, 500.0, 750.0].into_iter().enumerate() {
            let t = 1_000 + 20 * i as u64;
            page.scrolled(snapshot(offset), ms(t));
            page.frame(ms(t + 10));
        }
        assert_eq!(measured.get(), 1);

        page.frame(ms(1_160));
        assert_eq!(measured.get(), 2);
        assert_eq!(page.active_section(), Some("about"));
        page.frame(ms(1_500));
        assert_eq!(measured.get(), 2);
    }

    #[test]
    fn without_a_layout_no_link_is_active() {
        let mut page = PageController::new(PageConfig::default(), MemoryStore::new());
        let (_, effects) = page.init(manifest(), snapshot(0.0), ms(0)).unwrap();
        assert!(effects.contains(&Effect::remove_class(Target::NavLink(0), "active")));
        assert_eq!(page.active_section(), None);
    }

    #[test]
    fn parallax_follows_every_scroll() {
        let (mut page, _, _) = started(MemoryStore::new());
        let effects = page.scrolled(snapshot(400.0), ms(0));
        assert!(effects.contains(&Effect::set_style(
            Target::HeroContent,
            "transform",
            "translateY(120px)"
        )));
        let effects = page.scrolled(snapshot(900.0), ms(10));
        assert!(
            effects
                .iter()
                .all(|e| e.target() != Some(Target::HeroContent))
        );
    }

    #[test]
    fn anchor_scroll_and_missing_target() {
        let (mut page, _, _) = started(MemoryStore::new());
        assert_eq!(
            page.anchor_activated(Some(800.0)),
            vec![Effect::ScrollTo {
                top: 720.0,
                smooth: true
            }]
        );
        assert!(page.anchor_activated(None).is_empty());
    }

    #[test]
    fn lazy_targets_and_fallback() {
        let (mut page, _, _) = started(MemoryStore::new());
        assert_eq!(page.lazy_image_targets(), vec![0]);
        let effects = page.image_intersection(0, true);
        assert!(effects.contains(&Effect::Unobserve(Target::Image(0))));
        assert!(page.lazy_image_targets().is_empty());
        let effects = page.image_error(1, "b.png");
        assert!(effects.contains(&Effect::set_style(Target::Image(1), "display", "none")));
    }

    #[test]
    fn typewriter_is_opt_in() {
        let (mut page, report, effects) = started(MemoryStore::new());
        assert!(!report.enabled.contains(FeatureSet::TYPEWRITER));
        assert!(effects.iter().all(|e| e.target() != Some(Target::Typewriter)));
        assert!(
            page.frame(ms(500))
                .iter()
                .all(|e| e.target() != Some(Target::Typewriter))
        );
    }

    #[test]
    fn typewriter_runs_when_configured() {
        let config = PageConfig::default().with_typewriter(TypewriterConfig {
            selector: ".hero-tagline".into(),
            delay_ms: 30,
        });
        let mut page =
            PageController::new(config, MemoryStore::new()).with_section_layout(sections);
        let manifest = PageManifest {
            typewriter_text: Some("Hi!".into()),
            ..manifest()
        };
        let (report, effects) = page.init(manifest, snapshot(0.0), ms(0)).unwrap();
        assert!(report.enabled.contains(FeatureSet::TYPEWRITER));
        assert!(effects.contains(&Effect::SetText {
            target: Target::Typewriter,
            text: "H".into(),
        }));
        assert!(page.frame(ms(60)).contains(&Effect::SetText {
            target: Target::Typewriter,
            text: "Hi!".into(),
        }));
    }

    #[test]
    fn typewriter_without_target_is_reported() {
        let config = PageConfig::default().with_typewriter(TypewriterConfig::new(".missing"));
        let mut page =
            PageController::new(config, MemoryStore::new()).with_section_layout(sections);
        let (report, _) = page.init(manifest(), snapshot(0.0), ms(0)).unwrap();
        assert_eq!(
            report.absent,
            vec![PageError::Absent {
                feature: FeatureSet::TYPEWRITER,
                element: "typewriter target",
            }]
        );
    }

    #[test]
    fn teardown_silences_everything() {
        let (mut page, _, _) = started(MemoryStore::new());
        page.scrolled(snapshot(750.0), ms(0));
        page.teardown();
        assert!(!page.is_running());
        assert!(page.frame(ms(5_000)).is_empty());
        assert!(page.toggle_theme().is_empty());
        assert!(page.menu(MenuInput::Toggle).is_empty());
        assert!(page.image_error(0, "x").is_empty());
        page.teardown();
    }
}
