#![forbid(unsafe_code)]

//! Element discovery and effect application.
//!
//! Elements are looked up once at start. The lists keep document order so
//! their positions match the indices carried by [`Target`].

use folio_core::reveal::DEFERRED_SRC_ATTRIBUTE;
use folio_core::scroll::{ScrollSnapshot, SectionSpan};
use folio_core::{Effect, PageConfig, PageManifest, Target};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, ScrollBehavior, ScrollToOptions, Window,
};

use crate::selectors;

fn query(document: &Document, selector: &str) -> Result<Option<Element>, JsValue> {
    document.query_selector(selector)
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub(crate) struct PageElements {
    pub(crate) document: Document,
    root: Element,
    body: Element,
    pub(crate) theme_toggle: Option<Element>,
    cursor: Option<Element>,
    follower: Option<Element>,
    pub(crate) hamburger: Option<Element>,
    pub(crate) nav_menu: Option<Element>,
    navbar: Option<Element>,
    hero_content: Option<Element>,
    typewriter: Option<Element>,
    pub(crate) nav_links: Vec<Element>,
    sections: Vec<HtmlElement>,
    pub(crate) reveal: Vec<Element>,
    pub(crate) interactive: Vec<Element>,
    pub(crate) anchors: Vec<Element>,
    pub(crate) images: Vec<Element>,
}

impl PageElements {
    pub(crate) fn discover(document: Document, config: &PageConfig) -> Result<Self, JsValue> {
        let root = document
            .document_element()
            .ok_or_else(|| JsValue::from_str("document has no root element"))?;
        let body: Element = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?
            .into();
        let typewriter = match &config.typewriter {
            Some(tw) => query(&document, &tw.selector)?,
            None => None,
        };
        let sections = query_all(&document, selectors::SECTIONS)?
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect();

        Ok(Self {
            theme_toggle: query(&document, selectors::THEME_TOGGLE)?,
            cursor: query(&document, selectors::CURSOR)?,
            follower: query(&document, selectors::CURSOR_FOLLOWER)?,
            hamburger: query(&document, selectors::HAMBURGER)?,
            nav_menu: query(&document, selectors::NAV_MENU)?,
            navbar: query(&document, selectors::NAVBAR)?,
            hero_content: query(&document, selectors::HERO_CONTENT)?,
            nav_links: query_all(&document, selectors::NAV_LINKS)?,
            reveal: query_all(&document, selectors::REVEAL)?,
            interactive: query_all(&document, selectors::INTERACTIVE)?,
            anchors: query_all(&document, selectors::ANCHORS)?,
            images: query_all(&document, selectors::IMAGES)?,
            typewriter,
            sections,
            root,
            body,
            document,
        })
    }

    /// Describe what was found for the controller.
    pub(crate) fn manifest(&self) -> PageManifest {
        PageManifest {
            theme_toggle: self.theme_toggle.is_some(),
            cursor: self.cursor.is_some(),
            follower: self.follower.is_some(),
            hamburger: self.hamburger.is_some(),
            nav_menu: self.nav_menu.is_some(),
            navbar: self.navbar.is_some(),
            hero_content: self.hero_content.is_some(),
            nav_links: self
                .nav_links
                .iter()
                .map(|link| link.get_attribute("href").unwrap_or_default())
                .collect(),
            reveal_count: self.reveal.len(),
            images: self
                .images
                .iter()
                .map(|img| img.get_attribute(DEFERRED_SRC_ATTRIBUTE))
                .collect(),
            typewriter_text: self
                .typewriter
                .as_ref()
                .map(|el| el.text_content().unwrap_or_default()),
        }
    }

    /// Current scroll position and viewport height. Reads no layout.
    pub(crate) fn scroll_snapshot(&self, window: &Window) -> ScrollSnapshot {
        let offset = window.scroll_y().unwrap_or(0.0);
        let viewport_height = window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        ScrollSnapshot::at(offset, viewport_height)
    }

    /// Section geometry reader handed to the controller, which calls it
    /// only when it recomputes the active link.
    pub(crate) fn section_layout(&self) -> impl Fn() -> Vec<SectionSpan> + 'static {
        let sections = self.sections.clone();
        move || {
            sections
                .iter()
                .map(|section| {
                    SectionSpan::new(
                        section.id(),
                        f64::from(section.offset_top()),
                        f64::from(section.offset_height()),
                    )
                })
                .collect()
        }
    }

    /// `offsetTop` of the element an in-page anchor points at.
    pub(crate) fn anchor_top(&self, anchor: &Element) -> Option<f64> {
        let href = anchor.get_attribute("href")?;
        let selector = selectors::anchor_target(&href)?;
        let target = self.document.query_selector(selector).ok()??;
        let target = target.dyn_into::<HtmlElement>().ok()?;
        Some(f64::from(target.offset_top()))
    }

    pub(crate) fn element(&self, target: Target) -> Option<&Element> {
        match target {
            Target::Root => Some(&self.root),
            Target::Body => Some(&self.body),
            Target::Cursor => self.cursor.as_ref(),
            Target::Follower => self.follower.as_ref(),
            Target::Hamburger => self.hamburger.as_ref(),
            Target::NavMenu => self.nav_menu.as_ref(),
            Target::Navbar => self.navbar.as_ref(),
            Target::HeroContent => self.hero_content.as_ref(),
            Target::Typewriter => self.typewriter.as_ref(),
            Target::NavLink(idx) => self.nav_links.get(idx),
            Target::Reveal(idx) => self.reveal.get(idx),
            Target::Image(idx) => self.images.get(idx),
        }
    }

    /// Apply a batch of effects. `images` receives `Unobserve` requests.
    pub(crate) fn apply(
        &self,
        window: &Window,
        effects: &[Effect],
        images: Option<&IntersectionObserver>,
    ) {
        for effect in effects {
            if let Err(err) = self.apply_one(window, effect, images) {
                tracing::warn!(?effect, error = ?err, "effect not applied");
            }
        }
    }

    fn apply_one(
        &self,
        window: &Window,
        effect: &Effect,
        images: Option<&IntersectionObserver>,
    ) -> Result<(), JsValue> {
        match effect {
            Effect::ScrollTo { top, smooth } => {
                let options = ScrollToOptions::new();
                options.set_top(*top);
                if *smooth {
                    options.set_behavior(ScrollBehavior::Smooth);
                }
                window.scroll_to_with_scroll_to_options(&options);
                return Ok(());
            }
            Effect::Warn(message) => {
                web_sys::console::warn_1(&JsValue::from_str(message));
                return Ok(());
            }
            _ => {}
        }

        let Some(target) = effect.target() else {
            return Ok(());
        };
        let Some(element) = self.element(target) else {
            tracing::trace!(?target, "effect target missing");
            return Ok(());
        };
        match effect {
            Effect::SetAttribute { name, value, .. } => element.set_attribute(name, value)?,
            Effect::RemoveAttribute { name, .. } => element.remove_attribute(name)?,
            Effect::AddClass { class, .. } => element.class_list().add_1(class)?,
            Effect::RemoveClass { class, .. } => element.class_list().remove_1(class)?,
            Effect::SetStyle {
                property, value, ..
            } => {
                if let Some(html) = element.dyn_ref::<HtmlElement>() {
                    html.style().set_property(property, value)?;
                }
            }
            Effect::SetText { text, .. } => element.set_text_content(Some(text)),
            Effect::Unobserve(_) => {
                if let Some(observer) = images {
                    observer.unobserve(element);
                }
            }
            Effect::ScrollTo { .. } | Effect::Warn(_) => {}
        }
        Ok(())
    }
}
