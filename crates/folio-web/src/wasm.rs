#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_core::geometry::Point;
use folio_core::menu::MenuInput;
use folio_core::preference::MemoryStore;
use folio_core::reveal::ObserverOptions;
use folio_core::{Effects, FeatureSet, PageConfig, PageController, PreferenceStore};
use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, Event, EventTarget, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, Node, Window,
};

use crate::console;
use crate::dom::PageElements;
use crate::frame_loop::FrameLoop;
use crate::options::{effective_options, host_time, log_level, parse_options};
use crate::storage::{LocalStorage, js_error_string};

/// Features that need the scroll listener.
const SCROLL_FEATURES: FeatureSet = FeatureSet::NAVBAR
    .union(FeatureSet::PARALLAX)
    .union(FeatureSet::ACTIVE_SECTION);

/// Features that need the animation-frame loop.
const FRAME_FEATURES: FeatureSet = FeatureSet::CURSOR
    .union(FeatureSet::ACTIVE_SECTION)
    .union(FeatureSet::TYPEWRITER);

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct Runtime {
    window: Window,
    elements: PageElements,
    controller: PageController,
    images: Option<IntersectionObserver>,
}

impl Runtime {
    fn now(&self) -> core::time::Duration {
        host_time(
            self.window
                .performance()
                .map(|performance| performance.now())
                .unwrap_or(0.0),
        )
    }

    fn apply(&self, effects: &Effects) {
        if !effects.is_empty() {
            self.elements
                .apply(&self.window, effects, self.images.as_ref());
        }
    }
}

/// Run `f` against the runtime and apply what it returns. Events that
/// arrive after teardown, or while another handler holds the runtime, are
/// dropped.
fn dispatch(runtime: &Weak<RefCell<Runtime>>, f: impl FnOnce(&mut Runtime) -> Effects) {
    let Some(runtime) = runtime.upgrade() else {
        return;
    };
    let Ok(mut runtime) = runtime.try_borrow_mut() else {
        tracing::trace!("re-entrant event dropped");
        return;
    };
    let effects = f(&mut *runtime);
    runtime.apply(&effects);
}

/// Browser page behavior controller.
///
/// Construct with an optional options object, then call `start()` once the
/// document is parsed. `destroy()` removes every listener, observer and the
/// frame loop.
#[wasm_bindgen]
pub struct FolioWeb {
    config: PageConfig,
    runtime: Option<Rc<RefCell<Runtime>>>,
    listeners: Vec<EventListener>,
    observers: Vec<IntersectionObserver>,
    observer_callbacks: Vec<ObserverCallback>,
    frame_loop: Option<FrameLoop>,
}

#[wasm_bindgen]
impl FolioWeb {
    /// Create a controller. `options` is a plain object whose fields mirror
    /// the Rust `PageConfig`; missing fields keep their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<JsValue>) -> Result<FolioWeb, JsValue> {
        let json = match options {
            Some(value) if !value.is_undefined() && !value.is_null() => Some(
                js_sys::JSON::stringify(&value)?
                    .as_string()
                    .unwrap_or_default(),
            ),
            _ => None,
        };
        let config = parse_options(json.as_deref()).map_err(to_js)?;
        Ok(Self {
            config,
            runtime: None,
            listeners: Vec::new(),
            observers: Vec::new(),
            observer_callbacks: Vec::new(),
            frame_loop: None,
        })
    }

    /// Discover the page, apply the startup state and attach every enabled
    /// behavior. Missing elements disable only their own feature.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.runtime.is_some() {
            return Err(to_js(folio_core::PageError::AlreadyStarted));
        }
        console::init(log_level(&self.config).map_err(to_js)?);
        if let Ok(json) = effective_options(&self.config) {
            tracing::debug!(options = %json, "starting page controller");
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let elements = PageElements::discover(document, &self.config)?;

        let store: Box<dyn PreferenceStore> = match LocalStorage::open(&window) {
            Ok(storage) => Box::new(storage),
            Err(err) => {
                tracing::warn!(error = %err, "theme preference kept in memory");
                Box::new(MemoryStore::new())
            }
        };
        let mut controller = PageController::new(self.config.clone(), store)
            .with_section_layout(elements.section_layout());
        let manifest = elements.manifest();
        let snapshot = elements.scroll_snapshot(&window);
        let now = host_time(
            window
                .performance()
                .map(|performance| performance.now())
                .unwrap_or(0.0),
        );
        let (report, effects) = controller.init(manifest, snapshot, now).map_err(to_js)?;
        for absent in &report.absent {
            tracing::info!(%absent, "feature skipped");
        }

        let runtime = Rc::new(RefCell::new(Runtime {
            window,
            elements,
            controller,
            images: None,
        }));
        runtime.borrow().apply(&effects);
        self.runtime = Some(Rc::clone(&runtime));

        if let Err(err) = self.attach(&runtime, report.enabled) {
            tracing::error!(error = %js_error_string(&err), "attaching behaviors failed");
            self.destroy();
            return Err(err);
        }
        tracing::debug!(listeners = self.listeners.len(), "behaviors attached");
        Ok(())
    }

    /// Flip between dark and light. Returns the new theme name.
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&mut self) -> String {
        if let Some(runtime) = &self.runtime {
            dispatch(&Rc::downgrade(runtime), |rt| rt.controller.toggle_theme());
        }
        self.theme()
    }

    /// Current theme name (`"dark"` or `"light"`).
    pub fn theme(&self) -> String {
        self.runtime
            .as_ref()
            .and_then(|runtime| {
                runtime
                    .try_borrow()
                    .ok()
                    .map(|rt| rt.controller.theme().as_str().to_string())
            })
            .unwrap_or_else(|| self.config.default_theme.as_str().to_string())
    }

    /// The effective options, defaults filled in, as a JSON string.
    pub fn options(&self) -> Result<String, JsValue> {
        effective_options(&self.config).map_err(to_js)
    }

    /// Names of the features that are running.
    #[wasm_bindgen(js_name = enabledFeatures)]
    pub fn enabled_features(&self) -> js_sys::Array {
        let enabled = self
            .runtime
            .as_ref()
            .and_then(|runtime| runtime.try_borrow().ok().map(|rt| rt.controller.enabled()))
            .unwrap_or_else(FeatureSet::empty);
        enabled
            .iter()
            .map(|feature| JsValue::from_str(feature.name()))
            .collect()
    }

    /// Remove every listener and observer and stop the frame loop.
    /// Calling it twice is harmless.
    pub fn destroy(&mut self) {
        self.frame_loop = None;
        self.listeners.clear();
        for observer in self.observers.drain(..) {
            observer.disconnect();
        }
        self.observer_callbacks.clear();
        if let Some(runtime) = self.runtime.take() {
            match runtime.try_borrow_mut() {
                Ok(mut rt) => {
                    rt.images = None;
                    rt.controller.teardown();
                }
                Err(_) => tracing::warn!("destroy called from inside a handler"),
            }
        }
    }
}

impl FolioWeb {
    fn attach(
        &mut self,
        runtime: &Rc<RefCell<Runtime>>,
        enabled: FeatureSet,
    ) -> Result<(), JsValue> {
        let weak = Rc::downgrade(runtime);
        let (window, document) = {
            let rt = runtime.borrow();
            (rt.window.clone(), rt.elements.document.clone())
        };

        if enabled.contains(FeatureSet::THEME) {
            let toggle = runtime.borrow().elements.theme_toggle.clone();
            if let Some(toggle) = toggle {
                let weak = weak.clone();
                self.listeners.push(EventListener::new(&toggle, "click", move |_| {
                    dispatch(&weak, |rt| rt.controller.toggle_theme());
                }));
            }
        }

        if enabled.contains(FeatureSet::CURSOR) {
            let weak_move = weak.clone();
            self.listeners.push(EventListener::new(&document, "mousemove", move |event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let at = Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
                dispatch(&weak_move, |rt| rt.controller.pointer_moved(at));
            }));
            let interactive = runtime.borrow().elements.interactive.clone();
            for element in &interactive {
                let enter = weak.clone();
                self.listeners.push(EventListener::new(element, "mouseenter", move |_| {
                    dispatch(&enter, |rt| rt.controller.hover(true));
                }));
                let leave = weak.clone();
                self.listeners.push(EventListener::new(element, "mouseleave", move |_| {
                    dispatch(&leave, |rt| rt.controller.hover(false));
                }));
            }
        }

        if enabled.contains(FeatureSet::MENU) {
            self.attach_menu(runtime, &weak, &document);
        }

        if enabled.contains(FeatureSet::SMOOTH_SCROLL) {
            let anchors = runtime.borrow().elements.anchors.clone();
            for (idx, anchor) in anchors.iter().enumerate() {
                let weak = weak.clone();
                let options = EventListenerOptions::enable_prevent_default();
                let listener =
                    EventListener::new_with_options(anchor, "click", options, move |event| {
                        event.prevent_default();
                        dispatch(&weak, |rt| {
                            let top = rt
                                .elements
                                .anchors
                                .get(idx)
                                .and_then(|anchor| rt.elements.anchor_top(anchor));
                            rt.controller.anchor_activated(top)
                        });
                    });
                self.listeners.push(listener);
            }
        }

        if enabled.intersects(SCROLL_FEATURES) {
            let weak = weak.clone();
            self.listeners.push(EventListener::new(&window, "scroll", move |_| {
                dispatch(&weak, |rt| {
                    let snapshot = rt.elements.scroll_snapshot(&rt.window);
                    let now = rt.now();
                    rt.controller.scrolled(snapshot, now)
                });
            }));
        }

        if enabled.contains(FeatureSet::IMAGE_FALLBACK) {
            let images = runtime.borrow().elements.images.clone();
            for (idx, image) in images.iter().enumerate() {
                let weak = weak.clone();
                self.listeners.push(EventListener::new(image, "error", move |event| {
                    let src = event
                        .target()
                        .and_then(|target| target.dyn_into::<HtmlImageElement>().ok())
                        .map(|img| img.src())
                        .unwrap_or_default();
                    dispatch(&weak, |rt| rt.controller.image_error(idx, &src));
                }));
            }
        }

        if enabled.contains(FeatureSet::REVEAL) {
            let targets = runtime.borrow().elements.reveal.clone();
            let options = self.config.reveal_observer.clone();
            let observer = self.observe(&weak, &options, |rt, target, hit| {
                let idx = rt.elements.reveal.iter().position(|el| el == target)?;
                Some(rt.controller.reveal_intersection(idx, hit))
            })?;
            for target in &targets {
                observer.observe(target);
            }
        }

        if enabled.contains(FeatureSet::LAZY_IMAGES) {
            let pending: Vec<Element> = {
                let rt = runtime.borrow();
                rt.controller
                    .lazy_image_targets()
                    .into_iter()
                    .filter_map(|idx| rt.elements.images.get(idx).cloned())
                    .collect()
            };
            let options = self.config.image_observer.clone();
            let observer = self.observe(&weak, &options, |rt, target, hit| {
                let idx = rt.elements.images.iter().position(|el| el == target)?;
                Some(rt.controller.image_intersection(idx, hit))
            })?;
            for target in &pending {
                observer.observe(target);
            }
            runtime.borrow_mut().images = Some(observer);
        }

        if enabled.intersects(FRAME_FEATURES) {
            let weak = weak.clone();
            self.frame_loop = Some(FrameLoop::start(move |timestamp| {
                dispatch(&weak, |rt| rt.controller.frame(host_time(timestamp)));
            }));
        }
        Ok(())
    }

    fn attach_menu(
        &mut self,
        runtime: &Rc<RefCell<Runtime>>,
        weak: &Weak<RefCell<Runtime>>,
        document: &EventTarget,
    ) {
        let (hamburger, links) = {
            let rt = runtime.borrow();
            (rt.elements.hamburger.clone(), rt.elements.nav_links.clone())
        };
        if let Some(hamburger) = hamburger {
            let weak = weak.clone();
            self.listeners.push(EventListener::new(&hamburger, "click", move |_| {
                dispatch(&weak, |rt| rt.controller.menu(MenuInput::Toggle));
            }));
        }
        for link in &links {
            let weak = weak.clone();
            self.listeners.push(EventListener::new(link, "click", move |_| {
                dispatch(&weak, |rt| rt.controller.menu(MenuInput::LinkActivated));
            }));
        }
        let weak = weak.clone();
        self.listeners.push(EventListener::new(document, "click", move |event: &Event| {
            let clicked = event.target().and_then(|target| target.dyn_into::<Node>().ok());
            dispatch(&weak, |rt| {
                let within = |element: Option<&Element>| {
                    element.is_some_and(|el| el.contains(clicked.as_ref()))
                };
                let inside = clicked.is_some()
                    && (within(rt.elements.hamburger.as_ref())
                        || within(rt.elements.nav_menu.as_ref()));
                rt.controller.menu(MenuInput::DocumentClick { inside })
            });
        }));
    }

    /// Create an intersection observer whose entries are routed through
    /// `on_entry`. Entries for unknown elements are ignored.
    fn observe(
        &mut self,
        weak: &Weak<RefCell<Runtime>>,
        options: &ObserverOptions,
        on_entry: fn(&mut Runtime, &Element, bool) -> Option<Effects>,
    ) -> Result<IntersectionObserver, JsValue> {
        let weak = weak.clone();
        let callback: ObserverCallback = Closure::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                dispatch(&weak, |rt| {
                    let mut effects = Effects::new();
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        let target = entry.target();
                        if let Some(batch) = on_entry(rt, &target, entry.is_intersecting()) {
                            effects.extend(batch);
                        }
                    }
                    effects
                });
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        self.observers.push(observer.clone());
        self.observer_callbacks.push(callback);
        Ok(observer)
    }
}

impl Drop for FolioWeb {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn to_js(err: folio_core::PageError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Create a controller and start it in one call.
#[wasm_bindgen]
pub fn boot(options: Option<JsValue>) -> Result<FolioWeb, JsValue> {
    let mut page = FolioWeb::new(options)?;
    page.start()?;
    Ok(page)
}
