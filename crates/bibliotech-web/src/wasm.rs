#![forbid(unsafe_code)]

//! `wasm-bindgen` glue: browser implementations of the core host seams and
//! the [`hydrate`] entry point.
//!
//! Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use bibliotech_core::{
    ElementBounds, FrameCallback, FrameScheduler, FrameToken, LayoutProbe, PointerSample,
    ScrollHost, TimerCallback, VerticalSpan,
};
use bibliotech_style::ColorGradient;
use bibliotech_widgets::format_counter;
use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, MouseEvent, ScrollBehavior,
    ScrollToOptions, Window,
};

use crate::hydrate_core::{
    ATTR_GRADIENT_STOPS, CounterGroup, CounterSpec, HeaderSync, is_in_viewport,
    parse_gradient_stops, pointer_background_image, tracker_config,
};

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = match info.location() {
                Some(loc) => format!("panic at {}:{}: {info}", loc.file(), loc.line()),
                None => format!("panic: {info}"),
            };
            console_error(&msg);
        }));
    });
}

fn elements(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Host seams
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RafInner {
    next_id: u64,
    frames: HashMap<u64, (i32, Closure<dyn FnMut(f64)>)>,
    timers: HashMap<u64, (i32, Closure<dyn FnMut()>)>,
    /// Fired closures; dropped on the next firing, never while running.
    spent_frames: Vec<Closure<dyn FnMut(f64)>>,
    spent_timers: Vec<Closure<dyn FnMut()>>,
}

impl RafInner {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn retire_frame(&mut self, id: u64) {
        self.spent_frames.clear();
        self.spent_timers.clear();
        if let Some((_, closure)) = self.frames.remove(&id) {
            self.spent_frames.push(closure);
        }
    }

    fn retire_timer(&mut self, id: u64) {
        self.spent_frames.clear();
        self.spent_timers.clear();
        if let Some((_, closure)) = self.timers.remove(&id) {
            self.spent_timers.push(closure);
        }
    }
}

/// [`FrameScheduler`] over `requestAnimationFrame` and `setTimeout`.
#[derive(Clone)]
pub struct RafScheduler {
    window: Window,
    inner: Rc<RefCell<RafInner>>,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            inner: Rc::default(),
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameToken {
        let id = self.inner.borrow_mut().next_id();
        let inner = Rc::downgrade(&self.inner);
        let mut callback = Some(callback);
        let closure = Closure::<dyn FnMut(f64)>::new(move |timestamp_ms: f64| {
            if let Some(inner) = inner.upgrade() {
                inner.borrow_mut().retire_frame(id);
            }
            if let Some(callback) = callback.take() {
                callback(Duration::from_secs_f64(timestamp_ms.max(0.0) / 1000.0));
            }
        });
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(handle) => {
                self.inner.borrow_mut().frames.insert(id, (handle, closure));
            }
            Err(_) => tracing::warn!("requestAnimationFrame rejected"),
        }
        FrameToken::Frame(id)
    }

    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> FrameToken {
        let id = self.inner.borrow_mut().next_id();
        let inner = Rc::downgrade(&self.inner);
        let mut callback = Some(callback);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.borrow_mut().retire_timer(id);
            }
            if let Some(callback) = callback.take() {
                callback();
            }
        });
        let delay_ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms,
            ) {
            Ok(handle) => {
                self.inner.borrow_mut().timers.insert(id, (handle, closure));
            }
            Err(_) => tracing::warn!("setTimeout rejected"),
        }
        FrameToken::Timer(id)
    }

    fn cancel(&self, token: FrameToken) {
        let mut inner = self.inner.borrow_mut();
        match token {
            FrameToken::Frame(id) => {
                if let Some((handle, _closure)) = inner.frames.remove(&id) {
                    let _ = self.window.cancel_animation_frame(handle);
                }
            }
            FrameToken::Timer(id) => {
                if let Some((handle, _closure)) = inner.timers.remove(&id) {
                    self.window.clear_timeout_with_handle(handle);
                }
            }
        }
    }
}

/// [`LayoutProbe`] over `getBoundingClientRect`.
#[derive(Clone)]
pub struct DomLayoutProbe {
    document: Document,
}

impl LayoutProbe for DomLayoutProbe {
    fn measure(&self, id: &str) -> Option<VerticalSpan> {
        let rect = self.document.get_element_by_id(id)?.get_bounding_client_rect();
        Some(VerticalSpan::new(rect.top(), rect.bottom()))
    }
}

/// [`ScrollHost`] over `window.scrollTo({ behavior: "smooth" })`. Jumps
/// instead when the user prefers reduced motion.
#[derive(Clone)]
pub struct WindowScrollHost {
    window: Window,
    smooth: bool,
}

impl ScrollHost for WindowScrollHost {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn smooth_scroll_to(&self, y: f64) {
        let options = ScrollToOptions::new();
        options.set_top(y);
        options.set_behavior(if self.smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

// ---------------------------------------------------------------------------
// Page state
// ---------------------------------------------------------------------------

struct PageState {
    window: Window,
    probe: DomLayoutProbe,
    host: WindowScrollHost,
    header: Option<HeaderSync>,
    links: Vec<Element>,
    menu: Option<Element>,
    menu_toggle: Option<Element>,
    counters: CounterGroup<RafScheduler>,
    counter_band: Option<Element>,
}

impl PageState {
    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn on_scroll(&mut self) {
        if let Some(change) = self.header.as_mut().and_then(|h| h.on_scroll(&self.probe)) {
            self.highlight(&change);
        }
        if !self.counters.has_started() {
            let visible = self.counter_band.as_ref().is_some_and(|band| {
                let rect = band.get_bounding_client_rect();
                is_in_viewport(VerticalSpan::new(rect.top(), rect.bottom()), self.viewport_height())
            });
            if visible {
                self.counters.start_once();
            }
        }
    }

    fn on_navigate(&mut self, id: &str) {
        let change = self
            .header
            .as_mut()
            .and_then(|h| h.on_navigate(id, &self.probe, &self.host));
        if let Some(change) = change {
            self.highlight(&change);
        }
        self.set_menu_open(false);
    }

    fn highlight(&self, active: &str) {
        for link in &self.links {
            let on = link.get_attribute("data-section").as_deref() == Some(active);
            let _ = link.class_list().toggle_with_force("is-active", on);
            let _ = if on {
                link.set_attribute("aria-current", "true")
            } else {
                link.remove_attribute("aria-current")
            };
        }
    }

    fn set_menu_open(&self, open: bool) {
        if let Some(menu) = &self.menu {
            let _ = menu.class_list().toggle_with_force("is-open", open);
        }
        if let Some(toggle) = &self.menu_toggle {
            let _ = toggle.set_attribute("aria-expanded", if open { "true" } else { "false" });
        }
    }

    fn is_menu_open(&self) -> bool {
        self.menu
            .as_ref()
            .is_some_and(|menu| menu.class_list().contains("is-open"))
    }
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Live page behavior. Dropping it (`free()` from JS) detaches every
/// listener and cancels running counters.
#[wasm_bindgen]
pub struct Hydration {
    state: Rc<RefCell<PageState>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl Hydration {
    /// Number of counters being driven.
    #[wasm_bindgen(getter)]
    pub fn counters(&self) -> usize {
        self.state.borrow().counters.len()
    }

    /// Currently highlighted section id, if the page has a tracked header.
    #[wasm_bindgen(js_name = activeSection)]
    pub fn active_section(&self) -> Option<String> {
        self.state
            .borrow()
            .header
            .as_ref()
            .map(|h| h.tracker().active_id().to_string())
    }

    /// Run every counter again from zero.
    #[wasm_bindgen(js_name = replayCounters)]
    pub fn replay_counters(&self) {
        self.state.borrow_mut().counters.restart();
    }
}

impl Drop for Hydration {
    fn drop(&mut self) {
        self.listeners.clear();
        self.state.borrow_mut().counters.cancel();
    }
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}

fn hydrate_counters(document: &Document, group: &mut CounterGroup<RafScheduler>, animate: bool) {
    for element in elements(document, ".bb-counter[data-counter-target]") {
        let spec = match CounterSpec::from_attributes(|name| element.get_attribute(name)) {
            Ok(spec) => spec,
            Err(error) => {
                tracing::warn!(%error, "counter skipped");
                continue;
            }
        };
        if !animate {
            element.set_text_content(Some(&format_counter(
                spec.request.target_value,
                &spec.suffix,
            )));
            continue;
        }
        let target = element.clone();
        group.add(&spec, move |text| target.set_text_content(Some(text)));
    }
}

fn hydrate_gradient_text(document: &Document, listeners: &mut Vec<Listener>) {
    for element in elements(document, "[data-gradient-text]") {
        let Some(raw) = element.get_attribute(ATTR_GRADIENT_STOPS) else {
            continue;
        };
        let gradient: ColorGradient = match parse_gradient_stops(&raw) {
            Ok(gradient) => gradient,
            Err(error) => {
                tracing::warn!(%error, "gradient text skipped");
                continue;
            }
        };
        let Ok(html) = element.clone().dyn_into::<HtmlElement>() else {
            continue;
        };
        let paint = {
            let html = html.clone();
            let gradient = gradient.clone();
            move |event: Event, hovering: bool| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let rect = html.get_bounding_client_rect();
                let bounds = ElementBounds::new(rect.left(), rect.top(), rect.width(), rect.height());
                let pointer = PointerSample::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
                let css = pointer_background_image(&gradient, bounds, pointer, hovering);
                let _ = html.style().set_property("background-image", &css);
            }
        };
        let on_move = paint.clone();
        listeners.extend(Listener::attach(&element, "mousemove", move |e| on_move(e, true)));
        listeners.extend(Listener::attach(&element, "mouseleave", move |e| paint(e, false)));
    }
}

/// Attach counters, the header tracker and gradient text to the current page.
#[wasm_bindgen]
pub fn hydrate() -> Result<Hydration, JsValue> {
    install_panic_hook();
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let animate = !prefers_reduced_motion(&window);
    let mut counters = CounterGroup::new(RafScheduler::new(window.clone()));
    hydrate_counters(&document, &mut counters, animate);
    let counter_band = document
        .query_selector("[data-counter-group]")
        .ok()
        .flatten()
        .or_else(|| elements(&document, ".bb-counter").into_iter().next());

    let header_el = document.query_selector("[data-section-tracker]").ok().flatten();
    let links = header_el
        .as_ref()
        .map(|_| elements(&document, "[data-section-tracker] [data-section]"))
        .unwrap_or_default();
    let header = header_el.as_ref().map(|header| {
        let ids: Vec<String> = links
            .iter()
            .filter_map(|link| link.get_attribute("data-section"))
            .collect();
        HeaderSync::new(ids, tracker_config(|name| header.get_attribute(name)))
    });

    let state = Rc::new(RefCell::new(PageState {
        window: window.clone(),
        probe: DomLayoutProbe {
            document: document.clone(),
        },
        host: WindowScrollHost {
            window: window.clone(),
            smooth: animate,
        },
        header,
        links: links.clone(),
        menu: document.get_element_by_id("bb-nav-menu"),
        menu_toggle: document.query_selector(".bb-nav__toggle").ok().flatten(),
        counters,
        counter_band,
    }));

    let mut listeners = Vec::new();
    for kind in ["scroll", "resize"] {
        let state = Rc::clone(&state);
        listeners.extend(Listener::attach(&window, kind, move |_| {
            state.borrow_mut().on_scroll();
        }));
    }
    for link in &links {
        let state = Rc::clone(&state);
        let anchor = link.get_attribute("data-section").unwrap_or_default();
        listeners.extend(Listener::attach(link, "click", move |event| {
            event.prevent_default();
            state.borrow_mut().on_navigate(&anchor);
        }));
    }
    let toggle = state.borrow().menu_toggle.clone();
    if let Some(toggle) = toggle {
        let state = Rc::clone(&state);
        listeners.extend(Listener::attach(&toggle, "click", move |_| {
            let state = state.borrow();
            state.set_menu_open(!state.is_menu_open());
        }));
    }
    hydrate_gradient_text(&document, &mut listeners);

    state.borrow_mut().on_scroll();
    tracing::debug!(listeners = listeners.len(), "page hydrated");
    Ok(Hydration { state, listeners })
}
