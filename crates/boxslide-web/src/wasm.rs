#![forbid(unsafe_code)]

//! Browser host and `wasm-bindgen` exports.
//!
//! [`DomHost`] maps the backend capabilities onto `web-sys`. Frame requests
//! are queued on the host; a single shared runner drains the queue from one
//! `requestAnimationFrame` callback per frame, so any number of running
//! slides cost one frame callback. Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use boxslide_backend::{AttributeStore, Dom, FrameScheduler, NodeTree, StyleInspector, StyleWriter};
use boxslide_core::{BoxProperty, Destination, Force, ProgressToken, SlideOptions};
use boxslide_runtime::{SlideError, Slider};
use gloo_render::{AnimationFrame, request_animation_frame};
use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, NodeList};

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
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

/// A DOM call threw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomHostError(String);

impl From<JsValue> for DomHostError {
    fn from(value: JsValue) -> Self {
        Self(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl fmt::Display for DomHostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dom error: {}", self.0)
    }
}

impl std::error::Error for DomHostError {}

/// The browser DOM as a slide host.
#[derive(Debug, Default)]
pub struct DomHost {
    pending: Vec<ProgressToken>,
}

impl DomHost {
    fn take_pending(&mut self) -> Vec<ProgressToken> {
        std::mem::take(&mut self.pending)
    }
}

impl Dom for DomHost {
    type Element = Element;
    type Error = DomHostError;

    fn is_element(&self, el: &Element) -> bool {
        el.is_instance_of::<HtmlElement>()
    }
}

impl StyleInspector for DomHost {
    fn computed_style(&self, el: &Element, css_name: &str) -> Option<String> {
        let window = web_sys::window()?;
        let style = window.get_computed_style(el).ok()??;
        style.get_property_value(css_name).ok()
    }
}

impl StyleWriter for DomHost {
    fn set_inline(&mut self, el: &Element, css_name: &str, value: &str) {
        let Some(html) = el.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = html.style().set_property(css_name, value) {
            tracing::warn!(target: "boxslide.web", css_name, error = ?err, "style write rejected");
        }
    }

    fn clear_inline(&mut self, el: &Element) {
        if let Err(err) = el.remove_attribute("style") {
            tracing::warn!(target: "boxslide.web", error = ?err, "style reset rejected");
        }
    }
}

impl AttributeStore for DomHost {
    fn get_attr(&self, el: &Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn set_attr(&mut self, el: &Element, name: &str, value: &str) {
        if let Err(err) = el.set_attribute(name, value) {
            tracing::warn!(target: "boxslide.web", name, error = ?err, "attribute write rejected");
        }
    }

    fn remove_attr(&mut self, el: &Element, name: &str) {
        if let Err(err) = el.remove_attribute(name) {
            tracing::warn!(target: "boxslide.web", name, error = ?err, "attribute removal rejected");
        }
    }
}

impl NodeTree for DomHost {
    fn clone_deep(&mut self, el: &Element) -> Result<Element, DomHostError> {
        let node = el.clone_node_with_deep(true)?;
        node.dyn_into::<Element>()
            .map_err(|_| DomHostError("clone is not an element".to_owned()))
    }

    fn parent(&self, el: &Element) -> Option<Element> {
        el.parent_element()
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<(), DomHostError> {
        parent.append_child(child)?;
        Ok(())
    }

    fn remove_child(&mut self, parent: &Element, child: &Element) -> Result<(), DomHostError> {
        parent.remove_child(child)?;
        Ok(())
    }
}

impl FrameScheduler for DomHost {
    fn request_frame(&mut self, token: ProgressToken) {
        self.pending.push(token);
    }
}

/// Slider, host, and the outstanding animation frame for this page.
struct Runner {
    slider: RefCell<Slider<Element>>,
    host: RefCell<DomHost>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl Runner {
    fn new() -> Self {
        Self {
            slider: RefCell::new(Slider::new()),
            host: RefCell::new(DomHost::default()),
            frame: RefCell::new(None),
        }
    }

    /// Run `f` with the slider and host, or return `None` if a DOM callback
    /// re-entered while they are already in use.
    fn with_parts<R>(&self, f: impl FnOnce(&mut Slider<Element>, &mut DomHost) -> R) -> Option<R> {
        let mut slider = self.slider.try_borrow_mut().ok()?;
        let mut host = self.host.try_borrow_mut().ok()?;
        Some(f(&mut slider, &mut host))
    }

    fn ensure_frame(self: &Rc<Self>) {
        let idle = self
            .host
            .try_borrow()
            .map_or(true, |host| host.pending.is_empty());
        if idle || self.frame.borrow().is_some() {
            return;
        }
        let runner = Rc::clone(self);
        let handle = request_animation_frame(move |timestamp| {
            runner.frame.borrow_mut().take();
            runner.run_frame(timestamp);
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn run_frame(self: &Rc<Self>, timestamp: f64) {
        let ran = self.with_parts(|slider, host| {
            for token in host.take_pending() {
                slider.tick(host, token, timestamp);
            }
        });
        if ran.is_none() {
            tracing::warn!(target: "boxslide.web", "frame skipped, runner busy");
        }
        self.ensure_frame();
    }
}

thread_local! {
    static RUNNER: Rc<Runner> = Rc::new(Runner::new());
}

fn string_field(obj: &JsValue, key: &str) -> Option<String> {
    Reflect::get(obj, &JsValue::from_str(key)).ok()?.as_string()
}

fn number_field(obj: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(obj, &JsValue::from_str(key)).ok()?.as_f64()
}

fn apply_duration(options: SlideOptions, value: &JsValue) -> SlideOptions {
    if let Some(ms) = value.as_f64().filter(|ms| ms.is_finite()) {
        // Saturating float-to-int cast.
        return options.duration(ms as i64);
    }
    match value.as_string() {
        Some(text) => options.duration_text(&text),
        None => options,
    }
}

/// Read `{ duration, display, transition, force }` from a JS object.
/// Missing or mistyped fields fall back to defaults.
fn options_from_js(options: &JsValue) -> SlideOptions {
    let mut out = SlideOptions::new();
    if !options.is_object() {
        return out;
    }
    if let Ok(duration) = Reflect::get(options, &JsValue::from_str("duration")) {
        out = apply_duration(out, &duration);
    }
    if let Some(mode) = string_field(options, "display") {
        out = out.display(mode);
    }
    if let Some(name) = string_field(options, "transition") {
        out = out.transition_name(name);
    }
    match string_field(options, "force").as_deref() {
        Some("show") => out = out.force(Force::Show),
        Some("hide") => out = out.force(Force::Hide),
        _ => {}
    }
    out
}

/// Read a destination keyed by camelCase property names (`paddingTop`, ...).
fn destination_from_js(to: &JsValue) -> Destination {
    BoxProperty::ALL
        .into_iter()
        .filter_map(|prop| number_field(to, prop.style_name()).map(|v| (prop, v)))
        .collect()
}

fn elements_from_js(target: &JsValue) -> Option<Vec<Element>> {
    if let Some(list) = target.dyn_ref::<NodeList>() {
        return Some(
            (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
        );
    }
    target.dyn_ref::<Element>().map(|el| vec![el.clone()])
}

fn report(result: &Result<ProgressToken, SlideError>) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            tracing::debug!(target: "boxslide.web", %err, "slide not started");
            false
        }
    }
}

fn run<F>(target: &JsValue, start: F) -> JsValue
where
    F: Fn(&mut Slider<Element>, &mut DomHost, &Element) -> Result<ProgressToken, SlideError>,
{
    install_panic_hook();
    let Some(elements) = elements_from_js(target) else {
        return JsValue::FALSE;
    };
    let is_list = target.is_instance_of::<NodeList>();
    RUNNER.with(|runner| {
        let Some(started) = runner.with_parts(|slider, host| {
            elements
                .iter()
                .map(|el| report(&start(slider, host, el)))
                .fold(false, |any, ok| any | ok)
        }) else {
            tracing::debug!(target: "boxslide.web", "slide not started, runner busy");
            return JsValue::FALSE;
        };
        runner.ensure_frame();
        if is_list || started {
            JsValue::UNDEFINED
        } else {
            JsValue::FALSE
        }
    })
}

/// Toggle the horizontal box model of an element or every element of a
/// `NodeList`. Returns `false` when a single element could not be slid.
#[wasm_bindgen]
pub fn hslide(target: JsValue, options: JsValue) -> JsValue {
    let options = options_from_js(&options);
    run(&target, |slider, host, el| slider.hslide(host, el, &options))
}

/// Toggle the vertical box model of an element or every element of a
/// `NodeList`. Returns `false` when a single element could not be slid.
#[wasm_bindgen]
pub fn vslide(target: JsValue, options: JsValue) -> JsValue {
    let options = options_from_js(&options);
    run(&target, |slider, host, el| slider.vslide(host, el, &options))
}

/// Slide one element toward an explicit `{ width, paddingTop, ... }` target.
/// Returns `false` when nothing was started.
#[wasm_bindgen]
pub fn slide(target: JsValue, to: JsValue, options: JsValue) -> JsValue {
    let options = options_from_js(&options);
    let destination = destination_from_js(&to);
    if target.is_instance_of::<NodeList>() {
        return JsValue::FALSE;
    }
    run(&target, |slider, host, el| {
        slider.slide(host, el, &destination, &options)
    })
}
