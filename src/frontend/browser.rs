use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use js_sys::Reflect;
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::environment::{BrowserEnvironment, Overflow};
use crate::error::CapabilityError;
use crate::globe::session::{FrameHandle, FrameScheduler};
use crate::reveal::ObserverOptions;
use crate::telemetry::{log_event, LogLevel};
use crate::viewport::{ResizeSource, ViewportHub};

pub fn browser_window() -> Result<Window, CapabilityError> {
    window().ok_or(CapabilityError::MissingWindow)
}

pub fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

pub fn report_capability(err: &CapabilityError, component: &str) {
    log_event(
        LogLevel::Warn,
        "capability_missing",
        json!({ "component": component, "code": err.code(), "detail": err.to_string() }),
    );
}

/// `document`/`window` side effects for the live page.
pub struct WebEnvironment;

impl BrowserEnvironment for WebEnvironment {
    fn set_title(&self, title: &str) {
        if let Some(document) = window().and_then(|w| w.document()) {
            document.set_title(title);
        }
    }

    fn scroll_to(&self, x: f64, y: f64) {
        if let Some(win) = window() {
            win.scroll_to_with_x_and_y(x, y);
        }
    }

    fn scroll_y(&self) -> f64 {
        window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
    }

    fn set_body_overflow(&self, overflow: Overflow) {
        if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
            let _ = body.style().set_property("overflow", overflow.as_css());
        }
    }

    fn scroll_into_view(&self, element_id: &str) {
        let Some(element) = window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(element_id))
        else {
            return;
        };

        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// A window event listener removed when dropped.
pub struct WindowListener {
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl WindowListener {
    pub fn new<F>(event: &'static str, callback: F) -> Result<Self, CapabilityError>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let win = browser_window()?;
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(callback);
        win.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|_| CapabilityError::Listener(event))?;
        Ok(Self { event, callback })
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        if let Some(win) = window() {
            let _ = win.remove_event_listener_with_callback(
                self.event,
                self.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` with a single reusable callback. Dropping the
/// scheduler cancels the pending frame and frees the callback.
pub struct RafScheduler {
    callback: FrameCallback,
    pending: Rc<Cell<Option<FrameHandle>>>,
}

/// Weak handle the frame callback uses to schedule itself again.
#[derive(Clone)]
pub struct RafRequester {
    callback: Weak<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    pending: Rc<Cell<Option<FrameHandle>>>,
}

impl RafScheduler {
    pub fn new() -> Self {
        Self {
            callback: Rc::new(RefCell::new(None)),
            pending: Rc::new(Cell::new(None)),
        }
    }

    pub fn set_callback<F>(&self, callback: F)
    where
        F: FnMut(f64) + 'static,
    {
        *self.callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(callback));
    }

    pub fn requester(&self) -> RafRequester {
        RafRequester {
            callback: Rc::downgrade(&self.callback),
            pending: Rc::clone(&self.pending),
        }
    }

    /// Cancels the pending frame and frees the callback.
    pub fn stop(&self) {
        if let (Some(handle), Some(win)) = (self.pending.take(), window()) {
            let _ = win.cancel_animation_frame(handle);
        }
        self.callback.borrow_mut().take();
    }
}

fn request_with(callback: &FrameCallback, pending: &Cell<Option<FrameHandle>>) -> Option<FrameHandle> {
    let win = window()?;
    let slot = callback.borrow();
    let closure = slot.as_ref()?;
    let handle = win
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()?;
    pending.set(Some(handle));
    Some(handle)
}

impl RafRequester {
    /// Installs the frame callback on a scheduler that has already been
    /// handed to its owner.
    pub fn set_callback<F>(&self, callback: F)
    where
        F: FnMut(f64) + 'static,
    {
        if let Some(slot) = self.callback.upgrade() {
            *slot.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(callback));
        }
    }

    pub fn request(&self) -> Option<FrameHandle> {
        let callback = self.callback.upgrade()?;
        request_with(&callback, &self.pending)
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        request_with(&self.callback, &self.pending)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(win) = window() {
            let _ = win.cancel_animation_frame(handle);
        }
        if self.pending.get() == Some(handle) {
            self.pending.set(None);
        }
    }
}

impl Drop for RafScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Live `IntersectionObserver`; disconnects when dropped.
pub struct ObserverHandle {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn intersection_observer_supported() -> bool {
    window()
        .map(|win| Reflect::has(&win, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

pub fn observe_intersection<F>(
    target: &Element,
    options: &ObserverOptions,
    mut on_change: F,
) -> Result<ObserverHandle, CapabilityError>
where
    F: FnMut(bool) + 'static,
{
    if !intersection_observer_supported() {
        return Err(CapabilityError::ObserverUnavailable);
    }

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    on_change(entry.is_intersecting());
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_root_margin(&options.root_margin);
    init.set_threshold(&JsValue::from_f64(options.threshold));
    if let Some(root_id) = options.root.as_deref() {
        let root = window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(root_id))
            .ok_or_else(|| CapabilityError::MissingElement(root_id.to_string()))?;
        init.set_root(Some(&root));
    }

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|_| CapabilityError::ObserverUnavailable)?;
    observer.observe(target);

    Ok(ObserverHandle {
        observer,
        _callback: callback,
    })
}

pub fn is_in_viewport(element: &Element) -> bool {
    let rect = element.get_bounding_client_rect();
    let (_, height) = viewport_size();
    rect.top() < height && rect.bottom() > 0.0
}

/// The single window `resize` subscription behind the viewport hub.
#[derive(Default)]
pub struct WindowResizeSource {
    listener: Option<WindowListener>,
}

impl ResizeSource for WindowResizeSource {
    fn attach(&mut self) {
        match WindowListener::new("resize", |_| dispatch_resize()) {
            Ok(listener) => self.listener = Some(listener),
            Err(err) => report_capability(&err, "viewport"),
        }
    }

    fn detach(&mut self) {
        self.listener = None;
    }

    fn measure(&self) -> (f64, f64) {
        viewport_size()
    }
}

thread_local! {
    static VIEWPORT_HUB: RefCell<ViewportHub<WindowResizeSource>> =
        RefCell::new(ViewportHub::new(WindowResizeSource::default()));
}

pub fn with_viewport_hub<T>(f: impl FnOnce(&mut ViewportHub<WindowResizeSource>) -> T) -> T {
    VIEWPORT_HUB.with(|hub| f(&mut hub.borrow_mut()))
}

fn dispatch_resize() {
    if let Some(notification) = with_viewport_hub(|hub| hub.on_resize()) {
        notification.deliver();
    }
}
