#![deny(unsafe_code)]
//! Browser bindings for the confetti engine.
//!
//! [`start_confetti`] binds a `<canvas>` element to an [`Animation`] driven by
//! `requestAnimationFrame`, and hands back a [`ConfettiHandle`] whose `stop()`
//! (or drop) cancels the pending frame. A missing canvas or 2D context makes
//! `start_confetti` return `undefined` instead of throwing: confetti is
//! decoration and must never break the page.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use confetti_core::error::ConfettiError;
use confetti_core::{Animation, FieldConfig, FrameHandle, FrameScheduler, Srgb, Surface};
use tracing::{trace, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

/// The JS closure `requestAnimationFrame` invokes. Emptied on stop so the
/// closure (and the `Weak` it holds) is released.
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

type CanvasAnimation = Animation<CanvasSurface, RafScheduler>;

/// Installs the panic hook and routes `tracing` events to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// A [`Surface`] backed by a canvas 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wraps `canvas`, or `None` if it has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        if let Err(e) = self.ctx.translate(x, y) {
            trace!(x, y, error = ?e, "canvas translate failed");
        }
    }

    fn rotate(&mut self, angle: f64) {
        if let Err(e) = self.ctx.rotate(angle) {
            trace!(angle, error = ?e, "canvas rotate failed");
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Srgb) {
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill_rect(x, y, width, height);
    }
}

/// [`FrameScheduler`] over `window.requestAnimationFrame`.
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, ConfettiError> {
        let callback = self.callback.borrow();
        let callback = callback
            .as_ref()
            .ok_or_else(|| ConfettiError::Scheduler("frame callback released".into()))?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(|e| ConfettiError::Scheduler(format!("{e:?}")))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            warn!(handle = handle.0, error = ?e, "cancelAnimationFrame failed");
        }
    }
}

/// A running confetti animation. Call `stop()` when the page section that
/// owns the canvas is torn down; dropping the handle stops it too.
#[wasm_bindgen]
pub struct ConfettiHandle {
    animation: Rc<RefCell<CanvasAnimation>>,
    callback: FrameCallback,
}

#[wasm_bindgen]
impl ConfettiHandle {
    /// Cancels the pending frame and releases the canvas. Idempotent.
    pub fn stop(&mut self) {
        self.animation.borrow_mut().stop();
        self.callback.borrow_mut().take();
    }

    /// Re-fits the canvas to the window after a resize.
    pub fn resize(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut animation = self.animation.borrow_mut();
        let Some(surface) = animation.surface_mut() else {
            return;
        };
        let (w, h) = fit_to_window(&window, &surface.canvas);
        if let Err(e) = animation.resize(w, h) {
            warn!(error = %e, "confetti resize ignored");
        }
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.animation.borrow().is_running()
    }
}

impl Drop for ConfettiHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Starts full-window confetti on the canvas with id `canvas_id`.
///
/// `params_json` optionally overrides [`FieldConfig`] values, e.g.
/// `{"particle_count": 200, "palette": "party"}`. Returns `undefined` when
/// there is no such canvas or no 2D context.
#[wasm_bindgen]
pub fn start_confetti(canvas_id: &str, params_json: Option<String>) -> Option<ConfettiHandle> {
    let window = web_sys::window()?;
    let surface = window
        .document()
        .and_then(|d| d.get_element_by_id(canvas_id))
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        .and_then(|canvas| {
            fit_to_window(&window, &canvas);
            CanvasSurface::new(canvas)
        });

    let config = config_from_json(params_json.as_deref());
    let seed = js_sys::Date::now() as u64;

    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let scheduler = RafScheduler {
        window,
        callback: Rc::clone(&callback),
    };
    let animation = Rc::new(RefCell::new(Animation::new(config, seed, scheduler)));

    let weak: Weak<RefCell<CanvasAnimation>> = Rc::downgrade(&animation);
    *callback.borrow_mut() = Some(Closure::new(move || {
        if let Some(animation) = weak.upgrade() {
            animation.borrow_mut().on_frame();
        }
    }));

    let started = animation.borrow_mut().start(surface);
    if !started {
        callback.borrow_mut().take();
        return None;
    }
    Some(ConfettiHandle {
        animation,
        callback,
    })
}

/// Parses optional JSON overrides, falling back to defaults when the JSON is
/// malformed or describes an invalid config.
fn config_from_json(params_json: Option<&str>) -> FieldConfig {
    let Some(json) = params_json else {
        return FieldConfig::default();
    };
    let config = match serde_json::from_str::<serde_json::Value>(json) {
        Ok(params) => FieldConfig::from_json(&params),
        Err(e) => {
            warn!(error = %e, "confetti params are not JSON, using defaults");
            return FieldConfig::default();
        }
    };
    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            warn!(error = %e, "confetti params rejected, using defaults");
            FieldConfig::default()
        }
    }
}

/// Sizes the canvas backing store to the window's inner size.
fn fit_to_window(window: &Window, canvas: &HtmlCanvasElement) -> (f64, f64) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let w = dim(window.inner_width());
    let h = dim(window.inner_height());
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    (w, h)
}
