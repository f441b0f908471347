#![deny(unsafe_code)]
//! Browser bindings for landing-fx.
//!
//! `start()` finds the page elements, mounts a fixed full-window canvas in
//! `.particles`, and wires every effect: a `requestAnimationFrame` loop for
//! particles, orb drift and reveal checks; pointer and card listeners for
//! hover; a CTA click listener for smooth scroll; and a delayed interval
//! timer for the flame.

mod canvas;
mod dom;
mod logger;

use std::cell::RefCell;
use std::rc::Rc;

use canvas::CanvasSurface;
use dom::Page;
use landing_fx_core::frame::Animation;
use landing_fx_core::prng::RandomSource;
use landing_fx_core::surface::Surface;
use landing_fx_effects::EffectsConfig;
use landing_fx_particles::ParticleParams;
use landing_fx_scene::Scene;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent};

/// `Math.random()` as a random source.
struct MathRandom;

impl RandomSource for MathRandom {
    fn next_f64(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

struct Host {
    scene: Scene<CanvasSurface, MathRandom>,
    page: Page,
}

impl Host {
    /// Applies queued style changes, logging rather than throwing.
    fn flush(&mut self) {
        let changes = self.scene.drain_style_changes();
        if let Err(e) = self.page.apply(&changes) {
            log::warn!("style update failed: {e:?}");
        }
    }

    fn refresh_layout(&mut self) {
        match self.page.layout() {
            Ok(layout) => self.scene.set_layout(layout),
            Err(e) => log::warn!("layout read failed: {e:?}"),
        }
    }

    fn frame(&mut self, now_ms: f64) {
        self.refresh_layout();
        self.scene.observe_cards();
        if let Err(e) = self.scene.frame(now_ms) {
            log::error!("frame failed: {e}");
        }
        self.flush();
    }
}

type SharedHost = Rc<RefCell<Host>>;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

/// Wires every effect into the live page with default parameters.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    start_with(&JsValue::UNDEFINED, &JsValue::UNDEFINED)
}

/// Like [`start`], with particle parameters and effect constants given as
/// plain objects (missing keys keep their defaults).
#[wasm_bindgen(js_name = startWith)]
pub fn start_with(params: &JsValue, config: &JsValue) -> Result<(), JsValue> {
    let params = ParticleParams::from_json(&js_to_json(params)?).map_err(to_js)?;
    let config = EffectsConfig::from_json(&js_to_json(config)?).map_err(to_js)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let page = Page::query(window, &document)?;

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("canvas element has unexpected type"))?;
    let style = canvas.style();
    for (name, value) in [
        ("position", "fixed"),
        ("top", "0"),
        ("left", "0"),
        ("width", "100%"),
        ("height", "100%"),
        ("pointer-events", "none"),
        ("z-index", "1"),
    ] {
        style.set_property(name, value)?;
    }
    match &page.particles {
        Some(container) => {
            container.append_child(&canvas)?;
        }
        None => log::debug!("no particles container, canvas left detached"),
    }

    let (w, h) = page.viewport_size()?;
    let mut surface = CanvasSurface::new(canvas).map_err(to_js)?;
    surface
        .resize((w as usize).max(1), (h as usize).max(1))
        .map_err(to_js)?;

    let layout = page.layout()?;
    let mut scene =
        Scene::new(surface, MathRandom, MathRandom, params, config, layout).map_err(to_js)?;
    scene.detach_flame_timer();
    scene.prepare_reveal();

    let host = Rc::new(RefCell::new(Host { scene, page }));
    host.borrow_mut().flush();

    listen_resize(&host)?;
    listen_pointer(&host, &document)?;
    listen_cards(&host)?;
    listen_cta(&host)?;
    start_flame_timer(&host, &config)?;
    start_animation(host)?;
    log::info!("landing effects started");
    Ok(())
}

fn listen_resize(host: &SharedHost) -> Result<(), JsValue> {
    let h = host.clone();
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        let mut host = h.borrow_mut();
        match host.page.viewport_size() {
            Ok((width, height)) => {
                if let Err(e) = host.scene.resize(width as usize, height as usize) {
                    log::warn!("resize to {width}x{height} skipped: {e}");
                }
            }
            Err(e) => log::warn!("viewport read failed: {e:?}"),
        }
    });
    host.borrow()
        .page
        .window()
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(())
}

fn listen_pointer(host: &SharedHost, document: &web_sys::Document) -> Result<(), JsValue> {
    let h = host.clone();
    let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
        let mut host = h.borrow_mut();
        host.refresh_layout();
        host.scene
            .pointer_moved(f64::from(e.client_x()), f64::from(e.client_y()));
        host.flush();
    });
    document.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    on_move.forget();
    Ok(())
}

fn listen_cards(host: &SharedHost) -> Result<(), JsValue> {
    let cards = host.borrow().page.cards.clone();
    for (index, card) in cards.iter().enumerate() {
        let h = host.clone();
        let on_enter = Closure::<dyn FnMut()>::new(move || {
            let mut host = h.borrow_mut();
            host.scene.card_entered(index);
            host.flush();
        });
        card.add_event_listener_with_callback("mouseenter", on_enter.as_ref().unchecked_ref())?;
        on_enter.forget();

        let h = host.clone();
        let on_leave = Closure::<dyn FnMut()>::new(move || {
            let mut host = h.borrow_mut();
            host.scene.card_left(index);
            host.flush();
        });
        card.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
        on_leave.forget();
    }
    Ok(())
}

fn listen_cta(host: &SharedHost) -> Result<(), JsValue> {
    let Some(cta) = host.borrow().page.cta.clone() else {
        log::debug!("no cta button, smooth scroll disabled");
        return Ok(());
    };
    let h = host.clone();
    let on_click = Closure::<dyn FnMut()>::new(move || {
        let host = h.borrow();
        if let Some(request) = host.scene.cta_clicked() {
            host.page.scroll_apps(request);
        }
    });
    cta.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

/// Waits `flicker_delay_ms`, looks the flame up, then flickers every
/// `flicker_period_ms` if it is there.
fn start_flame_timer(host: &SharedHost, config: &EffectsConfig) -> Result<(), JsValue> {
    let window = host.borrow().page.window().clone();
    let period = config.flicker_period_ms.round() as i32;

    let h = host.clone();
    let interval_window = window.clone();
    let start = Closure::once(move || {
        {
            let mut host = h.borrow_mut();
            if let Err(e) = host.page.requery_flame() {
                log::warn!("flame lookup failed: {e:?}");
                return;
            }
            host.refresh_layout();
            if !host.page.has_flame() {
                log::debug!("no flame at timer start, flicker disabled");
                return;
            }
        }
        let tick = Closure::<dyn FnMut()>::new(move || {
            let mut host = h.borrow_mut();
            host.scene.flicker();
            host.flush();
        });
        if let Err(e) = interval_window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            period,
        ) {
            log::warn!("flame timer not started: {e:?}");
        }
        tick.forget();
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        start.as_ref().unchecked_ref(),
        config.flicker_delay_ms.round() as i32,
    )?;
    start.forget();
    Ok(())
}

/// Runs one scene frame per animation frame, for the life of the page.
fn start_animation(host: SharedHost) -> Result<(), JsValue> {
    let window = host.borrow().page.window().clone();
    let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = callback.clone();
    let frame_window = window.clone();

    *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |now_ms: f64| {
        host.borrow_mut().frame(now_ms);
        if let Some(cb) = next.borrow().as_ref() {
            if let Err(e) = frame_window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::error!("animation stopped: {e:?}");
            }
        }
    }));

    if let Some(cb) = callback.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}

fn js_to_json(value: &JsValue) -> Result<serde_json::Value, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(serde_json::Value::Object(Default::default()));
    }
    let text = String::from(js_sys::JSON::stringify(value)?);
    serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js(e: landing_fx_core::EffectError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
