//! The page elements the effects attach to.

use landing_fx_core::geometry::Rect;
use landing_fx_effects::scroll::{ScrollBlock, ScrollRequest};
use landing_fx_effects::{selectors, ScrollBehavior, StyleChange, StyleTarget};
use landing_fx_scene::Layout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, ScrollIntoViewOptions, ScrollLogicalPosition, Window};

/// Handles to every element an effect may touch. Absent elements are `None`
/// (or an empty card list).
pub struct Page {
    window: Window,
    pub particles: Option<Element>,
    pub orb: Option<HtmlElement>,
    pub cards: Vec<HtmlElement>,
    pub cta: Option<Element>,
    pub apps: Option<Element>,
    pub flame: Option<HtmlElement>,
    pub flame_glow: Option<HtmlElement>,
}

impl Page {
    pub fn query(window: Window, document: &Document) -> Result<Self, JsValue> {
        let cards = document.query_selector_all(selectors::APP_CARD)?;
        let cards = (0..cards.length())
            .filter_map(|i| cards.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect();
        Ok(Self {
            window,
            particles: document.query_selector(selectors::PARTICLES)?,
            orb: html(document, selectors::ORB)?,
            cards,
            cta: document.query_selector(selectors::CTA_BUTTON)?,
            apps: document.query_selector(selectors::APPS)?,
            flame: html(document, selectors::FLAME)?,
            flame_glow: html(document, selectors::FLAME_GLOW)?,
        })
    }

    /// Looks the flame elements up again.
    pub fn requery_flame(&mut self) -> Result<(), JsValue> {
        let document = self
            .window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        self.flame = html(&document, selectors::FLAME)?;
        self.flame_glow = html(&document, selectors::FLAME_GLOW)?;
        Ok(())
    }

    pub fn has_flame(&self) -> bool {
        self.flame.is_some() && self.flame_glow.is_some()
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Viewport size in CSS pixels.
    pub fn viewport_size(&self) -> Result<(f64, f64), JsValue> {
        let w = self.window.inner_width()?.as_f64().unwrap_or(0.0);
        let h = self.window.inner_height()?.as_f64().unwrap_or(0.0);
        Ok((w, h))
    }

    /// Reads the current element rectangles.
    pub fn layout(&self) -> Result<Layout, JsValue> {
        let (w, h) = self.viewport_size()?;
        Ok(Layout {
            viewport: Rect::viewport(w, h),
            orb: self.orb.as_ref().map(|e| client_rect(e)),
            cards: self.cards.iter().map(|e| client_rect(e)).collect(),
            flame: self.flame.is_some(),
            flame_glow: self.flame_glow.is_some(),
            cta: self.cta.is_some(),
            apps: self.apps.is_some(),
        })
    }

    fn element(&self, target: StyleTarget) -> Option<&HtmlElement> {
        match target {
            StyleTarget::Orb => self.orb.as_ref(),
            StyleTarget::Card(i) => self.cards.get(i),
            StyleTarget::Flame => self.flame.as_ref(),
            StyleTarget::FlameGlow => self.flame_glow.as_ref(),
        }
    }

    /// Writes style changes to their elements, in order.
    pub fn apply(&self, changes: &[StyleChange]) -> Result<(), JsValue> {
        for change in changes {
            if let Some(el) = self.element(change.target) {
                el.style()
                    .set_property(change.property.css_name(), &change.value)?;
            }
        }
        Ok(())
    }

    /// Scrolls the apps section into view.
    pub fn scroll_apps(&self, request: ScrollRequest) {
        let Some(apps) = &self.apps else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(match request.behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
        });
        options.set_block(match request.block {
            ScrollBlock::Start => ScrollLogicalPosition::Start,
            ScrollBlock::Center => ScrollLogicalPosition::Center,
            ScrollBlock::End => ScrollLogicalPosition::End,
            ScrollBlock::Nearest => ScrollLogicalPosition::Nearest,
        });
        apps.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

fn html(document: &Document, selector: &str) -> Result<Option<HtmlElement>, JsValue> {
    Ok(document
        .query_selector(selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

fn client_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}
