//! Canvas 2D drawing surface.

use std::f64::consts::TAU;

use landing_fx_core::color::Srgb;
use landing_fx_core::error::EffectError;
use landing_fx_core::surface::Surface;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A [`Surface`] backed by an `HtmlCanvasElement` and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wraps a canvas, acquiring its 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, EffectError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| EffectError::Surface("canvas has no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EffectError::Surface("2d context has unexpected type".into()))?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> usize {
        self.canvas.width() as usize
    }

    fn height(&self) -> usize {
        self.canvas.height() as usize
    }

    fn resize(&mut self, width: usize, height: usize) -> Result<(), EffectError> {
        if width == 0 || height == 0 {
            return Err(EffectError::InvalidDimensions);
        }
        let w = u32::try_from(width).map_err(|_| EffectError::InvalidDimensions)?;
        let h = u32::try_from(height).map_err(|_| EffectError::InvalidDimensions)?;
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        Ok(())
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }

    fn fill_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        color: Srgb,
        alpha: f64,
    ) -> Result<(), EffectError> {
        if radius <= 0.0 || alpha <= 0.0 {
            return Ok(());
        }
        self.ctx.save();
        self.ctx.set_global_alpha(alpha);
        #[allow(deprecated)]
        self.ctx.set_fill_style(&JsValue::from_str(&color.to_hex()));
        self.ctx.begin_path();
        let drawn = self.ctx.arc(x, y, radius, 0.0, TAU).map_err(js_error);
        if drawn.is_ok() {
            self.ctx.fill();
        }
        self.ctx.restore();
        drawn
    }
}

/// Maps a thrown JS value into a surface error.
pub(crate) fn js_error(value: JsValue) -> EffectError {
    EffectError::Surface(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}
