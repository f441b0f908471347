//! RGBA8 conversion of a [`PixelSurface`].
//!
//! Always available (no feature gate) so the `png` snapshot path and any
//! `ImageData` consumer share one conversion.

use landing_fx_core::color::{Rgba, Srgb};
use landing_fx_core::surface::PixelSurface;

/// Packs a surface into RGBA8 bytes, `width * height * 4` long.
///
/// With a `background`, every pixel is composited over that opaque color so
/// the result is what the page would show behind a transparent canvas.
/// Without one, the straight-alpha surface is written as is.
pub fn surface_to_rgba(surface: &PixelSurface, background: Option<Srgb>) -> Vec<u8> {
    match background {
        None => surface.to_rgba8(),
        Some(bg) => {
            let bg = Rgba::from_srgb(bg, 1.0);
            surface
                .pixels()
                .iter()
                .flat_map(|p| p.over(bg).to_rgba8())
                .collect()
        }
    }
}
