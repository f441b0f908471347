//! Drawing surfaces.
//!
//! A [`Surface`] is the transparent full-viewport area effects draw onto.
//! [`PixelSurface`] is the CPU implementation used by snapshots and tests;
//! browser hosts implement the trait over a 2D canvas context.

use crate::color::{Rgba, Srgb};
use crate::error::EffectError;

/// A resizable drawing target.
///
/// Dimensions are in surface pixels. Implementations composite each fill
/// over what is already drawn (source-over).
pub trait Surface {
    /// Current width in pixels.
    fn width(&self) -> usize;

    /// Current height in pixels.
    fn height(&self) -> usize;

    /// Resizes the surface. Content after a resize is unspecified until the
    /// next [`clear`](Surface::clear).
    fn resize(&mut self, width: usize, height: usize) -> Result<(), EffectError>;

    /// Clears every pixel to fully transparent.
    fn clear(&mut self);

    /// Fills a circle centred at `(x, y)` with the given color and opacity.
    fn fill_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        color: Srgb,
        alpha: f64,
    ) -> Result<(), EffectError>;
}

/// A CPU RGBA surface with straight alpha, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl PixelSurface {
    /// Creates a transparent surface.
    ///
    /// Returns `EffectError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, EffectError> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; len],
        })
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Read-only access to the row-major pixel data.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.a > 0.0).count()
    }

    /// Packs the surface into RGBA8 bytes, `width * height * 4` long.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_rgba8()).collect()
    }
}

impl Surface for PixelSurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn resize(&mut self, width: usize, height: usize) -> Result<(), EffectError> {
        let len = pixel_count(width, height)?;
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgba::TRANSPARENT; len];
        Ok(())
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    /// Covers every pixel whose centre lies inside the circle. No
    /// anti-aliasing; partially covered pixels are either in or out.
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
        let src = Rgba::from_srgb(color, alpha);
        let r_sq = radius * radius;

        // Bounding box clipped to the surface.
        let min_x = (x - radius).floor().max(0.0) as usize;
        let min_y = (y - radius).floor().max(0.0) as usize;
        let max_x = ((x + radius).ceil().max(0.0) as usize).min(self.width);
        let max_y = ((y + radius).ceil().max(0.0) as usize).min(self.height);

        for py in min_y..max_y {
            let dy = py as f64 + 0.5 - y;
            for px in min_x..max_x {
                let dx = px as f64 + 0.5 - x;
                if dx * dx + dy * dy <= r_sq {
                    let idx = py * self.width + px;
                    self.pixels[idx] = src.over(self.pixels[idx]);
                }
            }
        }
        Ok(())
    }
}

fn pixel_count(width: usize, height: usize) -> Result<usize, EffectError> {
    if width == 0 || height == 0 {
        return Err(EffectError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .ok_or(EffectError::InvalidDimensions)
}
