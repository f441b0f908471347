//! PNG snapshot of a [`PixelSurface`].
//!
//! Feature-gated behind `png` (default on) so wasm builds can depend on this
//! crate without pulling in the `image` crate.

use landing_fx_core::color::Srgb;
use landing_fx_core::error::EffectError;
use landing_fx_core::surface::PixelSurface;
use landing_fx_core::Surface;
use std::path::Path;

use crate::pixel::surface_to_rgba;

/// Writes the surface as a PNG, optionally flattened over `background`.
///
/// Returns `EffectError::InvalidDimensions` if the surface dimensions
/// overflow `u32`, or `EffectError::Io` on write failure.
pub fn write_png(
    surface: &PixelSurface,
    background: Option<Srgb>,
    path: &Path,
) -> Result<(), EffectError> {
    let rgba = surface_to_rgba(surface, background);
    let w = u32::try_from(surface.width()).map_err(|_| EffectError::InvalidDimensions)?;
    let h = u32::try_from(surface.height()).map_err(|_| EffectError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| EffectError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EffectError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_png_round_trip() {
        let mut surface = PixelSurface::new(16, 12).unwrap();
        surface.fill_circle(8.0, 6.0, 3.0, Srgb::BLACK, 0.3).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("particles.png");

        write_png(&surface, None, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 12);
        assert_eq!(img.get_pixel(8, 6).0[3], 77);
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn write_png_to_missing_directory_is_io_error() {
        let surface = PixelSurface::new(4, 4).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.png");
        assert!(matches!(
            write_png(&surface, None, &path),
            Err(EffectError::Io(_))
        ));
    }
}
