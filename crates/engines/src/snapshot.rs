//! CPU-side PNG export of a [`Surface`].
//!
//! Feature-gated behind `png` (default on) so embeddings can depend on the
//! registry without pulling in the `image` crate. The flattening itself
//! lives in [`crate::composite`] (always available).

use glint_core::error::EffectError;
use glint_core::surface::Surface;
use glint_core::Rgba;
use std::path::Path;

use crate::composite::over_background;

/// Writes a surface as a PNG image, flattened over `background`.
///
/// Returns `EffectError::InvalidDimensions` if the surface dimensions
/// overflow `u32`, or `EffectError::Io` on write failure.
pub fn write_png(surface: &Surface, background: Rgba, path: &Path) -> Result<(), EffectError> {
    let rgba = over_background(surface, background);
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
        let surface = Surface::filled(16, 16, Rgba::opaque(120, 40, 200)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        write_png(&surface, Rgba::BLACK, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 16);
        assert_eq!(img.get_pixel(0, 0).0, [120, 40, 200, 255]);
    }

    #[test]
    fn write_png_to_bad_path_is_io_error() {
        let surface = Surface::new(4, 4).unwrap();
        let result = write_png(
            &surface,
            Rgba::BLACK,
            Path::new("/nonexistent/dir/frame.png"),
        );
        assert!(matches!(result, Err(EffectError::Io(_))));
    }
}
