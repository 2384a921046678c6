//! Pure-computation flattening of a [`Surface`] over a background color.
//!
//! This module is always available (no feature gate) so that both the `png`
//! snapshot path and any embedding that wants raw pixels share the same
//! conversion. Effects render with straight alpha, so export composites
//! every texel over an opaque background first.

use glint_core::surface::Surface;
use glint_core::Rgba;

/// Composites the surface over an opaque background, producing an RGBA8
/// buffer whose alpha is 255 everywhere.
///
/// The buffer length is `width * height * 4`, row-major.
pub fn over_background(surface: &Surface, background: Rgba) -> Vec<u8> {
    let bg = background.with_alpha(255);
    surface
        .data()
        .chunks_exact(4)
        .flat_map(|px| {
            let fg = Rgba::new(px[0], px[1], px[2], px[3]);
            let out = fg.over(bg);
            [out.r, out.g, out.b, 255u8]
        })
        .collect()
}
