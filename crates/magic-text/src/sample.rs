//! Glyph bitmap sampling.
//!
//! The rasterized text is a measurement scratchpad: it is never blitted to
//! the output surface. Instead a regular grid walks the bitmap and every
//! cell whose pixel has nonzero alpha becomes one particle target carrying
//! that pixel's color.

use glint_core::Rgba;

/// An RGBA bitmap of rasterized text, at device-pixel-ratio scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GlyphBitmap {
    /// Creates a bitmap from raw RGBA bytes. Returns `None` if the byte
    /// count does not match the dimensions.
    pub fn from_rgba8(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height * 4).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// The zero-sized bitmap produced when rasterization is unavailable.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The larger bitmap dimension, used to scale particle scatter.
    pub fn span(&self) -> f64 {
        self.width.max(self.height) as f64
    }

    /// Pixel at `(x, y)`, transparent black outside the bitmap.
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::TRANSPARENT;
        }
        let i = (y * self.width + x) * 4;
        Rgba::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    /// Mutable raw bytes, for the rasterizer's draw callback.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// One grid cell that landed on ink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    /// Cell position in bitmap pixels.
    pub x: f64,
    pub y: f64,
    /// Pixel color, alpha included.
    pub color: Rgba,
}

/// Grid step in bitmap pixels.
///
/// The density scale is inverted on purpose: higher `density` gives a
/// smaller step and therefore more particles. `density` is clamped to 1–5.
pub fn grid_step(density: u32, pixel_ratio: f64) -> usize {
    let density = density.clamp(1, 5) as usize;
    let unit = (pixel_ratio.round() as usize).max(2);
    unit * (6 - density)
}

/// Walks the bitmap on the sampling grid and collects every inked cell.
///
/// Deterministic: the same bitmap, density, and pixel ratio always produce
/// the same points in the same order.
pub fn sample_points(bitmap: &GlyphBitmap, density: u32, pixel_ratio: f64) -> Vec<SamplePoint> {
    let mut points = Vec::new();
    if bitmap.is_empty() {
        return points;
    }
    let step = grid_step(density, pixel_ratio);
    let mut y = 0;
    while y < bitmap.height() {
        let mut x = 0;
        while x < bitmap.width() {
            let color = bitmap.pixel(x, y);
            if color.a > 0 {
                points.push(SamplePoint {
                    x: x as f64,
                    y: y as f64,
                    color,
                });
            }
            x += step;
        }
        y += step;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_bitmap(w: usize, h: usize) -> GlyphBitmap {
        GlyphBitmap::from_rgba8(w, h, vec![255; w * h * 4]).unwrap()
    }

    // ---- GlyphBitmap tests ----

    #[test]
    fn from_rgba8_rejects_mismatched_length() {
        assert!(GlyphBitmap::from_rgba8(2, 2, vec![0; 15]).is_none());
        assert!(GlyphBitmap::from_rgba8(2, 2, vec![0; 16]).is_some());
    }

    #[test]
    fn empty_bitmap_has_no_span() {
        let b = GlyphBitmap::empty();
        assert!(b.is_empty());
        assert_eq!(b.span(), 0.0);
    }

    #[test]
    fn pixel_outside_is_transparent() {
        let b = solid_bitmap(4, 4);
        assert_eq!(b.pixel(4, 0), Rgba::TRANSPARENT);
        assert_eq!(b.pixel(0, 4), Rgba::TRANSPARENT);
        assert_eq!(b.pixel(3, 3), Rgba::WHITE);
    }

    #[test]
    fn span_is_larger_dimension() {
        assert_eq!(solid_bitmap(10, 4).span(), 10.0);
        assert_eq!(solid_bitmap(4, 10).span(), 10.0);
    }

    // ---- Grid step tests ----

    #[test]
    fn grid_step_inverts_density() {
        // Higher density, smaller step, more particles.
        assert_eq!(grid_step(1, 1.0), 10);
        assert_eq!(grid_step(3, 1.0), 6);
        assert_eq!(grid_step(5, 1.0), 2);
    }

    #[test]
    fn grid_step_scales_with_pixel_ratio() {
        assert_eq!(grid_step(3, 2.0), 6);
        assert_eq!(grid_step(3, 3.0), 9);
        // Sub-unity ratios floor at the minimum unit of 2.
        assert_eq!(grid_step(3, 0.5), 6);
    }

    #[test]
    fn grid_step_clamps_density() {
        assert_eq!(grid_step(0, 1.0), grid_step(1, 1.0));
        assert_eq!(grid_step(9, 1.0), grid_step(5, 1.0));
    }

    // ---- Sampling tests ----

    #[test]
    fn empty_bitmap_yields_no_points() {
        assert!(sample_points(&GlyphBitmap::empty(), 3, 1.0).is_empty());
    }

    #[test]
    fn transparent_cells_are_skipped() {
        let mut data = vec![0u8; 8 * 8 * 4];
        // One inked pixel at (0, 0).
        data[3] = 255;
        let b = GlyphBitmap::from_rgba8(8, 8, data).unwrap();
        let pts = sample_points(&b, 5, 1.0);
        assert_eq!(pts.len(), 1);
        assert_eq!((pts[0].x, pts[0].y), (0.0, 0.0));
    }

    #[test]
    fn solid_bitmap_yields_full_grid() {
        let b = solid_bitmap(12, 12);
        // Step 2: cells at 0,2,..,10 on both axes.
        assert_eq!(sample_points(&b, 5, 1.0).len(), 36);
        // Step 6: cells at 0,6.
        assert_eq!(sample_points(&b, 3, 1.0).len(), 4);
    }

    #[test]
    fn sampled_color_carries_pixel_alpha() {
        let mut data = vec![0u8; 4 * 4 * 4];
        data[0] = 200;
        data[1] = 100;
        data[2] = 50;
        data[3] = 128;
        let b = GlyphBitmap::from_rgba8(4, 4, data).unwrap();
        let pts = sample_points(&b, 5, 1.0);
        assert_eq!(pts[0].color, Rgba::new(200, 100, 50, 128));
    }

    #[test]
    fn identical_inputs_yield_identical_points() {
        let b = solid_bitmap(20, 10);
        let a = sample_points(&b, 4, 2.0);
        let c = sample_points(&b, 4, 2.0);
        assert_eq!(a, c);
    }

    // ---- Property-based tests ----

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn point_count_is_deterministic(
                w in 1_usize..40,
                h in 1_usize..40,
                density in 0_u32..8,
                ratio in 0.25_f64..4.0,
            ) {
                let b = solid_bitmap(w, h);
                prop_assert_eq!(
                    sample_points(&b, density, ratio).len(),
                    sample_points(&b, density, ratio).len()
                );
            }

            #[test]
            fn higher_density_never_yields_fewer_points(
                w in 4_usize..40,
                h in 4_usize..40,
                density in 1_u32..5,
            ) {
                let b = solid_bitmap(w, h);
                let sparse = sample_points(&b, density, 1.0).len();
                let dense = sample_points(&b, density + 1, 1.0).len();
                prop_assert!(dense >= sparse);
            }

            #[test]
            fn all_points_lie_inside_bitmap(
                w in 1_usize..40,
                h in 1_usize..40,
            ) {
                let b = solid_bitmap(w, h);
                for p in sample_points(&b, 3, 1.0) {
                    prop_assert!(p.x < w as f64 && p.y < h as f64);
                }
            }
        }
    }
}
