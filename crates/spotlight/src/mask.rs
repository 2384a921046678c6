//! Persistent alpha mask with pure punch/heal operations.
//!
//! The mask stores one coverage value per texel in [0, 1]: 1 means the front
//! layer is fully present, 0 means fully erased (back layer visible). The
//! original destination-out canvas trick baked erasure into the pixel
//! buffer; keeping the mask separate makes punch and heal pure functions
//! that compose at render time and can be tested without any surface.

use glint_core::error::EffectError;

/// A 2D alpha coverage buffer in [0, 1], row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaMask {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl AlphaMask {
    /// Creates a fully opaque mask.
    ///
    /// Returns `EffectError::InvalidDimensions` if either dimension is zero
    /// or the texel count overflows.
    pub fn opaque(width: usize, height: usize) -> Result<Self, EffectError> {
        if width == 0 || height == 0 {
            return Err(EffectError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(EffectError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            data: vec![1.0; len],
        })
    }

    /// Mask width in texels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height in texels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Coverage at `(x, y)`, or 0 outside the mask.
    pub fn value(&self, x: usize, y: usize) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.data[y * self.width + x]
    }

    /// Read-only access to the raw coverage data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Destination-out erase: a soft circular hole centered at `(cx, cy)`.
    ///
    /// The erase strength is a radial gradient — full at the center, fading
    /// to nothing at `radius` — so coverage becomes `a * (d / radius)` inside
    /// the circle and is untouched at and beyond the rim. A non-positive
    /// radius is a no-op.
    pub fn punch(&mut self, cx: f64, cy: f64, radius: f64) {
        if radius <= 0.0 {
            return;
        }
        let x_min = ((cx - radius).floor().max(0.0)) as usize;
        let y_min = ((cy - radius).floor().max(0.0)) as usize;
        let x_max = ((cx + radius).ceil() as isize).clamp(0, self.width as isize) as usize;
        let y_max = ((cy + radius).ceil() as isize).clamp(0, self.height as isize) as usize;
        for y in y_min..y_max {
            for x in x_min..x_max {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                if d < radius {
                    let keep = (d / radius) as f32;
                    self.data[y * self.width + x] *= keep;
                }
            }
        }
    }

    /// Source-over restore: every texel moves toward full coverage.
    ///
    /// `a ← a + rate * (1 - a)`, with `rate` clamped to [0, 1]. Repeated
    /// application converges every texel to 1.
    pub fn heal(&mut self, rate: f64) {
        let rate = rate.clamp(0.0, 1.0) as f32;
        for a in &mut self.data {
            *a += rate * (1.0 - *a);
        }
    }

    /// Snaps every texel to full coverage (the idle-snap terminal state).
    pub fn snap_opaque(&mut self) {
        self.data.fill(1.0);
    }

    /// True when every texel is exactly 1.0.
    pub fn is_opaque(&self) -> bool {
        self.data.iter().all(|&a| a >= 1.0)
    }
}
