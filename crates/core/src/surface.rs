//! RGBA8 raster surface with source-over blending and shape fills.
//!
//! A `Surface` stores `width * height` straight-alpha RGBA pixels in
//! row-major layout. It is the drawing target every effect owns exclusively:
//! cleared and repainted each frame, replaced wholesale on resize. Access is
//! bounds-checked; there is no wrap-around addressing (edge policy is an
//! engine concern, not a raster concern).

use crate::color::Rgba;
use crate::error::EffectError;

/// A 2D straight-alpha RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Surface {
    /// Creates a fully transparent surface of the given dimensions.
    ///
    /// Returns `EffectError::InvalidDimensions` if either dimension is zero
    /// or if `width * height * 4` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, EffectError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Creates a surface filled with `color`.
    pub fn filled(width: usize, height: usize, color: Rgba) -> Result<Self, EffectError> {
        let mut surface = Self::new(width, height)?;
        surface.fill(color);
        Ok(surface)
    }

    /// Builds a surface from a raw RGBA8 buffer (length must be `w * h * 4`).
    pub fn from_rgba8(width: usize, height: usize, data: Vec<u8>) -> Result<Self, EffectError> {
        let len = checked_len(width, height)?;
        if data.len() != len {
            return Err(EffectError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the raw row-major RGBA8 data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the raw row-major RGBA8 data.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, EffectError> {
        if x >= self.width || y >= self.height {
            return Err(EffectError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y * self.width + x) * 4)
    }

    /// Reads the pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Result<Rgba, EffectError> {
        let i = self.index(x, y)?;
        Ok(Rgba::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }

    /// Overwrites the pixel at `(x, y)` (no blending).
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) -> Result<(), EffectError> {
        let i = self.index(x, y)?;
        self.data[i] = color.r;
        self.data[i + 1] = color.g;
        self.data[i + 2] = color.b;
        self.data[i + 3] = color.a;
        Ok(())
    }

    /// Alpha channel at `(x, y)` as a fraction in [0, 1].
    pub fn alpha_at(&self, x: usize, y: usize) -> Result<f64, EffectError> {
        let i = self.index(x, y)?;
        Ok(f64::from(self.data[i + 3]) / 255.0)
    }

    /// Fills the whole surface with `color` (no blending).
    pub fn fill(&mut self, color: Rgba) {
        for px in self.data.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = color.a;
        }
    }

    /// Clears the surface to fully transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Source-over blends `color` onto the pixel at `(x, y)`.
    ///
    /// Out-of-bounds coordinates are silently skipped: shape fills clip at
    /// the surface edge rather than erroring mid-primitive.
    pub fn blend_pixel(&mut self, x: isize, y: isize, color: Rgba) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y * self.width + x) * 4;
        let dst = Rgba::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        );
        let out = color.over(dst);
        self.data[i] = out.r;
        self.data[i + 1] = out.g;
        self.data[i + 2] = out.b;
        self.data[i + 3] = out.a;
    }

    /// Source-over blends a filled disc centered at `(cx, cy)`.
    ///
    /// The disc clips at surface edges. A non-positive radius draws nothing.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        let x_min = (cx - radius).floor() as isize;
        let x_max = (cx + radius).ceil() as isize;
        let y_min = (cy - radius).floor() as isize;
        let y_max = (cy + radius).ceil() as isize;
        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Source-over blends an axis-aligned filled rectangle.
    ///
    /// The rectangle clips at surface edges.
    pub fn fill_rect(&mut self, x0: isize, y0: isize, w: usize, h: usize, color: Rgba) {
        for y in y0..y0 + h as isize {
            for x in x0..x0 + w as isize {
                self.blend_pixel(x, y, color);
            }
        }
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize, EffectError> {
    if width == 0 || height == 0 {
        return Err(EffectError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .ok_or(EffectError::InvalidDimensions)
}
