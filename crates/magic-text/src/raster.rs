//! Glyph rasterization via cosmic-text.
//!
//! Compiled only with the `fontkit` feature. Shapes a single string with the
//! system font database and draws it into a [`GlyphBitmap`] at device-pixel
//! scale. Hosts with no installed fonts get an empty bitmap back, which the
//! engine treats as "no particles".

use crate::sample::GlyphBitmap;
use cosmic_text::{Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache, Weight};
use glint_core::error::EffectError;
use glint_core::Rgba;

/// Line height as a multiple of font size.
const LINE_HEIGHT_FACTOR: f32 = 1.2;
/// Padding around the measured text, bitmap pixels per side.
const PADDING: usize = 2;

/// Typography inputs for rasterization.
#[derive(Debug, Clone)]
pub struct TextStyle {
    pub family: String,
    pub weight: u16,
    pub size: f64,
    pub color: Rgba,
}

/// Rasterizes `text` into an RGBA bitmap scaled by `pixel_ratio`.
///
/// Whitespace-only input, zero-sized output, or an unpopulated font database
/// all yield `GlyphBitmap::empty()`.
pub fn rasterize(
    text: &str,
    style: &TextStyle,
    pixel_ratio: f64,
) -> Result<GlyphBitmap, EffectError> {
    if text.trim().is_empty() || style.size <= 0.0 || pixel_ratio <= 0.0 {
        return Ok(GlyphBitmap::empty());
    }

    let mut font_system = FontSystem::new();
    let mut cache = SwashCache::new();

    let font_size = (style.size * pixel_ratio) as f32;
    let line_height = font_size * LINE_HEIGHT_FACTOR;
    let mut buffer = Buffer::new(&mut font_system, Metrics::new(font_size, line_height));
    buffer.set_size(&mut font_system, None, None);

    let attrs = Attrs::new()
        .family(family_for(&style.family))
        .weight(Weight(style.weight));
    buffer.set_text(&mut font_system, text, attrs, Shaping::Advanced);
    buffer.shape_until_scroll(&mut font_system, false);

    // Measure the laid-out runs before allocating the bitmap.
    let mut max_w = 0.0_f32;
    let mut lines = 0_usize;
    for run in buffer.layout_runs() {
        max_w = max_w.max(run.line_w);
        lines += 1;
    }
    if lines == 0 || max_w <= 0.0 {
        return Ok(GlyphBitmap::empty());
    }
    let width = max_w.ceil() as usize + PADDING * 2;
    let height = (line_height * lines as f32).ceil() as usize + PADDING * 2;

    let mut bitmap = GlyphBitmap::from_rgba8(width, height, vec![0; width * height * 4])
        .ok_or_else(|| EffectError::TextRaster("bitmap allocation overflow".into()))?;

    let base = Color::rgba(style.color.r, style.color.g, style.color.b, style.color.a);
    buffer.draw(&mut font_system, &mut cache, base, |x, y, w, h, color| {
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                put(&mut bitmap, x + dx + PADDING as i32, y + dy + PADDING as i32, color);
            }
        }
    });

    Ok(bitmap)
}

fn family_for(name: &str) -> Family<'_> {
    match name {
        "sans-serif" => Family::SansSerif,
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        other => Family::Name(other),
    }
}

/// Writes one draw-callback texel, keeping the higher alpha on overlap.
fn put(bitmap: &mut GlyphBitmap, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= bitmap.width() || y >= bitmap.height() {
        return;
    }
    let i = (y * bitmap.width() + x) * 4;
    let data = bitmap.data_mut();
    if color.a() >= data[i + 3] {
        data[i] = color.r();
        data[i + 1] = color.g();
        data[i + 2] = color.b();
        data[i + 3] = color.a();
    }
}
