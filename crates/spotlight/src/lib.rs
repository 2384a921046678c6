#![deny(unsafe_code)]
//! Pointer-erased two-layer reveal with a self-healing front layer.
//!
//! Two image layers share one surface: a back layer that is always fully
//! opaque, and a front layer whose per-texel coverage lives in a separate
//! [`AlphaMask`]. Pointer movement punches soft circular holes in the mask
//! (revealing the back layer through them); while the effect is running the
//! mask heals a little every frame, and once the pointer has been gone for
//! the idle threshold the mask snaps fully opaque and the loop suspends.
//!
//! The engine is a deliberate no-op until a front layer is present: missing
//! or undecodable images leave the surface showing the background fill and
//! back layer only.

pub mod mask;

use glint_core::error::EffectError;
use glint_core::input::{InputEvent, Phase};
use glint_core::params::{param_color, param_f64, param_string};
use glint_core::surface::Surface;
use glint_core::{Effect, Rgba};
use mask::AlphaMask;
use serde_json::{json, Value};
use std::path::Path;

/// Default erase gradient radius, px.
const DEFAULT_REVEAL_RADIUS: f64 = 80.0;
/// Default background fill under both layers.
const DEFAULT_BACKGROUND: Rgba = Rgba::BLACK;
/// Front-layer restore rate per frame.
const HEAL_RATE: f64 = 0.035;
/// Seconds without pointer movement (after leave) before the idle snap.
const IDLE_SNAP_AFTER: f64 = 0.8;
/// Per-frame constants above assume this cadence.
const REFERENCE_FPS: f64 = 60.0;

/// Configuration for a [`SpotlightReveal`].
#[derive(Debug, Clone)]
pub struct SpotlightParams {
    /// Front (default visible) image path, if loading from disk.
    pub front_image: Option<String>,
    /// Back (revealed) image path, if loading from disk.
    pub back_image: Option<String>,
    /// Radius of the erase gradient in pixels.
    pub reveal_radius: f64,
    /// Opaque fill painted beneath both layers.
    pub background: Rgba,
}

impl Default for SpotlightParams {
    fn default() -> Self {
        Self {
            front_image: None,
            back_image: None,
            reveal_radius: DEFAULT_REVEAL_RADIUS,
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl SpotlightParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// Empty image path strings mean "no layer".
    pub fn from_json(params: &Value) -> Self {
        let defaults = Self::default();
        let path = |key: &str| {
            let s = param_string(params, key, "");
            (!s.is_empty()).then_some(s)
        };
        Self {
            front_image: path("front_image"),
            back_image: path("back_image"),
            reveal_radius: param_f64(params, "reveal_radius", defaults.reveal_radius),
            background: param_color(params, "background", defaults.background),
        }
    }
}

/// The spotlight-reveal effect.
///
/// `Idle` until the first pointer interaction, `Running` while animating or
/// healing, `Idle` again after the idle snap.
pub struct SpotlightReveal {
    surface: Surface,
    mask: AlphaMask,
    front: Option<Surface>,
    back: Option<Surface>,
    front_fitted: Option<Surface>,
    back_fitted: Option<Surface>,
    params: SpotlightParams,
    phase: Phase,
    pointer: Option<(f64, f64)>,
    hovering: bool,
    idle_for: f64,
}

impl SpotlightReveal {
    /// Creates the effect with no layers loaded.
    ///
    /// Returns `EffectError::InvalidDimensions` if width or height is zero.
    pub fn new(
        width: usize,
        height: usize,
        params: SpotlightParams,
    ) -> Result<Self, EffectError> {
        let surface = Surface::new(width, height)?;
        let mask = AlphaMask::opaque(width, height)?;
        let mut reveal = Self {
            surface,
            mask,
            front: None,
            back: None,
            front_fitted: None,
            back_fitted: None,
            params,
            phase: Phase::Idle,
            pointer: None,
            hovering: false,
            idle_for: 0.0,
        };
        reveal.render();
        Ok(reveal)
    }

    /// Creates the effect from a JSON params object, loading any configured
    /// image layers from disk.
    pub fn from_json(
        width: usize,
        height: usize,
        json_params: &Value,
    ) -> Result<Self, EffectError> {
        let params = SpotlightParams::from_json(json_params);
        let front = params.front_image.clone();
        let back = params.back_image.clone();
        let mut reveal = Self::new(width, height, params)?;
        if let Some(path) = front {
            reveal.set_front_layer(load_layer(Path::new(&path))?);
        }
        if let Some(path) = back {
            reveal.set_back_layer(load_layer(Path::new(&path))?);
        }
        Ok(reveal)
    }

    /// Installs a decoded front layer (the testing and embedding seam).
    pub fn set_front_layer(&mut self, layer: Surface) {
        self.front_fitted = Some(cover_fit(
            &layer,
            self.surface.width(),
            self.surface.height(),
        ));
        self.front = Some(layer);
        self.render();
    }

    /// Installs a decoded back layer.
    pub fn set_back_layer(&mut self, layer: Surface) {
        self.back_fitted = Some(cover_fit(
            &layer,
            self.surface.width(),
            self.surface.height(),
        ));
        self.back = Some(layer);
        self.render();
    }

    /// Read-only access to the alpha mask.
    pub fn mask(&self) -> &AlphaMask {
        &self.mask
    }

    /// Rebuilds everything that depends on the container size.
    ///
    /// Resize always discards in-progress reveals: the mask comes back fully
    /// opaque and the loop returns to `Idle`.
    fn resize(&mut self, width: usize, height: usize) -> Result<(), EffectError> {
        self.surface = Surface::new(width, height)?;
        self.mask = AlphaMask::opaque(width, height)?;
        self.front_fitted = self.front.as_ref().map(|f| cover_fit(f, width, height));
        self.back_fitted = self.back.as_ref().map(|b| cover_fit(b, width, height));
        self.phase = Phase::Idle;
        self.pointer = None;
        self.hovering = false;
        self.idle_for = 0.0;
        self.render();
        Ok(())
    }

    /// Composites background, back layer, and mask-modulated front layer.
    fn render(&mut self) {
        self.surface.fill(self.params.background);
        if let Some(back) = &self.back_fitted {
            for y in 0..self.surface.height() {
                for x in 0..self.surface.width() {
                    if let Ok(px) = back.pixel(x, y) {
                        self.surface.blend_pixel(x as isize, y as isize, px);
                    }
                }
            }
        }
        if let Some(front) = &self.front_fitted {
            for y in 0..self.surface.height() {
                for x in 0..self.surface.width() {
                    if let Ok(px) = front.pixel(x, y) {
                        let coverage = f64::from(self.mask.value(x, y));
                        self.surface
                            .blend_pixel(x as isize, y as isize, px.scale_alpha(coverage));
                    }
                }
            }
        }
    }
}

impl Effect for SpotlightReveal {
    fn step(&mut self, dt: f64) -> Result<(), EffectError> {
        if self.phase == Phase::Idle {
            return Ok(());
        }

        if !self.hovering {
            self.idle_for += dt;
        }

        if !self.hovering && self.idle_for >= IDLE_SNAP_AFTER {
            // Idle snap: straight to fully-opaque front, loop suspends.
            self.mask.snap_opaque();
            self.phase = Phase::Idle;
            self.render();
            return Ok(());
        }

        // Heal a little, then re-punch under a hovering pointer so the hole
        // tracks the pointer instead of being painted over.
        let frames = dt * REFERENCE_FPS;
        let rate = 1.0 - (1.0 - HEAL_RATE).powf(frames);
        self.mask.heal(rate);
        if self.hovering {
            if let Some((x, y)) = self.pointer {
                self.mask.punch(x, y, self.params.reveal_radius);
            }
        }
        self.render();
        Ok(())
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { x, y } => {
                self.pointer = Some((x, y));
                self.hovering = true;
                self.idle_for = 0.0;
                self.phase = Phase::Running;
                self.mask.punch(x, y, self.params.reveal_radius);
            }
            InputEvent::PointerEnter => {
                self.hovering = true;
                self.idle_for = 0.0;
            }
            InputEvent::PointerLeave => {
                self.hovering = false;
                self.idle_for = 0.0;
            }
            InputEvent::Resize { width, height } => {
                // Zero-sized containers are ignored, matching the "context
                // unavailable" fallback.
                let _ = self.resize(width, height);
            }
            _ => {}
        }
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn params(&self) -> Value {
        json!({
            "front_image": self.params.front_image,
            "back_image": self.params.back_image,
            "reveal_radius": self.params.reveal_radius,
            "background": self.params.background.to_hex(),
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "front_image": {
                "type": "string",
                "default": "",
                "description": "Front (default visible) image path; empty for none"
            },
            "back_image": {
                "type": "string",
                "default": "",
                "description": "Back (revealed) image path; empty for none"
            },
            "reveal_radius": {
                "type": "number",
                "default": DEFAULT_REVEAL_RADIUS,
                "min": 1.0,
                "max": 500.0,
                "description": "Radius of the erase gradient in pixels"
            },
            "background": {
                "type": "color",
                "default": DEFAULT_BACKGROUND.to_hex(),
                "description": "Opaque fill painted beneath both layers"
            }
        })
    }
}

/// Decodes an image file into an RGBA surface.
fn load_layer(path: &Path) -> Result<Surface, EffectError> {
    let img = image::open(path)
        .map_err(|e| EffectError::ImageLoad(format!("{}: {e}", path.display())))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    Surface::from_rgba8(w as usize, h as usize, img.into_raw())
}

/// Cover-fit resampling: scale `src` to fill `dst`, crop overflow, center.
///
/// Nearest-neighbor sampling; replicates CSS `object-fit: cover` geometry.
pub fn cover_fit(src: &Surface, dst_w: usize, dst_h: usize) -> Surface {
    // dst dimensions come from an already-validated Surface.
    let mut dst = match Surface::new(dst_w, dst_h) {
        Ok(s) => s,
        Err(_) => return src.clone(),
    };
    let sw = src.width() as f64;
    let sh = src.height() as f64;
    let dw = dst_w as f64;
    let dh = dst_h as f64;
    let scale = (dw / sw).max(dh / sh);
    for y in 0..dst_h {
        for x in 0..dst_w {
            let sx = (x as f64 + 0.5 - dw / 2.0) / scale + sw / 2.0;
            let sy = (y as f64 + 0.5 - dh / 2.0) / scale + sh / 2.0;
            let sx = (sx.floor().max(0.0) as usize).min(src.width() - 1);
            let sy = (sy.floor().max(0.0) as usize).min(src.height() - 1);
            if let Ok(px) = src.pixel(sx, sy) {
                let _ = dst.set_pixel(x, y, px);
            }
        }
    }
    dst
}
