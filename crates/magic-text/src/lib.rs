#![deny(unsafe_code)]
//! Text that dissolves into particles and reassembles on demand.
//!
//! The string is rasterized once (see [`raster`], behind the `fontkit`
//! feature), sampled on a grid (see [`sample`]), and each inked cell becomes
//! a particle whose immutable origin is the cell position. Idle particles
//! hover around their origins with per-particle sine drift and asynchronous
//! opacity sparkle; when a reveal is triggered they ease home and fade out,
//! and [`MagicTextReveal::show_text`] flips so the host can swap in the
//! crisp text overlay.
//!
//! Reveal triggers are hover and visibility: a `Visibility` ratio at or
//! above the scroll threshold starts a fixed half-second countdown before
//! the reveal fires.

#[cfg(feature = "fontkit")]
pub mod raster;
pub mod sample;

use glam::DVec2;
use glint_core::drift::SineDrift;
use glint_core::error::EffectError;
use glint_core::input::{InputEvent, Phase};
use glint_core::params::{
    param_bool, param_color, param_f64, param_string, param_usize,
};
use glint_core::surface::Surface;
use glint_core::{DriftSource, Effect, Rgba, Xorshift64};
use sample::{sample_points, GlyphBitmap};
use serde_json::{json, Value};

const DEFAULT_FONT_SIZE: f64 = 48.0;
const DEFAULT_FONT_FAMILY: &str = "sans-serif";
const DEFAULT_FONT_WEIGHT: u16 = 400;
const DEFAULT_COLOR: Rgba = Rgba::WHITE;
const DEFAULT_SPREAD: f64 = 60.0;
const DEFAULT_SPEED: f64 = 1.0;
const DEFAULT_DENSITY: u32 = 3;
const DEFAULT_PIXEL_RATIO: f64 = 1.0;
const DEFAULT_SCROLL_THRESHOLD: f64 = 0.3;

/// Initial scatter distance cap, fraction of the bitmap span.
const SCATTER_FRACTION: f64 = 0.1;
/// Seconds between crossing the visibility threshold and revealing.
const REVEAL_DELAY: f64 = 0.5;
/// Ease rate toward the origin while revealed, per second.
const RETURN_RATE: f64 = 4.0;
/// Opacity decay rate while revealed, per second.
const FADE_RATE: f64 = 3.0;
/// Ease rate toward the drift target while idle, per second.
const IDLE_EASE: f64 = 3.0;
/// Extra pull toward the origin when the idle offset exceeds `spread`.
const PULLBACK_RATE: f64 = 1.5;
/// Opacity ease rate toward the sparkle target, per second.
const SPARKLE_RATE: f64 = 2.0;
/// Distance to the sparkle target below which it re-rolls.
const SPARKLE_EPSILON: f64 = 0.05;
/// Idle opacity targets stay in this band, so nothing sits at zero.
const SPARKLE_MIN: f64 = 0.2;
const SPARKLE_MAX: f64 = 1.0;
/// Idle positional jitter magnitude, px.
const JITTER: f64 = 0.35;
/// Sine drift amplitude, fraction of `spread`.
const DRIFT_SHARE: f64 = 0.5;

/// Configuration for a [`MagicTextReveal`].
#[derive(Debug, Clone)]
pub struct MagicTextParams {
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: u16,
    pub color: Rgba,
    /// Maximum idle hover distance from the origin, px.
    pub spread: f64,
    /// Global animation speed multiplier.
    pub speed: f64,
    /// Particle density, 1–5. Higher means more particles.
    pub density: u32,
    /// Device pixel ratio for rasterization and particle size.
    pub pixel_ratio: f64,
    /// When false, the first reveal locks permanently.
    pub reset_on_leave: bool,
    /// Visibility ratio that arms the scroll reveal.
    pub scroll_threshold: f64,
}

impl Default for MagicTextParams {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_weight: DEFAULT_FONT_WEIGHT,
            color: DEFAULT_COLOR,
            spread: DEFAULT_SPREAD,
            speed: DEFAULT_SPEED,
            density: DEFAULT_DENSITY,
            pixel_ratio: DEFAULT_PIXEL_RATIO,
            reset_on_leave: true,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
        }
    }
}

impl MagicTextParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            text: param_string(params, "text", &d.text),
            font_size: param_f64(params, "font_size", d.font_size),
            font_family: param_string(params, "font_family", &d.font_family),
            font_weight: param_usize(params, "font_weight", d.font_weight as usize) as u16,
            color: param_color(params, "color", d.color),
            spread: param_f64(params, "spread", d.spread),
            speed: param_f64(params, "speed", d.speed),
            density: param_usize(params, "density", d.density as usize) as u32,
            pixel_ratio: param_f64(params, "pixel_ratio", d.pixel_ratio),
            reset_on_leave: param_bool(params, "reset_on_leave", d.reset_on_leave),
            scroll_threshold: param_f64(params, "scroll_threshold", d.scroll_threshold),
        }
    }
}

/// One glyph particle. The origin never moves; everything else animates.
#[derive(Debug, Clone)]
struct TextParticle {
    origin: DVec2,
    pos: DVec2,
    color: Rgba,
    opacity: f64,
    opacity_target: f64,
    drift: SineDrift,
    /// Time offset desynchronizing this particle's drift from its peers.
    drift_offset: f64,
}

/// The text-to-particles effect.
pub struct MagicTextReveal {
    surface: Surface,
    bitmap: GlyphBitmap,
    particles: Vec<TextParticle>,
    params: MagicTextParams,
    rng: Xorshift64,
    t: f64,
    hover: bool,
    scroll_triggered: bool,
    /// Pending scroll reveal, fires at this animation time.
    reveal_at: Option<f64>,
    /// Set once a reveal happens with `reset_on_leave = false`.
    locked: bool,
}

impl MagicTextReveal {
    /// Creates the effect, rasterizing the configured text.
    ///
    /// Without the `fontkit` feature (or with no fonts installed) the
    /// bitmap comes out empty and the surface stays blank.
    pub fn new(
        width: usize,
        height: usize,
        seed: u64,
        params: MagicTextParams,
    ) -> Result<Self, EffectError> {
        let bitmap = Self::rasterize(&params)?;
        Self::with_bitmap(width, height, seed, bitmap, params)
    }

    /// Creates the effect from a pre-rasterized bitmap.
    ///
    /// This is the embedding seam: hosts that rasterize text themselves
    /// (or tests that need font-free determinism) inject the bitmap here.
    pub fn with_bitmap(
        width: usize,
        height: usize,
        seed: u64,
        bitmap: GlyphBitmap,
        params: MagicTextParams,
    ) -> Result<Self, EffectError> {
        let surface = Surface::new(width, height)?;
        let mut effect = Self {
            surface,
            bitmap,
            particles: Vec::new(),
            params,
            rng: Xorshift64::new(seed),
            t: 0.0,
            hover: false,
            scroll_triggered: false,
            reveal_at: None,
            locked: false,
        };
        effect.regenerate();
        effect.render();
        Ok(effect)
    }

    /// Creates the effect from a JSON params object.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, EffectError> {
        Self::new(width, height, seed, MagicTextParams::from_json(json_params))
    }

    #[cfg(feature = "fontkit")]
    fn rasterize(params: &MagicTextParams) -> Result<GlyphBitmap, EffectError> {
        raster::rasterize(
            &params.text,
            &raster::TextStyle {
                family: params.font_family.clone(),
                weight: params.font_weight,
                size: params.font_size,
                color: params.color,
            },
            params.pixel_ratio,
        )
    }

    #[cfg(not(feature = "fontkit"))]
    fn rasterize(_params: &MagicTextParams) -> Result<GlyphBitmap, EffectError> {
        Ok(GlyphBitmap::empty())
    }

    /// True while a reveal is active; the host shows the crisp text overlay
    /// instead of (or over) the fading particles.
    pub fn show_text(&self) -> bool {
        self.revealed()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    fn revealed(&self) -> bool {
        self.locked || self.hover || self.scroll_triggered
    }

    /// Rebuilds the particle set from the bitmap. Origins are the grid
    /// cells, centered on the surface; initial positions scatter from the
    /// origin by a random angle and up to 10% of the bitmap span.
    fn regenerate(&mut self) {
        let points = sample_points(&self.bitmap, self.params.density, self.params.pixel_ratio);
        let offset = DVec2::new(
            (self.surface.width() as f64 - self.bitmap.width() as f64) / 2.0,
            (self.surface.height() as f64 - self.bitmap.height() as f64) / 2.0,
        );
        let max_scatter = self.bitmap.span() * SCATTER_FRACTION;
        let amplitude = self.params.spread * DRIFT_SHARE;

        self.particles.clear();
        self.particles.reserve(points.len());
        for p in points {
            let origin = DVec2::new(p.x, p.y) + offset;
            let angle = self.rng.next_angle();
            let distance = self.rng.next_range(0.0, max_scatter.max(f64::EPSILON));
            let pos = origin + DVec2::new(angle.cos(), angle.sin()) * distance;
            let drift = SineDrift::seeded(&mut self.rng, amplitude);
            let drift_offset = self.rng.next_range(0.0, 100.0);
            let opacity_target = self.rng.next_range(SPARKLE_MIN, SPARKLE_MAX);
            self.particles.push(TextParticle {
                origin,
                pos,
                color: p.color,
                opacity: opacity_target,
                opacity_target,
                drift,
                drift_offset,
            });
        }
    }

    fn advance(&mut self, dt: f64) {
        let sdt = dt * self.params.speed.max(0.0);
        self.t += sdt;

        if let Some(deadline) = self.reveal_at {
            if self.t >= deadline {
                self.scroll_triggered = true;
                self.reveal_at = None;
            }
        }
        if self.revealed() && !self.params.reset_on_leave {
            self.locked = true;
        }

        let revealed = self.revealed();
        let spread = self.params.spread.max(0.0);
        for particle in &mut self.particles {
            if revealed {
                // Ease home; the step is proportional to remaining distance.
                let pull = (RETURN_RATE * sdt).min(1.0);
                particle.pos += (particle.origin - particle.pos) * pull;
                particle.opacity += (0.0 - particle.opacity) * (FADE_RATE * sdt).min(1.0);
            } else {
                let target = particle.origin
                    + particle.drift.sample(self.t + particle.drift_offset);
                particle.pos += (target - particle.pos) * (IDLE_EASE * sdt).min(1.0);
                particle.pos += DVec2::new(
                    self.rng.next_signed(JITTER),
                    self.rng.next_signed(JITTER),
                );
                let offset = particle.pos - particle.origin;
                if offset.length() > spread {
                    particle.pos +=
                        (particle.origin - particle.pos) * (PULLBACK_RATE * sdt).min(1.0);
                }

                particle.opacity += (particle.opacity_target - particle.opacity)
                    * (SPARKLE_RATE * sdt).min(1.0);
                if (particle.opacity_target - particle.opacity).abs() < SPARKLE_EPSILON {
                    particle.opacity_target = self.rng.next_range(SPARKLE_MIN, SPARKLE_MAX);
                }
            }
            particle.opacity = particle.opacity.clamp(0.0, 1.0);
        }
    }

    /// Draws particles as pixel-ratio-sized squares, batched by quantized
    /// color so equal-colored particles share one fill color.
    fn render(&mut self) {
        self.surface.clear();
        let size = (self.params.pixel_ratio.round() as usize).max(1);
        let half = size as f64 / 2.0;

        let mut groups: std::collections::BTreeMap<[u8; 4], Vec<DVec2>> =
            std::collections::BTreeMap::new();
        for particle in &self.particles {
            let color = particle.color.scale_alpha(particle.opacity);
            if color.a == 0 {
                continue;
            }
            groups
                .entry([color.r, color.g, color.b, color.a])
                .or_default()
                .push(particle.pos);
        }
        for (key, positions) in groups {
            let color = Rgba::new(key[0], key[1], key[2], key[3]);
            for pos in positions {
                self.surface.fill_rect(
                    (pos.x - half).round() as isize,
                    (pos.y - half).round() as isize,
                    size,
                    size,
                    color,
                );
            }
        }
    }
}

impl Effect for MagicTextReveal {
    fn step(&mut self, dt: f64) -> Result<(), EffectError> {
        self.advance(dt);
        self.render();
        Ok(())
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerEnter => {
                self.hover = true;
            }
            InputEvent::PointerLeave => {
                self.hover = false;
            }
            InputEvent::Visibility { ratio } => {
                if ratio >= self.params.scroll_threshold {
                    if !self.scroll_triggered && self.reveal_at.is_none() {
                        self.reveal_at = Some(self.t + REVEAL_DELAY);
                    }
                } else {
                    self.reveal_at = None;
                    if self.params.reset_on_leave {
                        self.scroll_triggered = false;
                    }
                }
            }
            InputEvent::Resize { width, height } => {
                if let Ok(surface) = Surface::new(width, height) {
                    self.surface = surface;
                    self.regenerate();
                    self.render();
                }
            }
            _ => {}
        }
    }

    fn phase(&self) -> Phase {
        Phase::Running
    }

    fn params(&self) -> Value {
        json!({
            "text": self.params.text,
            "font_size": self.params.font_size,
            "font_family": self.params.font_family,
            "font_weight": self.params.font_weight,
            "color": self.params.color.to_hex(),
            "spread": self.params.spread,
            "speed": self.params.speed,
            "density": self.params.density,
            "pixel_ratio": self.params.pixel_ratio,
            "reset_on_leave": self.params.reset_on_leave,
            "scroll_threshold": self.params.scroll_threshold,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "text": {
                "type": "string",
                "default": "",
                "description": "The string to rasterize and dissolve"
            },
            "font_size": {
                "type": "number",
                "default": DEFAULT_FONT_SIZE,
                "min": 1.0,
                "max": 400.0,
                "description": "Font size in CSS pixels"
            },
            "font_family": {
                "type": "string",
                "default": DEFAULT_FONT_FAMILY,
                "description": "Font family name or generic keyword"
            },
            "font_weight": {
                "type": "integer",
                "default": DEFAULT_FONT_WEIGHT,
                "min": 100,
                "max": 900,
                "description": "Font weight"
            },
            "color": {
                "type": "color",
                "default": DEFAULT_COLOR.to_hex(),
                "description": "Text and particle color"
            },
            "spread": {
                "type": "number",
                "default": DEFAULT_SPREAD,
                "min": 0.0,
                "max": 500.0,
                "description": "Maximum idle hover distance from the origin"
            },
            "speed": {
                "type": "number",
                "default": DEFAULT_SPEED,
                "min": 0.0,
                "max": 10.0,
                "description": "Animation speed multiplier"
            },
            "density": {
                "type": "integer",
                "default": DEFAULT_DENSITY,
                "min": 1,
                "max": 5,
                "description": "Particle density; higher means more particles"
            },
            "pixel_ratio": {
                "type": "number",
                "default": DEFAULT_PIXEL_RATIO,
                "min": 0.5,
                "max": 4.0,
                "description": "Device pixel ratio"
            },
            "reset_on_leave": {
                "type": "boolean",
                "default": true,
                "description": "Whether ending a reveal returns to the idle state"
            },
            "scroll_threshold": {
                "type": "number",
                "default": DEFAULT_SCROLL_THRESHOLD,
                "min": 0.0,
                "max": 1.0,
                "description": "Visibility ratio that arms the scroll reveal"
            }
        })
    }
}
