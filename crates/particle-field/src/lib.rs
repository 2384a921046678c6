#![deny(unsafe_code)]
//! Ambient floating-particle field with pointer repulsion.
//!
//! A batch of small glowing dots drifts across the surface according to a
//! direction mode (`up`, `down`, `random`) and is pushed away from the
//! pointer within a fixed radius. Particles wrap at the surface edges;
//! vertical wrapping is direction-aware so upward-drifting particles re-enter
//! from below and vice versa.
//!
//! The whole particle batch is regenerated wholesale on resize or parameter
//! change — particles are cheap, bookkeeping across resizes is not.

use glam::DVec2;
use glint_core::error::EffectError;
use glint_core::input::{InputEvent, Phase};
use glint_core::params::{param_bool, param_color, param_string, param_usize};
use glint_core::prng::Xorshift64;
use glint_core::surface::Surface;
use glint_core::{Effect, Rgba};
use serde_json::{json, Value};

/// Default particle population.
const DEFAULT_COUNT: usize = 50;
/// Default particle color (warm glow).
const DEFAULT_COLOR: Rgba = Rgba::opaque(0xff, 0xd2, 0x7f);
/// Population cap on constrained (low-power) viewports.
const CONSTRAINED_CAP: usize = 15;
/// Pointer repulsion radius in pixels.
const REPULSION_RADIUS: f64 = 100.0;
/// Peak repulsion impulse at zero distance, px/frame.
const REPULSION_STRENGTH: f64 = 0.5;
/// Velocity damping multiplier per frame.
const DAMPING: f64 = 0.99;
/// Continuous directional bias per frame, px/frame².
const DIRECTIONAL_BIAS: f64 = 0.01;
/// Symmetric per-axis jitter magnitude per frame.
const JITTER: f64 = 0.01;
/// Overshoot margin for vertical wrap, px.
const WRAP_MARGIN: f64 = 10.0;
/// Glow disc radius multiplier.
const GLOW_SCALE: f64 = 2.0;
/// Glow disc opacity multiplier.
const GLOW_OPACITY: f64 = 0.3;
/// Reference frame cadence: per-frame constants above assume 60 fps.
const REFERENCE_FPS: f64 = 60.0;

/// Drift direction mode, governing velocity bias and edge-wrap policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Random,
}

impl Direction {
    /// Parses a direction name, falling back to `Up` for unknown strings.
    pub fn from_name(name: &str) -> Self {
        match name {
            "down" => Direction::Down,
            "random" => Direction::Random,
            _ => Direction::Up,
        }
    }

    /// The canonical name used in params JSON.
    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Random => "random",
        }
    }
}

/// Configuration for a [`ParticleField`].
#[derive(Debug, Clone, Copy)]
pub struct ParticleFieldParams {
    /// Target particle population (capped on constrained viewports).
    pub count: usize,
    /// Fill color for particles and their glow.
    pub color: Rgba,
    /// Enable pointer-avoidance physics.
    pub repulsion: bool,
    /// Drift direction mode.
    pub direction: Direction,
    /// Low-power viewport: caps the population and disables repulsion
    /// (the touch-primary rule).
    pub constrained: bool,
}

impl Default for ParticleFieldParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            color: DEFAULT_COLOR,
            repulsion: true,
            direction: Direction::Up,
            constrained: false,
        }
    }
}

impl ParticleFieldParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let defaults = Self::default();
        Self {
            count: param_usize(params, "count", defaults.count),
            color: param_color(params, "color", defaults.color),
            repulsion: param_bool(params, "repulsion", defaults.repulsion),
            direction: Direction::from_name(&param_string(
                params,
                "direction",
                defaults.direction.name(),
            )),
            constrained: param_bool(params, "constrained", defaults.constrained),
        }
    }
}

/// One dot in the field.
#[derive(Debug, Clone, Copy)]
struct Particle {
    pos: DVec2,
    vel: DVec2,
    radius: f64,
    opacity: f64,
    /// Spawn-time y, kept for wrap bookkeeping and introspection.
    original_y: f64,
}

/// The particle-field effect.
///
/// Owns its surface and particle batch exclusively. Runs for the component's
/// whole mounted lifetime, so [`Effect::phase`] is always `Running`.
pub struct ParticleField {
    surface: Surface,
    particles: Vec<Particle>,
    params: ParticleFieldParams,
    rng: Xorshift64,
    pointer: Option<DVec2>,
}

impl ParticleField {
    /// Creates a field and generates the initial particle batch.
    ///
    /// Returns `EffectError::InvalidDimensions` if width or height is zero.
    pub fn new(
        width: usize,
        height: usize,
        seed: u64,
        params: ParticleFieldParams,
    ) -> Result<Self, EffectError> {
        let surface = Surface::new(width, height)?;
        let mut field = Self {
            surface,
            particles: Vec::new(),
            params,
            rng: Xorshift64::new(seed),
            pointer: None,
        };
        field.regenerate();
        Ok(field)
    }

    /// Creates a field from a JSON params object.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, EffectError> {
        Self::new(width, height, seed, ParticleFieldParams::from_json(json_params))
    }

    /// The population actually generated: `count`, capped on constrained
    /// viewports.
    pub fn effective_count(&self) -> usize {
        if self.params.constrained {
            self.params.count.min(CONSTRAINED_CAP)
        } else {
            self.params.count
        }
    }

    /// Replaces the whole particle batch (initialization and resize path).
    fn regenerate(&mut self) {
        let w = self.surface.width() as f64;
        let h = self.surface.height() as f64;
        let count = self.effective_count();
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let pos = DVec2::new(self.rng.next_range(0.0, w), self.rng.next_range(0.0, h));
            let vel = spawn_velocity(&mut self.rng, self.params.direction);
            self.particles.push(Particle {
                pos,
                vel,
                radius: self.rng.next_range(1.0, 3.0),
                opacity: self.rng.next_range(0.2, 0.7),
                original_y: pos.y,
            });
        }
    }

    fn repulsion_active(&self) -> bool {
        self.params.repulsion && !self.params.constrained && self.pointer.is_some()
    }

    fn integrate(&mut self, frames: f64) {
        let w = self.surface.width() as f64;
        let h = self.surface.height() as f64;
        let pointer = self.pointer;
        let repulse = self.repulsion_active();
        let direction = self.params.direction;

        for particle in &mut self.particles {
            if repulse {
                if let Some(p) = pointer {
                    let away = particle.pos - p;
                    let dist = away.length();
                    if dist < REPULSION_RADIUS && dist > f64::EPSILON {
                        let impulse = repulsion_impulse(dist);
                        particle.vel += away / dist * impulse * frames;
                    }
                }
            }

            particle.pos += particle.vel * frames;
            particle.vel *= DAMPING.powf(frames);

            match direction {
                Direction::Up => particle.vel.y -= DIRECTIONAL_BIAS * frames,
                Direction::Down => particle.vel.y += DIRECTIONAL_BIAS * frames,
                Direction::Random => {}
            }
            particle.vel.x += self.rng.next_signed(JITTER) * frames;
            particle.vel.y += self.rng.next_signed(JITTER) * frames;

            wrap_horizontal(particle, w);
            match direction {
                Direction::Up => {
                    if particle.pos.y < -WRAP_MARGIN {
                        particle.pos.y = h + WRAP_MARGIN;
                        particle.vel.y = -self.rng.next_range(0.25, 1.25);
                    }
                }
                Direction::Down => {
                    if particle.pos.y > h + WRAP_MARGIN {
                        particle.pos.y = -WRAP_MARGIN;
                        particle.vel.y = self.rng.next_range(0.25, 1.25);
                    }
                }
                Direction::Random => {
                    if particle.pos.y < 0.0 {
                        particle.pos.y += h;
                    } else if particle.pos.y > h {
                        particle.pos.y -= h;
                    }
                }
            }
        }
    }

    fn render(&mut self) {
        self.surface.clear();
        let color = self.params.color;
        for particle in &self.particles {
            // Larger low-opacity disc beneath the core disc fakes a soft glow.
            self.surface.fill_circle(
                particle.pos.x,
                particle.pos.y,
                particle.radius * GLOW_SCALE,
                color.scale_alpha(particle.opacity * GLOW_OPACITY),
            );
            self.surface.fill_circle(
                particle.pos.x,
                particle.pos.y,
                particle.radius,
                color.scale_alpha(particle.opacity),
            );
        }
    }
}

impl Effect for ParticleField {
    fn step(&mut self, dt: f64) -> Result<(), EffectError> {
        let frames = dt * REFERENCE_FPS;
        self.integrate(frames);
        self.render();
        Ok(())
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { x, y } => self.pointer = Some(DVec2::new(x, y)),
            InputEvent::PointerLeave => self.pointer = None,
            InputEvent::Resize { width, height } => {
                if let Ok(surface) = Surface::new(width, height) {
                    self.surface = surface;
                    self.regenerate();
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
            "count": self.params.count,
            "color": self.params.color.to_hex(),
            "repulsion": self.params.repulsion,
            "direction": self.params.direction.name(),
            "constrained": self.params.constrained,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "count": {
                "type": "integer",
                "default": DEFAULT_COUNT,
                "min": 0,
                "max": 500,
                "description": "Target particle population (capped on constrained viewports)"
            },
            "color": {
                "type": "color",
                "default": DEFAULT_COLOR.to_hex(),
                "description": "Fill color for particles and glow"
            },
            "repulsion": {
                "type": "boolean",
                "default": true,
                "description": "Enable pointer-avoidance physics"
            },
            "direction": {
                "type": "string",
                "default": "up",
                "values": ["up", "down", "random"],
                "description": "Drift direction, governs velocity bias and edge-wrap policy"
            },
            "constrained": {
                "type": "boolean",
                "default": false,
                "description": "Low-power viewport: caps population at 15 and disables repulsion"
            }
        })
    }
}

/// Initial velocity for a particle in the given direction mode.
///
/// `up`: small horizontal drift with an upward bias; `down`: mirrored;
/// `random`: symmetric small velocity in both axes.
fn spawn_velocity(rng: &mut Xorshift64, direction: Direction) -> DVec2 {
    match direction {
        Direction::Up => DVec2::new(rng.next_signed(0.25), -rng.next_range(0.25, 1.25)),
        Direction::Down => DVec2::new(rng.next_signed(0.25), rng.next_range(0.25, 1.25)),
        Direction::Random => DVec2::new(rng.next_signed(0.5), rng.next_signed(0.5)),
    }
}

/// Repulsion impulse magnitude at `distance` px from the pointer.
///
/// `(R - d) / R * strength` inside the radius, zero at and beyond it —
/// strictly decreasing in distance.
fn repulsion_impulse(distance: f64) -> f64 {
    if distance >= REPULSION_RADIUS {
        return 0.0;
    }
    (REPULSION_RADIUS - distance) / REPULSION_RADIUS * REPULSION_STRENGTH
}

/// Unconditional horizontal wrap at both edges.
fn wrap_horizontal(particle: &mut Particle, width: f64) {
    if particle.pos.x < 0.0 {
        particle.pos.x += width;
    } else if particle.pos.x > width {
        particle.pos.x -= width;
    }
}
