#![deny(unsafe_code)]
//! Effect registry: maps effect names to implementations and provides
//! CPU-side snapshot export.
//!
//! This crate sits between `glint-core` (which defines the `Effect` trait)
//! and the individual effect crates (`glint-particle-field`, etc.). The CLI
//! and any embedding depend on this crate to avoid duplicating dispatch
//! logic.

pub mod composite;

#[cfg(feature = "png")]
pub mod snapshot;

use glint_core::error::EffectError;
use glint_core::input::{InputEvent, Phase};
use glint_core::surface::Surface;
use glint_core::Effect;
use serde_json::Value;

/// All available effect names.
const EFFECT_NAMES: &[&str] = &["particle-field", "spotlight", "magic-text"];

/// Enumeration of all available visual effects.
///
/// Wraps each effect implementation and delegates `Effect` trait methods.
/// Use [`EffectKind::from_name`] for string-based construction.
pub enum EffectKind {
    /// Ambient drifting particles with pointer repulsion.
    ParticleField(glint_particle_field::ParticleField),
    /// Pointer-erased two-layer image reveal.
    Spotlight(glint_spotlight::SpotlightReveal),
    /// Text dissolved into particles that reassemble on reveal.
    MagicText(glint_magic_text::MagicTextReveal),
}

impl EffectKind {
    /// Constructs an effect by name.
    ///
    /// Returns `EffectError::UnknownEffect` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EffectError> {
        match name {
            "particle-field" => Ok(EffectKind::ParticleField(
                glint_particle_field::ParticleField::from_json(width, height, seed, params)?,
            )),
            "spotlight" => Ok(EffectKind::Spotlight(
                glint_spotlight::SpotlightReveal::from_json(width, height, params)?,
            )),
            "magic-text" => Ok(EffectKind::MagicText(
                glint_magic_text::MagicTextReveal::from_json(width, height, seed, params)?,
            )),
            _ => Err(EffectError::UnknownEffect(name.to_string())),
        }
    }

    /// Returns a slice of all recognized effect names.
    pub fn list_effects() -> &'static [&'static str] {
        EFFECT_NAMES
    }
}

impl Effect for EffectKind {
    fn step(&mut self, dt: f64) -> Result<(), EffectError> {
        match self {
            EffectKind::ParticleField(e) => e.step(dt),
            EffectKind::Spotlight(e) => e.step(dt),
            EffectKind::MagicText(e) => e.step(dt),
        }
    }

    fn surface(&self) -> &Surface {
        match self {
            EffectKind::ParticleField(e) => e.surface(),
            EffectKind::Spotlight(e) => e.surface(),
            EffectKind::MagicText(e) => e.surface(),
        }
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match self {
            EffectKind::ParticleField(e) => e.handle_event(event),
            EffectKind::Spotlight(e) => e.handle_event(event),
            EffectKind::MagicText(e) => e.handle_event(event),
        }
    }

    fn phase(&self) -> Phase {
        match self {
            EffectKind::ParticleField(e) => e.phase(),
            EffectKind::Spotlight(e) => e.phase(),
            EffectKind::MagicText(e) => e.phase(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EffectKind::ParticleField(e) => e.params(),
            EffectKind::Spotlight(e) => e.params(),
            EffectKind::MagicText(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EffectKind::ParticleField(e) => e.param_schema(),
            EffectKind::Spotlight(e) => e.param_schema(),
            EffectKind::MagicText(e) => e.param_schema(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn from_name_constructs_every_listed_effect() {
        for name in EffectKind::list_effects() {
            let effect = EffectKind::from_name(name, 32, 32, 42, &json!({}));
            assert!(effect.is_ok(), "failed to construct {name}");
        }
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = EffectKind::from_name("nonexistent", 32, 32, 42, &json!({}));
        assert!(matches!(result, Err(EffectError::UnknownEffect(_))));
    }

    #[test]
    fn list_effects_is_complete() {
        let names = EffectKind::list_effects();
        assert!(names.contains(&"particle-field"));
        assert!(names.contains(&"spotlight"));
        assert!(names.contains(&"magic-text"));
    }

    #[test]
    fn trait_delegation_step_and_surface() {
        let mut effect =
            EffectKind::from_name("particle-field", 16, 16, 42, &json!({})).unwrap();
        assert_eq!(effect.surface().width(), 16);
        assert_eq!(effect.surface().height(), 16);
        effect.step(DT).unwrap();
    }

    #[test]
    fn trait_delegation_params_and_schema() {
        let effect = EffectKind::from_name("particle-field", 16, 16, 42, &json!({})).unwrap();
        assert!(effect.params().get("count").is_some());
        assert!(effect.param_schema().get("count").is_some());
    }

    #[test]
    fn trait_delegation_phase() {
        let idle = EffectKind::from_name("spotlight", 16, 16, 42, &json!({})).unwrap();
        assert_eq!(idle.phase(), Phase::Idle);
        let running = EffectKind::from_name("particle-field", 16, 16, 42, &json!({})).unwrap();
        assert_eq!(running.phase(), Phase::Running);
    }

    #[test]
    fn trait_delegation_events() {
        let mut effect = EffectKind::from_name("spotlight", 32, 32, 42, &json!({})).unwrap();
        effect.handle_event(&InputEvent::PointerMove { x: 16.0, y: 16.0 });
        assert_eq!(effect.phase(), Phase::Running);
    }

    #[test]
    fn determinism_same_seed() {
        let mut a = EffectKind::from_name("particle-field", 32, 32, 99, &json!({})).unwrap();
        let mut b = EffectKind::from_name("particle-field", 32, 32, 99, &json!({})).unwrap();
        for _ in 0..10 {
            a.step(DT).unwrap();
            b.step(DT).unwrap();
        }
        assert_eq!(a.surface().data(), b.surface().data());
    }

    #[test]
    fn boxed_dyn_effect_dispatch() {
        let mut effects: Vec<Box<dyn Effect>> = EffectKind::list_effects()
            .iter()
            .map(|name| {
                Box::new(EffectKind::from_name(name, 16, 16, 42, &json!({})).unwrap())
                    as Box<dyn Effect>
            })
            .collect();
        for effect in &mut effects {
            effect.step(DT).unwrap();
            assert_eq!(effect.surface().width(), 16);
        }
    }
}
