#![deny(unsafe_code)]
//! Core types and traits for the glint visual-effects system.
//!
//! Provides the `Effect` trait, the `Surface` RGBA raster, the `Rgba` color
//! type, the `InputEvent`/`Phase` input model, the `DriftSource` motion
//! sampling seam, the `Xorshift64` PRNG, parameter helpers, and `Recipe`.

pub mod color;
pub mod drift;
pub mod engine;
pub mod error;
pub mod input;
pub mod params;
pub mod prng;
pub mod recipe;
pub mod surface;

pub use color::Rgba;
pub use drift::{DriftSource, SineDrift};
pub use engine::Effect;
pub use error::EffectError;
pub use input::{InputEvent, MotionPreference, Phase};
pub use prng::Xorshift64;
pub use recipe::Recipe;
pub use surface::Surface;
