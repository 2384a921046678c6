//! The core `Effect` trait that every glint rendering engine implements.
//!
//! The trait is object-safe so effects can be used as `dyn Effect` for
//! runtime switching between visual effects.

use crate::error::EffectError;
use crate::input::{InputEvent, Phase};
use crate::surface::Surface;
use serde_json::Value;

/// Core trait for per-frame visual effects.
///
/// Each effect owns one [`Surface`] exclusively and repaints it on every
/// [`step`](Effect::step). Input arrives through
/// [`handle_event`](Effect::handle_event); the host drives the loop while
/// [`phase`](Effect::phase) reports [`Phase::Running`].
///
/// This trait is **object-safe**: you can use `Box<dyn Effect>` or
/// `&dyn Effect` for runtime polymorphism.
pub trait Effect {
    /// Advance the effect by `dt` seconds of real time and repaint.
    ///
    /// All time-based motion integrates elapsed real time, never a frame
    /// count, so variable frame cadence does not change trajectories.
    fn step(&mut self, dt: f64) -> Result<(), EffectError>;

    /// The effect's current frame.
    fn surface(&self) -> &Surface;

    /// Feed a host event (pointer, resize, visibility) to the effect.
    ///
    /// The default implementation ignores every event.
    fn handle_event(&mut self, event: &InputEvent) {
        let _ = event;
    }

    /// Current loop phase. Defaults to always [`Phase::Running`].
    ///
    /// Effects that suspend themselves (no next frame wanted) override this.
    fn phase(&self) -> Phase {
        Phase::Running
    }

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and
    /// defaults.
    fn param_schema(&self) -> Value;
}
