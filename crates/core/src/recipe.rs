//! Reproducible specification for an effect run.
//!
//! A [`Recipe`] captures everything needed to recreate a frame: effect name,
//! surface dimensions, parameters, PRNG seed, and step count.

use crate::error::EffectError;
use serde::{Deserialize, Serialize};

/// Reproducible specification for an effect run.
///
/// Two identical `Recipe` values fed to the same binary produce bit-identical
/// surfaces (event scripts aside — those are the host's to replay).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub effect: String,
    pub width: usize,
    pub height: usize,
    pub params: serde_json::Value,
    pub seed: u64,
    pub steps: usize,
}

impl Recipe {
    /// Creates a new Recipe with default params (`{}`) and steps (`0`).
    pub fn new(effect: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            effect: effect.to_string(),
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            steps: 0,
        }
    }

    /// Validates that the recipe has non-zero dimensions and that
    /// `width * height` does not overflow.
    pub fn validate(&self) -> Result<(), EffectError> {
        if self.width == 0 || self.height == 0 {
            return Err(EffectError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(EffectError::InvalidDimensions)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_recipe_with_default_params_and_steps() {
        let r = Recipe::new("particle-field", 640, 480, 42);
        assert_eq!(r.effect, "particle-field");
        assert_eq!(r.width, 640);
        assert_eq!(r.height, 480);
        assert_eq!(r.seed, 42);
        assert_eq!(r.steps, 0);
        assert_eq!(r.params, serde_json::json!({}));
    }

    #[test]
    fn json_round_trip_with_custom_params() {
        let mut r = Recipe::new("magic-text", 800, 200, 99);
        r.params = serde_json::json!({
            "text": "hello",
            "density": 4,
            "spread": 80.0
        });
        r.steps = 300;

        let json = serde_json::to_string_pretty(&r).unwrap();
        let restored: Recipe = serde_json::from_str(&json).unwrap();
        assert_eq!(r, restored);
    }

    #[test]
    fn json_contains_expected_keys() {
        let r = Recipe::new("spotlight", 128, 128, 1);
        let v: serde_json::Value = serde_json::to_value(&r).unwrap();
        for key in ["effect", "width", "height", "params", "seed", "steps"] {
            assert!(v.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn validate_succeeds_for_valid_recipe() {
        assert!(Recipe::new("particle-field", 512, 512, 42).validate().is_ok());
    }

    #[test]
    fn validate_fails_for_zero_dimension() {
        assert!(Recipe::new("particle-field", 0, 512, 42).validate().is_err());
        assert!(Recipe::new("particle-field", 512, 0, 42).validate().is_err());
    }

    #[test]
    fn validate_fails_for_overflow() {
        let r = Recipe::new("particle-field", usize::MAX, 2, 42);
        assert!(r.validate().is_err());
    }
}
