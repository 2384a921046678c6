//! Input events and loop phases shared by all effects.
//!
//! Effects never talk to a window system. The host layer translates its
//! native pointer/resize/visibility callbacks into [`InputEvent`] values and
//! forwards them through [`Effect::handle_event`](crate::Effect::handle_event).
//! Multi-touch is the host's problem: it forwards the first touch point as a
//! `PointerMove` and drops the rest.

use serde::{Deserialize, Serialize};

/// A host-side event forwarded to an effect.
///
/// Effects ignore events they do not consume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum InputEvent {
    /// The pointer (mouse, or first touch point) moved to surface-local
    /// coordinates in pixels.
    PointerMove { x: f64, y: f64 },
    /// The pointer entered the effect's surface.
    PointerEnter,
    /// The pointer left the effect's surface.
    PointerLeave,
    /// The host container was resized; effects rebuild their state wholesale.
    Resize { width: usize, height: usize },
    /// The visible fraction of the effect's container changed (scroll).
    Visibility { ratio: f64 },
}

/// Explicit state of an effect's frame loop.
///
/// A host schedules the next frame only while the effect reports `Running`.
/// This replaces an implicit "did we request another callback" convention
/// with a value that can be asserted in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No frame scheduled; the effect is waiting for input.
    Idle,
    /// The effect wants another frame.
    #[default]
    Running,
}

/// Environment-level animation preference.
///
/// Under `Reduced` a host does not start a frame loop at all: effects still
/// construct and render their initial frame, but never animate. This is the
/// accessibility short-circuit, not an error path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_defaults_to_running() {
        assert_eq!(Phase::default(), Phase::Running);
    }

    #[test]
    fn motion_preference_defaults_to_full() {
        assert_eq!(MotionPreference::default(), MotionPreference::Full);
    }

    #[test]
    fn input_event_serde_round_trip() {
        let events = [
            InputEvent::PointerMove { x: 1.5, y: -2.0 },
            InputEvent::PointerEnter,
            InputEvent::PointerLeave,
            InputEvent::Resize {
                width: 640,
                height: 480,
            },
            InputEvent::Visibility { ratio: 0.4 },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: InputEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    #[test]
    fn input_event_serializes_with_snake_case_tag() {
        let json = serde_json::to_string(&InputEvent::PointerMove { x: 3.0, y: 4.0 }).unwrap();
        assert!(json.contains("\"kind\":\"pointer_move\""), "got: {json}");
    }

    #[test]
    fn phase_serializes_as_snake_case() {
        assert_eq!(serde_json::to_string(&Phase::Idle).unwrap(), "\"idle\"");
        assert_eq!(
            serde_json::to_string(&Phase::Running).unwrap(),
            "\"running\""
        );
    }
}
