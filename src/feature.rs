//! Physical feature identifiers and sample value types.
//!
//! A feature is one capability a controller may report each frame (a button,
//! a touch sensor, an analog trigger, a 2D stick). Reads return `Option<T>`:
//! `None` means the device could not supply that feature this frame, which is
//! not the same thing as `false` or `0.0`.

use serde::{Deserialize, Serialize};

/// Boolean features (buttons and touch sensors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoolFeature {
    PrimaryButton,
    PrimaryTouch,
    SecondaryButton,
    SecondaryTouch,
    TriggerButton,
    GripButton,
    MenuButton,
    Primary2DAxisClick,
    Primary2DAxisTouch,
    Secondary2DAxisClick,
    Secondary2DAxisTouch,
}

/// Analog features, normalized to `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarFeature {
    Trigger,
    Grip,
}

/// Two-axis features, each axis in `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisFeature {
    Primary2DAxis,
    Secondary2DAxis,
}

/// 2D vector used for stick and pad values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Device pose in tracking space. `orientation` is a quaternion `[x, y, z, w]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: [f32; 3],
    pub orientation: [f32; 4],
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            orientation: [0.0, 0.0, 0.0, 1.0],
        }
    }
}
