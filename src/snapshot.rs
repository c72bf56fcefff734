//! Per-frame input snapshots.
//!
//! [`InputSnapshot`] is an owned, read-only view of one hand's resolved input
//! for a single frame. [`FrameHistory`] keeps the current and previous
//! snapshots; they are replaced together in [`FrameHistory::advance`] and
//! never edited in place, so every query made during a frame sees the same
//! pair.
//!
//! # Semantics
//! - Held and touched state are stored per [`LogicalInput`], not per physical
//!   feature. Aliases (e.g. `ButtonPrimaryA` and `ButtonPrimaryB`) carry their
//!   own bits even though they read the same feature.
//! - Edge queries compare an input's bit in `current` against the same
//!   input's bit in `previous`.
//! - Snapshots serialize with `serde`, which is handy for input recording:
//! ```ignore
//! let line = serde_json::to_string(resolver.snapshot())?;
//! ```

use crate::device::Device;
use crate::error::InputError;
use crate::feature::{AxisFeature, Pose, Vec2};
use crate::input::{InputSet, LogicalInput};
use crate::mapping::{DeviceFamily, MappingStrategy};
use serde::{Deserialize, Serialize};

/// Resolved input for one hand during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Frame counter at capture time.
    pub frame: u64,
    /// Family of the device bound when this frame was captured.
    pub family: Option<DeviceFamily>,
    /// Bound device reported valid tracking.
    pub tracked: bool,
    pub held: InputSet,
    pub touched: InputSet,
    pub trigger: f32,
    pub grip: f32,
    pub primary_axis: Vec2,
    pub secondary_axis: Vec2,
    /// Last known pose; `None` until the device has reported one.
    pub pose: Option<Pose>,
}

impl InputSnapshot {
    /// Snapshot for a hand with no bound device.
    pub fn unbound(frame: u64) -> Self {
        Self {
            frame,
            ..Default::default()
        }
    }

    /// Resolve every logical input through `strategy` against `device`.
    ///
    /// `last_pose` is carried forward; position and rotation are overwritten
    /// independently, only when the device reports them this frame. An invalid
    /// device yields zeroed input but keeps the last pose.
    pub fn capture(
        frame: u64,
        strategy: &dyn MappingStrategy,
        device: &dyn Device,
        last_pose: Option<Pose>,
    ) -> Self {
        let mut snap = Self {
            frame,
            family: Some(strategy.family()),
            pose: last_pose,
            ..Default::default()
        };
        if !device.is_valid() {
            return snap;
        }
        snap.tracked = true;

        for input in LogicalInput::ALL {
            if strategy.resolve_held(input, device) {
                snap.held.insert(input);
            }
            // Unmapped touch inputs are reported at query time.
            if let Ok(true) = strategy.resolve_touch(input, device) {
                snap.touched.insert(input);
            }
        }

        snap.trigger = strategy.resolve_scalar(LogicalInput::Trigger, device);
        snap.grip = strategy.resolve_scalar(LogicalInput::Grip, device);
        snap.primary_axis = strategy.resolve_axis(LogicalInput::Thumbstick, device);
        snap.secondary_axis = device
            .read_axis(AxisFeature::Secondary2DAxis)
            .unwrap_or(Vec2::ZERO);

        if let Some(position) = device.read_position() {
            snap.pose.get_or_insert_with(Pose::default).position = position;
        }
        if let Some(orientation) = device.read_rotation() {
            snap.pose.get_or_insert_with(Pose::default).orientation = orientation;
        }

        snap
    }

    #[inline]
    pub fn is_held(&self, input: LogicalInput) -> bool {
        self.held.contains(input)
    }

    #[inline]
    pub fn is_touched(&self, input: LogicalInput) -> bool {
        self.touched.contains(input)
    }

    /// Whether a touch query for `input` should report the family's missing
    /// mapping. Only a tracked device has a touch table in play.
    pub fn touch_error(&self, input: LogicalInput) -> Option<InputError> {
        let family = self.family.filter(|_| self.tracked)?;
        family.strategy().touch_mapping(input).err()
    }
}

/// Current and previous snapshots for edge detection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameHistory {
    current: InputSnapshot,
    previous: InputSnapshot,
}

impl FrameHistory {
    #[inline]
    pub fn current(&self) -> &InputSnapshot {
        &self.current
    }

    #[inline]
    pub fn previous(&self) -> &InputSnapshot {
        &self.previous
    }

    /// Install `next` as current; the old current becomes previous.
    pub fn advance(&mut self, next: InputSnapshot) {
        self.previous = std::mem::replace(&mut self.current, next);
    }

    /// Held now, not held last frame.
    #[inline]
    pub fn went_down(&self, input: LogicalInput) -> bool {
        self.current.is_held(input) && !self.previous.is_held(input)
    }

    /// Held last frame, not held now.
    #[inline]
    pub fn went_up(&self, input: LogicalInput) -> bool {
        !self.current.is_held(input) && self.previous.is_held(input)
    }

    /// Every input that went down this frame.
    pub fn pressed(&self) -> InputSet {
        self.current.held.difference(self.previous.held)
    }

    /// Every input that went up this frame.
    pub fn released(&self) -> InputSet {
        self.previous.held.difference(self.current.held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(inputs: &[LogicalInput]) -> InputSnapshot {
        InputSnapshot {
            held: inputs.iter().copied().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn edges_follow_trigger_sequence() {
        let mut history = FrameHistory::default();
        let frames = [
            held(&[]),
            held(&[LogicalInput::Trigger]),
            held(&[LogicalInput::Trigger]),
            held(&[]),
        ];
        let mut downs = Vec::new();
        let mut ups = Vec::new();
        for snap in frames {
            history.advance(snap);
            downs.push(history.went_down(LogicalInput::Trigger));
            ups.push(history.went_up(LogicalInput::Trigger));
        }
        assert_eq!(downs, vec![false, true, false, false]);
        assert_eq!(ups, vec![false, false, false, true]);
    }

    #[test]
    fn edges_are_per_logical_input() {
        let mut history = FrameHistory::default();
        history.advance(held(&[LogicalInput::ButtonPrimaryA]));
        history.advance(held(&[
            LogicalInput::ButtonPrimaryA,
            LogicalInput::ButtonPrimaryB,
        ]));

        assert!(!history.went_down(LogicalInput::ButtonPrimaryA));
        assert!(history.went_down(LogicalInput::ButtonPrimaryB));
        assert_eq!(
            history.pressed().iter().collect::<Vec<_>>(),
            vec![LogicalInput::ButtonPrimaryB]
        );
        assert!(history.released().is_empty());
    }

    #[test]
    fn touch_error_needs_a_tracked_generic_device() {
        let mut snap = InputSnapshot::unbound(1);
        assert_eq!(snap.touch_error(LogicalInput::Grip), None);

        snap.family = Some(DeviceFamily::GenericXr);
        assert_eq!(snap.touch_error(LogicalInput::Grip), None);

        snap.tracked = true;
        assert_eq!(
            snap.touch_error(LogicalInput::Grip),
            Some(InputError::UnmappedTouch {
                input: LogicalInput::Grip,
                family: DeviceFamily::GenericXr,
            })
        );
        assert_eq!(snap.touch_error(LogicalInput::Thumbstick), None);

        snap.family = Some(DeviceFamily::OculusStyle);
        assert_eq!(snap.touch_error(LogicalInput::Grip), None);
    }
}
