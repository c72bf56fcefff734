//! Host-facing device contract.
//!
//! The platform layer (engine, OpenXR binding, test harness) implements
//! [`Device`] for each physical controller it discovers and hands it to a
//! resolver via [`ControllerResolver::offer`](crate::resolver::ControllerResolver::offer).
//! All feature reads are best effort: return `None` when the device cannot
//! supply the feature this frame.

use crate::feature::{AxisFeature, BoolFeature, ScalarFeature, Vec2};
use crate::metadata::DeviceMeta;
use std::fmt;
use std::ops::BitOr;

/// Capability flags reported by the runtime for a device.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Characteristics(u32);

impl Characteristics {
    pub const NONE: Characteristics = Characteristics(0);
    pub const HEAD_MOUNTED: Characteristics = Characteristics(1 << 0);
    pub const CAMERA: Characteristics = Characteristics(1 << 1);
    pub const HELD_IN_HAND: Characteristics = Characteristics(1 << 2);
    pub const HAND_TRACKING: Characteristics = Characteristics(1 << 3);
    pub const EYE_TRACKING: Characteristics = Characteristics(1 << 4);
    pub const TRACKED_DEVICE: Characteristics = Characteristics(1 << 5);
    pub const CONTROLLER: Characteristics = Characteristics(1 << 6);
    pub const TRACKING_REFERENCE: Characteristics = Characteristics(1 << 7);
    pub const LEFT: Characteristics = Characteristics(1 << 8);
    pub const RIGHT: Characteristics = Characteristics(1 << 9);
    pub const SIMULATED_6DOF: Characteristics = Characteristics(1 << 10);

    /// `true` when every flag in `required` is also set in `self`.
    #[inline]
    pub const fn contains(self, required: Characteristics) -> bool {
        self.0 & required.0 == required.0
    }
}

impl BitOr for Characteristics {
    type Output = Characteristics;

    fn bitor(self, rhs: Self) -> Self {
        Characteristics(self.0 | rhs.0)
    }
}

impl fmt::Debug for Characteristics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Characteristics, &str); 11] = [
            (Characteristics::HEAD_MOUNTED, "HeadMounted"),
            (Characteristics::CAMERA, "Camera"),
            (Characteristics::HELD_IN_HAND, "HeldInHand"),
            (Characteristics::HAND_TRACKING, "HandTracking"),
            (Characteristics::EYE_TRACKING, "EyeTracking"),
            (Characteristics::TRACKED_DEVICE, "TrackedDevice"),
            (Characteristics::CONTROLLER, "Controller"),
            (Characteristics::TRACKING_REFERENCE, "TrackingReference"),
            (Characteristics::LEFT, "Left"),
            (Characteristics::RIGHT, "Right"),
            (Characteristics::SIMULATED_6DOF, "Simulated6DOF"),
        ];
        let mut set = f.debug_set();
        for (flag, name) in NAMES {
            if self.contains(flag) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}

/// A physical tracked device as seen by a resolver.
pub trait Device {
    /// Stable identifier (runtime-specific).
    fn id(&self) -> &str;

    /// User-facing label.
    fn name(&self) -> &str;

    fn characteristics(&self) -> Characteristics;

    fn metadata(&self) -> DeviceMeta {
        DeviceMeta::default()
    }

    /// Whether the runtime currently considers the device valid and tracked.
    fn is_valid(&self) -> bool {
        true
    }

    fn read_bool(&self, feature: BoolFeature) -> Option<bool>;

    fn read_scalar(&self, feature: ScalarFeature) -> Option<f32>;

    fn read_axis(&self, feature: AxisFeature) -> Option<Vec2>;

    fn read_position(&self) -> Option<[f32; 3]> {
        None
    }

    fn read_rotation(&self) -> Option<[f32; 4]> {
        None
    }

    /// Request a haptic pulse. Returns `false` when unsupported.
    fn send_haptic(&mut self, _seconds: f32) -> bool {
        false
    }
}

impl fmt::Debug for dyn Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("characteristics", &self.characteristics())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_requires_every_flag() {
        let right_controller = Characteristics::CONTROLLER
            | Characteristics::TRACKED_DEVICE
            | Characteristics::HELD_IN_HAND
            | Characteristics::RIGHT;
        let wanted = Characteristics::CONTROLLER | Characteristics::TRACKED_DEVICE;

        assert!(right_controller.contains(wanted | Characteristics::RIGHT));
        assert!(!right_controller.contains(wanted | Characteristics::LEFT));
        assert!(right_controller.contains(Characteristics::NONE));
    }

    #[test]
    fn debug_lists_flag_names() {
        let c = Characteristics::CONTROLLER | Characteristics::LEFT;
        assert_eq!(format!("{c:?}"), "{Controller, Left}");
    }
}
