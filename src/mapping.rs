//! Device-family mapping strategies.
//!
//! Each controller family maps [`LogicalInput`]s to physical features through
//! its own table. The strategy is chosen once, when a device is bound, and
//! never changes for the lifetime of that binding.
//!
//! | Logical input                      | Generic XR held / touch             | Oculus-style held / touch |
//! |------------------------------------|-------------------------------------|---------------------------|
//! | Directional, Thumbstick, Touchpad  | axis click / axis touch             | axis click / none         |
//! | Trigger                            | trigger button / *unmapped*         | trigger button / none     |
//! | Grip                               | grip button / *unmapped*            | grip button / none        |
//! | ButtonPrimary{A,B,C}               | primary button / primary touch      | primary button / none     |
//! | ButtonSecondary{A,B,C}             | secondary button / secondary touch  | secondary button / none   |
//! | Any                                | any of five buttons / any of three touches | any of five buttons / none |
//!
//! "none" reports `false`; *unmapped* is an [`InputError::UnmappedTouch`].

use crate::device::Device;
use crate::error::InputError;
use crate::feature::{AxisFeature, BoolFeature, ScalarFeature, Vec2};
use crate::input::LogicalInput;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Buttons checked, in order, for [`LogicalInput::Any`] held state.
pub const ANY_HELD: &[BoolFeature] = &[
    BoolFeature::PrimaryButton,
    BoolFeature::SecondaryButton,
    BoolFeature::TriggerButton,
    BoolFeature::GripButton,
    BoolFeature::Primary2DAxisClick,
];

/// Touch sensors checked, in order, for [`LogicalInput::Any`] touch state.
pub const ANY_TOUCH: &[BoolFeature] = &[
    BoolFeature::PrimaryTouch,
    BoolFeature::SecondaryTouch,
    BoolFeature::Primary2DAxisTouch,
];

/// Controller layout family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceFamily {
    /// Generic XR controller with touch sensing.
    #[default]
    GenericXr,
    /// Oculus-style layout; no touch sensing is exposed.
    OculusStyle,
}

impl DeviceFamily {
    /// The mapping strategy for this family.
    pub fn strategy(self) -> &'static dyn MappingStrategy {
        match self {
            DeviceFamily::GenericXr => &GenericXr,
            DeviceFamily::OculusStyle => &OculusStyle,
        }
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceFamily::GenericXr => f.write_str("generic XR"),
            DeviceFamily::OculusStyle => f.write_str("Oculus-style"),
        }
    }
}

/// How a logical input resolves to boolean features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureMapping {
    Feature(BoolFeature),
    /// `true` if any listed feature reads `true`; stops at the first hit.
    AnyOf(&'static [BoolFeature]),
    /// The family has no such feature; always `false`.
    Unsupported,
}

impl FeatureMapping {
    /// Read the mapped value from `device`. Absent features read as `false`.
    pub fn read(self, device: &dyn Device) -> bool {
        match self {
            FeatureMapping::Feature(feature) => device.read_bool(feature).unwrap_or(false),
            FeatureMapping::AnyOf(features) => features
                .iter()
                .any(|feature| device.read_bool(*feature) == Some(true)),
            FeatureMapping::Unsupported => false,
        }
    }
}

/// Family-specific resolution of logical inputs.
///
/// Implementors provide the two tables; the `resolve_*` methods have default
/// implementations that read through them.
pub trait MappingStrategy: Sync {
    fn family(&self) -> DeviceFamily;

    /// Held-state table.
    fn held_mapping(&self, input: LogicalInput) -> FeatureMapping;

    /// Touch-state table. `Err` marks an input the table has no entry for.
    fn touch_mapping(&self, input: LogicalInput) -> Result<FeatureMapping, InputError>;

    fn resolve_held(&self, input: LogicalInput, device: &dyn Device) -> bool {
        self.held_mapping(input).read(device)
    }

    fn resolve_touch(&self, input: LogicalInput, device: &dyn Device) -> Result<bool, InputError> {
        Ok(self.touch_mapping(input)?.read(device))
    }

    /// Analog value for `Trigger`/`Grip`; `0.0` for anything else.
    fn resolve_scalar(&self, input: LogicalInput, device: &dyn Device) -> f32 {
        let feature = match input {
            LogicalInput::Trigger => ScalarFeature::Trigger,
            LogicalInput::Grip => ScalarFeature::Grip,
            _ => return 0.0,
        };
        device
            .read_scalar(feature)
            .map_or(0.0, |v| v.clamp(0.0, 1.0))
    }

    /// Primary 2D axis. Every logical input shares it; the secondary axis is
    /// read separately and never substituted here.
    fn resolve_axis(&self, _input: LogicalInput, device: &dyn Device) -> Vec2 {
        device
            .read_axis(AxisFeature::Primary2DAxis)
            .unwrap_or(Vec2::ZERO)
    }
}

/// Held table shared by both families.
fn button_held_mapping(input: LogicalInput) -> FeatureMapping {
    use LogicalInput::*;
    match input {
        Directional | Thumbstick | Touchpad => FeatureMapping::Feature(BoolFeature::Primary2DAxisClick),
        Trigger => FeatureMapping::Feature(BoolFeature::TriggerButton),
        Grip => FeatureMapping::Feature(BoolFeature::GripButton),
        ButtonPrimaryA | ButtonPrimaryB | ButtonPrimaryC => {
            FeatureMapping::Feature(BoolFeature::PrimaryButton)
        }
        ButtonSecondaryA | ButtonSecondaryB | ButtonSecondaryC => {
            FeatureMapping::Feature(BoolFeature::SecondaryButton)
        }
        Any => FeatureMapping::AnyOf(ANY_HELD),
    }
}

/// Generic XR controllers (capacitive buttons and stick).
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericXr;

impl MappingStrategy for GenericXr {
    fn family(&self) -> DeviceFamily {
        DeviceFamily::GenericXr
    }

    fn held_mapping(&self, input: LogicalInput) -> FeatureMapping {
        button_held_mapping(input)
    }

    fn touch_mapping(&self, input: LogicalInput) -> Result<FeatureMapping, InputError> {
        use LogicalInput::*;
        match input {
            ButtonPrimaryA | ButtonPrimaryB | ButtonPrimaryC => {
                Ok(FeatureMapping::Feature(BoolFeature::PrimaryTouch))
            }
            ButtonSecondaryA | ButtonSecondaryB | ButtonSecondaryC => {
                Ok(FeatureMapping::Feature(BoolFeature::SecondaryTouch))
            }
            Directional | Thumbstick | Touchpad => {
                Ok(FeatureMapping::Feature(BoolFeature::Primary2DAxisTouch))
            }
            Any => Ok(FeatureMapping::AnyOf(ANY_TOUCH)),
            Trigger | Grip => Err(InputError::UnmappedTouch {
                input,
                family: self.family(),
            }),
        }
    }
}

/// Oculus-style controllers. Touch sensing is not exposed, so every touch
/// query reports `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OculusStyle;

impl MappingStrategy for OculusStyle {
    fn family(&self) -> DeviceFamily {
        DeviceFamily::OculusStyle
    }

    fn held_mapping(&self, input: LogicalInput) -> FeatureMapping {
        button_held_mapping(input)
    }

    fn touch_mapping(&self, _input: LogicalInput) -> Result<FeatureMapping, InputError> {
        Ok(FeatureMapping::Unsupported)
    }
}
