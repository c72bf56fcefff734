//! Logical (device-independent) inputs and hands.
//!
//! A [`LogicalInput`] names an abstract control such as "trigger" or "primary
//! button A". Several logical inputs may resolve to the same physical feature;
//! see [`mapping`](crate::mapping) for the per-family tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Abstract control name, independent of the physical controller layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalInput {
    Trigger,
    Grip,
    Directional,
    Thumbstick,
    Touchpad,
    ButtonPrimaryA,
    ButtonPrimaryB,
    ButtonPrimaryC,
    ButtonSecondaryA,
    ButtonSecondaryB,
    ButtonSecondaryC,
    /// Matches if any button-like control is active.
    Any,
}

impl LogicalInput {
    /// Every logical input, in bit-index order.
    pub const ALL: [LogicalInput; 12] = [
        LogicalInput::Trigger,
        LogicalInput::Grip,
        LogicalInput::Directional,
        LogicalInput::Thumbstick,
        LogicalInput::Touchpad,
        LogicalInput::ButtonPrimaryA,
        LogicalInput::ButtonPrimaryB,
        LogicalInput::ButtonPrimaryC,
        LogicalInput::ButtonSecondaryA,
        LogicalInput::ButtonSecondaryB,
        LogicalInput::ButtonSecondaryC,
        LogicalInput::Any,
    ];

    /// Stable bit index used by [`InputSet`].
    #[inline]
    pub const fn bit(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for LogicalInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Which hand a resolver serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handedness::Left => f.write_str("left"),
            Handedness::Right => f.write_str("right"),
        }
    }
}

/// Compact set of logical inputs, one bit per [`LogicalInput`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputSet(u32);

impl InputSet {
    pub const EMPTY: InputSet = InputSet(0);

    #[inline]
    pub fn contains(self, input: LogicalInput) -> bool {
        self.0 & (1 << input.bit()) != 0
    }

    #[inline]
    pub fn insert(&mut self, input: LogicalInput) {
        self.0 |= 1 << input.bit();
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Inputs present in `self` but not in `other`.
    #[inline]
    pub fn difference(self, other: InputSet) -> InputSet {
        InputSet(self.0 & !other.0)
    }

    /// Iterate contained inputs in bit-index order.
    pub fn iter(self) -> impl Iterator<Item = LogicalInput> {
        LogicalInput::ALL
            .into_iter()
            .filter(move |input| self.contains(*input))
    }
}

impl FromIterator<LogicalInput> for InputSet {
    fn from_iter<I: IntoIterator<Item = LogicalInput>>(iter: I) -> Self {
        let mut set = InputSet::EMPTY;
        for input in iter {
            set.insert(input);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_indices_are_unique_and_in_order() {
        for (idx, input) in LogicalInput::ALL.iter().enumerate() {
            assert_eq!(input.bit() as usize, idx);
        }
    }

    #[test]
    fn difference_keeps_only_new_bits() {
        let prev: InputSet = [LogicalInput::Trigger, LogicalInput::Grip].into_iter().collect();
        let curr: InputSet = [LogicalInput::Grip, LogicalInput::Any].into_iter().collect();
        let new: Vec<_> = curr.difference(prev).iter().collect();
        assert_eq!(new, vec![LogicalInput::Any]);
        assert!(prev.difference(prev).is_empty());
    }
}
