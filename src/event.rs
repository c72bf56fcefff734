//! Events published by the [`Manager`](crate::manager::Manager).
//!
//! The resolver itself is query-based. For code that prefers push-style
//! notification, the manager turns each frame's press/release edges and new
//! bindings into [`InputEvent`]s and fans them out through the
//! [`InputEventBus`](crate::eventbus::InputEventBus).
//!
//! ## Conventions
//! - One `Pressed`/`Released` event per [`LogicalInput`] that changed, so
//!   aliases of one physical button each produce their own event.
//! - `Bound` is published on the frame a hand binds, before that frame's edges.

use crate::input::{Handedness, LogicalInput};
use crate::mapping::DeviceFamily;

/// What happened.
#[derive(Clone, Debug, PartialEq)]
pub enum InputKind {
    /// A logical input went down this frame.
    Pressed { input: LogicalInput },

    /// A logical input went up this frame.
    Released { input: LogicalInput },

    /// The hand was bound to a device.
    Bound {
        device_id: String,
        family: DeviceFamily,
    },
}

/// Timestamped event for one hand.
#[derive(Clone, Debug)]
pub struct InputEvent {
    /// Capture time (monotonic).
    pub at: std::time::Instant,
    /// Resolver frame counter the event belongs to.
    pub frame: u64,
    pub hand: Handedness,
    pub kind: InputKind,
}

impl InputEvent {
    pub fn is_press(&self) -> bool {
        matches!(self.kind, InputKind::Pressed { .. })
    }

    pub fn is_release(&self) -> bool {
        matches!(self.kind, InputKind::Released { .. })
    }

    /// The logical input for press/release events.
    pub fn input(&self) -> Option<LogicalInput> {
        match self.kind {
            InputKind::Pressed { input } | InputKind::Released { input } => Some(input),
            InputKind::Bound { .. } => None,
        }
    }
}
