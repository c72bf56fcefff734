//! Two-hand controller rig.
//!
//! [`Manager`] owns a left and a right [`ControllerResolver`], routes
//! device-connected notifications to whichever hand accepts them, and turns
//! each frame's edges into [`InputEvent`]s on its [`InputEventBus`].
//!
//! ```
//! use xrpoll::backends::virtual_input::create_virtual_pair;
//! use xrpoll::{BoolFeature, Handedness, InputKind, LogicalInput, Manager, ResolverConfig};
//!
//! let mut rig = Manager::new(ResolverConfig::default());
//! let ((left, _lh), (right, rh)) = create_virtual_pair();
//! rig.connect(left);
//! rig.connect(right);
//!
//! rh.set_bool(BoolFeature::GripButton, true);
//! let events = rig.advance();
//! assert!(events.iter().any(|e| e.hand == Handedness::Right
//!     && e.kind == InputKind::Pressed { input: LogicalInput::Grip }));
//! assert!(rig.hand(Handedness::Right).is_held(LogicalInput::Grip));
//! ```

use crate::config::ResolverConfig;
use crate::device::Device;
use crate::event::{InputEvent, InputKind};
use crate::eventbus::InputEventBus;
use crate::input::Handedness;
use crate::resolver::ControllerResolver;
use std::time::Instant;
use tracing::debug;

pub struct Manager {
    left: ControllerResolver,
    right: ControllerResolver,
    bus: InputEventBus,
}

impl Manager {
    /// Both hands start unbound and share `config`.
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            left: ControllerResolver::new(Handedness::Left, config.clone()),
            right: ControllerResolver::new(Handedness::Right, config),
            bus: InputEventBus::new(),
        }
    }

    /// Device-connected notification.
    pub fn connect<D: Device + 'static>(&mut self, device: D) {
        self.connect_boxed(Box::new(device));
    }

    /// Offer `device` to the left hand, then the right. Devices neither hand
    /// accepts (headsets, trackers, extra controllers) are dropped.
    pub fn connect_boxed(&mut self, device: Box<dyn Device>) {
        let Some(device) = self.left.offer(device) else {
            return;
        };
        if let Some(device) = self.right.offer(device) {
            debug!(
                id = device.id(),
                characteristics = ?device.characteristics(),
                "connected device not used by either hand"
            );
        }
    }

    pub fn hand(&self, hand: Handedness) -> &ControllerResolver {
        match hand {
            Handedness::Left => &self.left,
            Handedness::Right => &self.right,
        }
    }

    pub fn hand_mut(&mut self, hand: Handedness) -> &mut ControllerResolver {
        match hand {
            Handedness::Left => &mut self.left,
            Handedness::Right => &mut self.right,
        }
    }

    pub fn bus_mut(&mut self) -> &mut InputEventBus {
        &mut self.bus
    }

    /// Advance both hands one frame, publish the resulting events on the bus,
    /// and return them.
    pub fn advance(&mut self) -> Vec<InputEvent> {
        let at = Instant::now();
        let mut events = Vec::new();

        for resolver in [&mut self.left, &mut self.right] {
            let newly_bound = resolver.advance();
            let hand = resolver.hand();
            let frame = resolver.frame();
            let event = |kind: InputKind| InputEvent {
                at,
                frame,
                hand,
                kind,
            };

            if newly_bound {
                if let Some(binding) = resolver.binding() {
                    events.push(event(InputKind::Bound {
                        device_id: binding.device_id().to_string(),
                        family: binding.family(),
                    }));
                }
            }
            events.extend(
                resolver
                    .pressed_edges()
                    .iter()
                    .map(|input| event(InputKind::Pressed { input })),
            );
            events.extend(
                resolver
                    .released_edges()
                    .iter()
                    .map(|input| event(InputKind::Released { input })),
            );
        }

        self.bus.emit_all(&events);
        events
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}
