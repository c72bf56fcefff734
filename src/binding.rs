//! Device binding for a single hand.
//!
//! A hand starts [`BindState::Unbound`] with a queue of bind candidates.
//! Connection notifications push matching devices into that queue; the queue
//! is drained once per frame and the first candidate wins. After that the
//! state is [`BindState::Bound`] for good: later candidates are handed back
//! to the caller and the binding is never replaced.

use crate::config::ResolverConfig;
use crate::device::{Characteristics, Device};
use crate::input::Handedness;
use crate::mapping::{DeviceFamily, MappingStrategy};
use crate::metadata::DeviceMeta;
use std::collections::VecDeque;
use tracing::{debug, info};

/// Flags a device must carry to be bound to `hand`.
pub fn required_characteristics(hand: Handedness) -> Characteristics {
    let side = match hand {
        Handedness::Left => Characteristics::LEFT,
        Handedness::Right => Characteristics::RIGHT,
    };
    Characteristics::CONTROLLER | Characteristics::TRACKED_DEVICE | side
}

/// `true` if `device` is a tracked controller for `hand`.
pub fn matches_hand(device: &dyn Device, hand: Handedness) -> bool {
    device
        .characteristics()
        .contains(required_characteristics(hand))
}

/// A physical device bound to one hand, with its selected mapping family.
pub struct DeviceBinding {
    hand: Handedness,
    device: Box<dyn Device>,
    family: DeviceFamily,
    meta: DeviceMeta,
}

impl DeviceBinding {
    pub fn new(hand: Handedness, device: Box<dyn Device>, family: DeviceFamily) -> Self {
        let meta = device.metadata();
        Self {
            hand,
            device,
            family,
            meta,
        }
    }

    pub fn hand(&self) -> Handedness {
        self.hand
    }

    pub fn family(&self) -> DeviceFamily {
        self.family
    }

    pub fn strategy(&self) -> &'static dyn MappingStrategy {
        self.family.strategy()
    }

    pub fn device(&self) -> &dyn Device {
        self.device.as_ref()
    }

    pub(crate) fn device_mut(&mut self) -> &mut dyn Device {
        self.device.as_mut()
    }

    pub fn device_id(&self) -> &str {
        self.device.id()
    }

    /// Metadata captured when the binding was made.
    pub fn meta(&self) -> &DeviceMeta {
        &self.meta
    }
}

impl std::fmt::Debug for DeviceBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceBinding")
            .field("hand", &self.hand)
            .field("device", &self.device)
            .field("family", &self.family)
            .finish()
    }
}

/// Binding lifecycle for one hand.
#[derive(Debug)]
pub enum BindState {
    /// Waiting for a device; holds candidates delivered since the last drain.
    Unbound(VecDeque<Box<dyn Device>>),
    Bound(DeviceBinding),
}

impl Default for BindState {
    fn default() -> Self {
        BindState::Unbound(VecDeque::new())
    }
}

impl BindState {
    pub fn binding(&self) -> Option<&DeviceBinding> {
        match self {
            BindState::Bound(binding) => Some(binding),
            BindState::Unbound(_) => None,
        }
    }

    pub fn binding_mut(&mut self) -> Option<&mut DeviceBinding> {
        match self {
            BindState::Bound(binding) => Some(binding),
            BindState::Unbound(_) => None,
        }
    }

    /// Number of queued candidates (always 0 once bound).
    pub fn pending(&self) -> usize {
        match self {
            BindState::Unbound(queue) => queue.len(),
            BindState::Bound(_) => 0,
        }
    }

    /// Queue `device` as a candidate for `hand`.
    ///
    /// Returns the device back when it does not match the hand or when the
    /// hand is already bound.
    pub fn offer(&mut self, hand: Handedness, device: Box<dyn Device>) -> Option<Box<dyn Device>> {
        match self {
            BindState::Bound(binding) => {
                debug!(
                    %hand,
                    bound = binding.device_id(),
                    offered = device.id(),
                    "hand already bound; ignoring connected device"
                );
                Some(device)
            }
            BindState::Unbound(_) if !matches_hand(device.as_ref(), hand) => Some(device),
            BindState::Unbound(queue) => {
                debug!(%hand, id = device.id(), "queued bind candidate");
                queue.push_back(device);
                None
            }
        }
    }

    /// Drain the candidate queue and bind the first matching device.
    ///
    /// Returns `true` only on the call that performs the transition.
    pub fn try_bind(&mut self, hand: Handedness, config: &ResolverConfig) -> bool {
        let BindState::Unbound(queue) = self else {
            return false;
        };

        let mut chosen = None;
        for device in queue.drain(..) {
            if chosen.is_none() && matches_hand(device.as_ref(), hand) {
                chosen = Some(device);
            } else {
                debug!(%hand, id = device.id(), "dropping bind candidate");
            }
        }

        let Some(device) = chosen else {
            return false;
        };
        let family = config.select_family(&device.metadata());
        info!(
            %hand,
            id = device.id(),
            name = device.name(),
            %family,
            "bound controller"
        );
        *self = BindState::Bound(DeviceBinding::new(hand, device, family));
        true
    }
}
