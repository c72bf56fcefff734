//! Scriptable in-memory device.
//!
//! [`VirtualDevice`] reports whatever feature values were set through its
//! [`VirtualHandle`] and treats every other feature as absent. The handle
//! stays usable after the device itself has been handed to a resolver, which
//! makes this backend suitable for demos, tests, and hosts that marshal
//! runtime state into plain values each frame.

use crate::device::{Characteristics, Device};
use crate::feature::{AxisFeature, BoolFeature, ScalarFeature, Vec2};
use crate::metadata::DeviceMeta;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
struct VirtualState {
    valid: bool,
    bools: HashMap<BoolFeature, bool>,
    scalars: HashMap<ScalarFeature, f32>,
    axes: HashMap<AxisFeature, Vec2>,
    position: Option<[f32; 3]>,
    rotation: Option<[f32; 4]>,
    haptics: bool,
    haptic_log: Vec<f32>,
}

impl Default for VirtualState {
    fn default() -> Self {
        Self {
            valid: true,
            bools: HashMap::new(),
            scalars: HashMap::new(),
            axes: HashMap::new(),
            position: None,
            rotation: None,
            haptics: false,
            haptic_log: Vec::new(),
        }
    }
}

/// In-memory [`Device`] driven through a [`VirtualHandle`].
#[derive(Debug)]
pub struct VirtualDevice {
    id: String,
    name: String,
    characteristics: Characteristics,
    meta: DeviceMeta,
    state: Rc<RefCell<VirtualState>>,
}

/// Shared writer for a [`VirtualDevice`]'s feature values.
#[derive(Debug, Clone)]
pub struct VirtualHandle {
    state: Rc<RefCell<VirtualState>>,
}

impl VirtualDevice {
    pub fn new(id: &str, name: &str, characteristics: Characteristics) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            characteristics,
            meta: DeviceMeta::default(),
            state: Rc::default(),
        }
    }

    /// A tracked, hand-held controller for the given hand.
    pub fn controller(id: &str, name: &str, left: bool) -> Self {
        let hand = if left {
            Characteristics::LEFT
        } else {
            Characteristics::RIGHT
        };
        Self::new(
            id,
            name,
            Characteristics::CONTROLLER
                | Characteristics::TRACKED_DEVICE
                | Characteristics::HELD_IN_HAND
                | hand,
        )
    }

    pub fn with_meta(mut self, meta: DeviceMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Accept haptic pulses; they are recorded in [`VirtualHandle::haptic_log`].
    pub fn with_haptics(self) -> Self {
        self.state.borrow_mut().haptics = true;
        self
    }

    pub fn handle(&self) -> VirtualHandle {
        VirtualHandle {
            state: Rc::clone(&self.state),
        }
    }
}

impl VirtualHandle {
    pub fn set_valid(&self, valid: bool) {
        self.state.borrow_mut().valid = valid;
    }

    pub fn set_bool(&self, feature: BoolFeature, value: bool) {
        self.state.borrow_mut().bools.insert(feature, value);
    }

    pub fn set_scalar(&self, feature: ScalarFeature, value: f32) {
        self.state.borrow_mut().scalars.insert(feature, value);
    }

    pub fn set_axis(&self, feature: AxisFeature, value: Vec2) {
        self.state.borrow_mut().axes.insert(feature, value);
    }

    pub fn set_position(&self, position: Option<[f32; 3]>) {
        self.state.borrow_mut().position = position;
    }

    pub fn set_rotation(&self, rotation: Option<[f32; 4]>) {
        self.state.borrow_mut().rotation = rotation;
    }

    /// Make a boolean feature absent again.
    pub fn clear_bool(&self, feature: BoolFeature) {
        self.state.borrow_mut().bools.remove(&feature);
    }

    /// Make every feature absent.
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.bools.clear();
        state.scalars.clear();
        state.axes.clear();
        state.position = None;
        state.rotation = None;
    }

    /// Durations of haptic pulses received so far.
    pub fn haptic_log(&self) -> Vec<f32> {
        self.state.borrow().haptic_log.clone()
    }
}

impl Device for VirtualDevice {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }

    fn metadata(&self) -> DeviceMeta {
        self.meta.clone()
    }

    fn is_valid(&self) -> bool {
        self.state.borrow().valid
    }

    fn read_bool(&self, feature: BoolFeature) -> Option<bool> {
        self.state.borrow().bools.get(&feature).copied()
    }

    fn read_scalar(&self, feature: ScalarFeature) -> Option<f32> {
        self.state.borrow().scalars.get(&feature).copied()
    }

    fn read_axis(&self, feature: AxisFeature) -> Option<Vec2> {
        self.state.borrow().axes.get(&feature).copied()
    }

    fn read_position(&self) -> Option<[f32; 3]> {
        self.state.borrow().position
    }

    fn read_rotation(&self) -> Option<[f32; 4]> {
        self.state.borrow().rotation
    }

    fn send_haptic(&mut self, seconds: f32) -> bool {
        let mut state = self.state.borrow_mut();
        if state.haptics {
            state.haptic_log.push(seconds);
        }
        state.haptics
    }
}

/// One left and one right virtual controller, with their handles.
pub fn create_virtual_pair() -> ((VirtualDevice, VirtualHandle), (VirtualDevice, VirtualHandle)) {
    let left = VirtualDevice::controller("virtual:left", "Virtual Controller (L)", true);
    let right = VirtualDevice::controller("virtual:right", "Virtual Controller (R)", false);
    let (lh, rh) = (left.handle(), right.handle());
    ((left, lh), (right, rh))
}
