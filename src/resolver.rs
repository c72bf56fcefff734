//! Per-hand controller input resolver.
//!
//! [`ControllerResolver`] owns one hand's device binding and frame history and
//! answers device-independent queries about it. The host drives it once per
//! frame:
//!
//! ```
//! use xrpoll::backends::virtual_input::VirtualDevice;
//! use xrpoll::{BoolFeature, ControllerResolver, Handedness, LogicalInput, ResolverConfig};
//!
//! let mut right = ControllerResolver::new(Handedness::Right, ResolverConfig::default());
//! let device = VirtualDevice::controller("rt", "Right", false);
//! let pad = device.handle();
//! right.offer(Box::new(device));
//!
//! pad.set_bool(BoolFeature::TriggerButton, true);
//! right.advance();
//! assert!(right.went_down(LogicalInput::Trigger));
//!
//! right.advance();
//! assert!(right.is_held(LogicalInput::Trigger));
//! assert!(!right.went_down(LogicalInput::Trigger));
//! ```
//!
//! # Frame contract
//! - [`advance`](ControllerResolver::advance) runs exactly once per frame,
//!   before any query for that frame. It is the only method that changes
//!   input history.
//! - Queries take `&self` and read the frame's snapshots, so they are
//!   consistent with each other for the whole frame.
//!
//! # Limitations
//! Binding is first-match-wins and permanent. A better device connected later
//! is ignored, and disconnection is not handled: the resolver keeps reading
//! the original device, which typically reports itself invalid.

use crate::binding::{BindState, DeviceBinding};
use crate::config::ResolverConfig;
use crate::device::Device;
use crate::error::InputError;
use crate::feature::{Pose, Vec2};
use crate::input::{Handedness, InputSet, LogicalInput};
use crate::snapshot::{FrameHistory, InputSnapshot};
use tracing::{error, trace};

pub struct ControllerResolver {
    hand: Handedness,
    config: ResolverConfig,
    state: BindState,
    history: FrameHistory,
    frame: u64,
}

impl ControllerResolver {
    /// An unbound resolver for `hand`.
    pub fn new(hand: Handedness, config: ResolverConfig) -> Self {
        Self {
            hand,
            config,
            state: BindState::default(),
            history: FrameHistory::default(),
            frame: 0,
        }
    }

    pub fn hand(&self) -> Handedness {
        self.hand
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Number of completed [`advance`](Self::advance) calls.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Deliver a device-connected notification.
    ///
    /// Matching devices are queued and considered on the next
    /// [`bind`](Self::bind)/[`advance`](Self::advance). The device is returned
    /// when it is not a tracked controller for this hand, or when the hand is
    /// already bound.
    pub fn offer(&mut self, device: Box<dyn Device>) -> Option<Box<dyn Device>> {
        self.state.offer(self.hand, device)
    }

    /// Bind the first queued candidate, if any. Never blocks.
    ///
    /// Returns the binding when the hand is bound (now or earlier).
    pub fn bind(&mut self) -> Option<&DeviceBinding> {
        self.state.try_bind(self.hand, &self.config);
        self.state.binding()
    }

    pub fn binding(&self) -> Option<&DeviceBinding> {
        self.state.binding()
    }

    pub fn is_bound(&self) -> bool {
        self.state.binding().is_some()
    }

    /// Start a new frame: bind from pending candidates, then capture a fresh
    /// snapshot and rotate history.
    ///
    /// Returns `true` when a device was bound during this call.
    pub fn advance(&mut self) -> bool {
        let newly_bound = self.state.try_bind(self.hand, &self.config);
        self.frame += 1;

        let last_pose = self.history.current().pose;
        let next = match self.state.binding() {
            Some(binding) => {
                InputSnapshot::capture(self.frame, binding.strategy(), binding.device(), last_pose)
            }
            None => InputSnapshot::unbound(self.frame),
        };
        self.history.advance(next);
        newly_bound
    }

    /// This frame's snapshot.
    pub fn snapshot(&self) -> &InputSnapshot {
        self.history.current()
    }

    /// Last frame's snapshot.
    pub fn previous_snapshot(&self) -> &InputSnapshot {
        self.history.previous()
    }

    /// Primary stick/pad value; zero when unbound or absent.
    pub fn axis(&self, _input: LogicalInput) -> Vec2 {
        self.history.current().primary_axis
    }

    /// Secondary pad value, reported separately from the primary axis.
    pub fn secondary_axis(&self) -> Vec2 {
        self.history.current().secondary_axis
    }

    /// Analog value of `Trigger` or `Grip` in `[0, 1]`; `0.0` otherwise.
    pub fn scalar(&self, input: LogicalInput) -> f32 {
        let snap = self.history.current();
        match input {
            LogicalInput::Trigger => snap.trigger,
            LogicalInput::Grip => snap.grip,
            _ => 0.0,
        }
    }

    pub fn is_held(&self, input: LogicalInput) -> bool {
        self.history.current().is_held(input)
    }

    /// Touch state through the bound family's touch table.
    ///
    /// Unbound or untracked hands and families without touch sensing report
    /// `Ok(false)`. An input the table has no entry for is an error. Both are
    /// decided by the frame's snapshot, so a mid-frame [`bind`](Self::bind)
    /// takes effect on the next [`advance`](Self::advance).
    pub fn is_touched(&self, input: LogicalInput) -> Result<bool, InputError> {
        let snap = self.history.current();
        if let Some(err) = snap.touch_error(input) {
            error!(hand = %self.hand, %err, "touch query without a mapping");
            return Err(err);
        }
        Ok(snap.is_touched(input))
    }

    /// Held this frame and not held last frame.
    pub fn went_down(&self, input: LogicalInput) -> bool {
        self.history.went_down(input)
    }

    /// Held last frame and not held this frame.
    pub fn went_up(&self, input: LogicalInput) -> bool {
        self.history.went_up(input)
    }

    pub fn pressed_edges(&self) -> InputSet {
        self.history.pressed()
    }

    pub fn released_edges(&self) -> InputSet {
        self.history.released()
    }

    /// Bound and reported valid by the device as of this frame.
    pub fn is_tracked(&self) -> bool {
        self.history.current().tracked
    }

    /// Last known device pose.
    pub fn pose(&self) -> Option<Pose> {
        self.history.current().pose
    }

    /// Scroll input, taken from the primary stick while tracked.
    pub fn scroll_delta(&self) -> Vec2 {
        if self.is_tracked() {
            self.history.current().primary_axis
        } else {
            Vec2::ZERO
        }
    }

    /// Best-effort haptic pulse. Silently does nothing when unbound, disabled
    /// in config, or unsupported by the device.
    pub fn trigger_haptics(&mut self, seconds: f32) {
        if !self.config.haptics || seconds.is_nan() || seconds <= 0.0 {
            return;
        }
        let hand = self.hand;
        if let Some(binding) = self.state.binding_mut() {
            let sent = binding.device_mut().send_haptic(seconds);
            trace!(%hand, seconds, sent, "haptic pulse");
        }
    }
}

impl std::fmt::Debug for ControllerResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerResolver")
            .field("hand", &self.hand)
            .field("frame", &self.frame)
            .field("binding", &self.state.binding())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::virtual_input::{VirtualDevice, VirtualHandle};
    use crate::feature::{AxisFeature, BoolFeature, ScalarFeature};
    use crate::mapping::DeviceFamily;

    fn bound(family: DeviceFamily) -> (ControllerResolver, VirtualHandle) {
        let mut r = ControllerResolver::new(Handedness::Left, ResolverConfig::fixed(family));
        let dev = VirtualDevice::controller("left", "Left", true).with_haptics();
        let handle = dev.handle();
        assert!(r.offer(Box::new(dev)).is_none());
        (r, handle)
    }

    #[test]
    fn bind_is_explicit_and_non_blocking() {
        let mut r = ControllerResolver::new(Handedness::Left, ResolverConfig::default());
        assert!(r.bind().is_none());
        r.offer(Box::new(VirtualDevice::controller("l", "L", true)));
        assert!(!r.is_bound());
        assert_eq!(r.bind().map(|b| b.device_id()), Some("l"));
        // Already bound before the first frame: advance reports no new binding.
        assert!(!r.advance());
    }

    #[test]
    fn advance_binds_pending_candidate() {
        let (mut r, _h) = bound(DeviceFamily::GenericXr);
        assert!(r.advance());
        assert!(!r.advance());
        assert_eq!(r.frame(), 2);
    }

    #[test]
    fn queries_do_not_change_within_a_frame() {
        let (mut r, h) = bound(DeviceFamily::GenericXr);
        h.set_bool(BoolFeature::PrimaryButton, true);
        r.advance();
        assert!(r.went_down(LogicalInput::ButtonPrimaryA));

        // Sample changes mid-frame are not visible until the next advance.
        h.set_bool(BoolFeature::PrimaryButton, false);
        assert!(r.is_held(LogicalInput::ButtonPrimaryA));
        assert!(r.went_down(LogicalInput::ButtonPrimaryA));

        r.advance();
        assert!(!r.is_held(LogicalInput::ButtonPrimaryA));
        assert!(r.went_up(LogicalInput::ButtonPrimaryA));
    }

    #[test]
    fn scalar_and_axes() {
        let (mut r, h) = bound(DeviceFamily::OculusStyle);
        h.set_scalar(ScalarFeature::Trigger, 0.75);
        h.set_scalar(ScalarFeature::Grip, 0.5);
        h.set_axis(AxisFeature::Primary2DAxis, Vec2::new(0.1, -0.3));
        h.set_axis(AxisFeature::Secondary2DAxis, Vec2::new(0.9, 0.9));
        r.advance();

        assert_eq!(r.scalar(LogicalInput::Trigger), 0.75);
        assert_eq!(r.scalar(LogicalInput::Grip), 0.5);
        assert_eq!(r.scalar(LogicalInput::Any), 0.0);
        assert_eq!(r.axis(LogicalInput::Touchpad), Vec2::new(0.1, -0.3));
        assert_eq!(r.secondary_axis(), Vec2::new(0.9, 0.9));
        assert_eq!(r.scroll_delta(), Vec2::new(0.1, -0.3));
    }

    #[test]
    fn invalid_device_reads_as_idle_and_untracked() {
        let (mut r, h) = bound(DeviceFamily::GenericXr);
        h.set_bool(BoolFeature::TriggerButton, true);
        h.set_axis(AxisFeature::Primary2DAxis, Vec2::new(1.0, 0.0));
        h.set_valid(false);
        r.advance();

        assert!(r.is_bound());
        assert!(!r.is_tracked());
        assert!(!r.is_held(LogicalInput::Trigger));
        assert_eq!(r.is_touched(LogicalInput::Trigger), Ok(false));
        assert_eq!(r.is_touched(LogicalInput::Grip), Ok(false));
        assert_eq!(r.scroll_delta(), Vec2::ZERO);
    }

    #[test]
    fn pose_components_update_independently() {
        let (mut r, h) = bound(DeviceFamily::GenericXr);
        r.advance();
        assert_eq!(r.pose(), None);

        h.set_position(Some([1.0, 2.0, 3.0]));
        r.advance();
        let pose = r.pose().unwrap();
        assert_eq!(pose.position, [1.0, 2.0, 3.0]);
        assert_eq!(pose.orientation, [0.0, 0.0, 0.0, 1.0]);

        h.set_position(None);
        h.set_rotation(Some([0.0, 1.0, 0.0, 0.0]));
        r.advance();
        let pose = r.pose().unwrap();
        assert_eq!(pose.position, [1.0, 2.0, 3.0]);
        assert_eq!(pose.orientation, [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn unmapped_touch_is_an_error_only_when_bound() {
        let (mut r, _h) = bound(DeviceFamily::GenericXr);
        assert_eq!(r.is_touched(LogicalInput::Trigger), Ok(false));
        r.advance();
        assert_eq!(
            r.is_touched(LogicalInput::Trigger),
            Err(InputError::UnmappedTouch {
                input: LogicalInput::Trigger,
                family: DeviceFamily::GenericXr,
            })
        );
    }

    #[test]
    fn mid_frame_bind_waits_for_next_advance() {
        let mut r = ControllerResolver::new(
            Handedness::Right,
            ResolverConfig::fixed(DeviceFamily::GenericXr),
        );
        r.advance();
        let before = r.is_touched(LogicalInput::Trigger);

        let dev = VirtualDevice::controller("r", "R", false);
        dev.handle().set_bool(BoolFeature::TriggerButton, true);
        r.offer(Box::new(dev));
        assert!(r.bind().is_some());

        assert_eq!(before, Ok(false));
        assert_eq!(r.is_touched(LogicalInput::Trigger), Ok(false));
        assert!(!r.is_held(LogicalInput::Trigger));
        assert!(!r.is_tracked());

        r.advance();
        assert!(r.is_touched(LogicalInput::Trigger).is_err());
        assert!(r.is_held(LogicalInput::Trigger));
        assert!(r.is_tracked());
    }

    #[test]
    fn haptics_forwarded_only_when_bound_and_enabled() {
        let (mut r, h) = bound(DeviceFamily::GenericXr);
        r.trigger_haptics(0.1);
        assert!(h.haptic_log().is_empty());

        r.advance();
        r.trigger_haptics(0.1);
        r.trigger_haptics(0.0);
        r.trigger_haptics(f32::NAN);
        r.trigger_haptics(-1.0);
        assert_eq!(h.haptic_log(), vec![0.1]);

        let mut cfg = ResolverConfig::fixed(DeviceFamily::GenericXr);
        cfg.haptics = false;
        let mut quiet = ControllerResolver::new(Handedness::Right, cfg);
        let dev = VirtualDevice::controller("r", "R", false).with_haptics();
        let qh = dev.handle();
        quiet.offer(Box::new(dev));
        quiet.advance();
        quiet.trigger_haptics(0.2);
        assert!(qh.haptic_log().is_empty());
    }
}
