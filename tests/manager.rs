use std::sync::{Arc, Mutex};
use xrpoll::backends::virtual_input::{create_virtual_pair, VirtualDevice};
use xrpoll::filtered_listener::FilteredListener;
use xrpoll::logger::Logger;
use xrpoll::{
    BoolFeature, Characteristics, DeviceFamily, EventFilter, Handedness, InputEvent, InputKind,
    InputListener, LogicalInput, Manager, ResolverConfig,
};

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<InputEvent>>>);

impl InputListener for Recorder {
    fn on_input(&mut self, event: &InputEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

impl Recorder {
    fn kinds(&self) -> Vec<(Handedness, InputKind)> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .map(|e| (e.hand, e.kind.clone()))
            .collect()
    }
}

#[test]
fn routes_devices_to_matching_hands() {
    let mut rig = Manager::default();
    let ((left, _), (right, _)) = create_virtual_pair();
    let headset = VirtualDevice::new(
        "hmd",
        "Headset",
        Characteristics::HEAD_MOUNTED | Characteristics::TRACKED_DEVICE,
    );

    rig.connect(right);
    rig.connect(headset);
    rig.connect(left);
    rig.advance();

    let left_id = rig.hand(Handedness::Left).binding().map(|b| b.device_id());
    let right_id = rig.hand(Handedness::Right).binding().map(|b| b.device_id());
    assert_eq!(left_id, Some("virtual:left"));
    assert_eq!(right_id, Some("virtual:right"));
}

#[test]
fn publishes_bound_then_edges() {
    let mut rig = Manager::new(ResolverConfig::fixed(DeviceFamily::GenericXr));
    let rec = Recorder::default();
    rig.bus_mut().add_listener(rec.clone(), EventFilter::All, None);
    rig.bus_mut().add_listener(Logger::new(), EventFilter::All, None);

    let ((left, lh), _) = create_virtual_pair();
    lh.set_bool(BoolFeature::SecondaryButton, true);
    rig.connect(left);

    let events = rig.advance();
    assert_eq!(events.len(), rec.kinds().len());
    assert_eq!(
        rec.kinds(),
        vec![
            (
                Handedness::Left,
                InputKind::Bound {
                    device_id: "virtual:left".into(),
                    family: DeviceFamily::GenericXr,
                }
            ),
            (
                Handedness::Left,
                InputKind::Pressed {
                    input: LogicalInput::ButtonSecondaryA
                }
            ),
            (
                Handedness::Left,
                InputKind::Pressed {
                    input: LogicalInput::ButtonSecondaryB
                }
            ),
            (
                Handedness::Left,
                InputKind::Pressed {
                    input: LogicalInput::ButtonSecondaryC
                }
            ),
            (Handedness::Left, InputKind::Pressed { input: LogicalInput::Any }),
        ]
    );

    lh.set_bool(BoolFeature::SecondaryButton, false);
    let events = rig.advance();
    assert_eq!(events.len(), 4);
    assert!(events.iter().all(|e| e.is_release() && e.frame == 2));
}

#[test]
fn hand_tagged_filtered_listener() {
    let mut rig = Manager::default();
    let rec = Recorder::default();
    rig.bus_mut().add_listener(
        FilteredListener::new(|e| e.input() == Some(LogicalInput::Trigger), rec.clone()),
        EventFilter::PressesOnly,
        Some(Handedness::Right),
    );

    let ((left, lh), (right, rh)) = create_virtual_pair();
    rig.connect(left);
    rig.connect(right);
    rig.advance();

    lh.set_bool(BoolFeature::TriggerButton, true);
    rh.set_bool(BoolFeature::TriggerButton, true);
    rh.set_bool(BoolFeature::GripButton, true);
    rig.advance();
    rh.set_bool(BoolFeature::TriggerButton, false);
    rig.advance();

    assert_eq!(
        rec.kinds(),
        vec![(
            Handedness::Right,
            InputKind::Pressed {
                input: LogicalInput::Trigger
            }
        )]
    );
}

#[test]
fn haptics_reach_the_bound_device() {
    let mut rig = Manager::default();
    let right = VirtualDevice::controller("r", "Right", false).with_haptics();
    let rh = right.handle();
    rig.connect(right);
    rig.advance();

    rig.hand_mut(Handedness::Right).trigger_haptics(0.05);
    // Unbound hand: silently ignored.
    rig.hand_mut(Handedness::Left).trigger_haptics(0.05);
    assert_eq!(rh.haptic_log(), vec![0.05]);
}
