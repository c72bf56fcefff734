use xrpoll::backends::virtual_input::create_virtual_pair;
use xrpoll::logger::Logger;
use xrpoll::{
    AxisFeature, BoolFeature, EventFilter, Handedness, LogicalInput, Manager, ResolverConfig,
    ScalarFeature, Vec2,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_target(false)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ResolverConfig::load(&path).expect("load config"),
        None => ResolverConfig::default(),
    };

    let mut rig = Manager::new(config);
    rig.bus_mut().add_listener(Logger::new(), EventFilter::All, None);

    let ((left, lh), (right, rh)) = create_virtual_pair();
    rig.connect(left);
    rig.connect(right);

    // Scripted trigger pull on the right hand, stick sweep on the left.
    for frame in 0..8u32 {
        let t = frame as f32 / 7.0;
        rh.set_scalar(ScalarFeature::Trigger, t);
        rh.set_bool(BoolFeature::TriggerButton, t > 0.5);
        lh.set_axis(AxisFeature::Primary2DAxis, Vec2::new(t * 2.0 - 1.0, 0.0));
        lh.set_bool(BoolFeature::Primary2DAxisClick, frame == 3);

        rig.advance();

        let right = rig.hand(Handedness::Right);
        if right.went_down(LogicalInput::Trigger) {
            println!("frame {}: trigger down at {:.2}", right.frame(), right.scalar(LogicalInput::Trigger));
        }
        let left = rig.hand(Handedness::Left);
        println!(
            "{}",
            serde_json::to_string(left.snapshot()).expect("snapshot serializes")
        );
    }
}
