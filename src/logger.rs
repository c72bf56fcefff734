use crate::event::{InputEvent, InputKind};
use crate::eventbus::InputListener;
use tracing::{debug, info};

/// A listener that logs every input event through `tracing`.
///
/// Bindings are logged at `info`, press/release edges at `debug`.
#[derive(Debug, Default)]
pub struct Logger;

impl Logger {
    pub fn new() -> Self {
        Logger
    }
}

impl InputListener for Logger {
    fn on_input(&mut self, event: &InputEvent) {
        match &event.kind {
            InputKind::Bound { device_id, family } => {
                info!(hand = %event.hand, frame = event.frame, device_id = device_id.as_str(), %family, "[Input] bound");
            }
            InputKind::Pressed { input } => {
                debug!(hand = %event.hand, frame = event.frame, %input, "[Input] pressed");
            }
            InputKind::Released { input } => {
                debug!(hand = %event.hand, frame = event.frame, %input, "[Input] released");
            }
        }
    }
}
