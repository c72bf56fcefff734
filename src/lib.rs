//! xrpoll: debounced input resolution for tracked VR controllers.
//!
//! Translates raw per-frame device features (buttons, touch sensors, triggers,
//! sticks, pose) into device-independent [`LogicalInput`] queries per hand,
//! with per-family mapping tables and edge-triggered press detection.
//!
//! - [`ControllerResolver`]: one hand; bind, advance, query.
//! - [`Manager`]: both hands plus an [`InputEventBus`] for press/release events.
//! - [`Device`]: the contract the host platform implements.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod backends;
pub mod binding;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod feature;
pub mod filtered_listener;
pub mod input;
pub mod logger;
pub mod manager;
pub mod mapping;
pub mod metadata;
pub mod resolver;
pub mod snapshot;

pub use binding::*;
pub use config::*;
pub use device::*;
pub use error::*;
pub use event::*;
pub use eventbus::*;
pub use feature::*;
pub use input::*;
pub use manager::*;
pub use mapping::*;
pub use metadata::*;
pub use resolver::*;
pub use snapshot::*;
