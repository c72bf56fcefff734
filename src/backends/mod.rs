//! Device backends for `xrpoll`.
//!
//! Implementations of [`Device`](crate::device::Device) shipped with the crate.
//! Real runtimes (OpenXR, engine input layers) implement the trait on the host
//! side and deliver devices through
//! [`Manager::connect`](crate::manager::Manager::connect).
//!
//! # Feature flags
//! - **`virtual`** (default): scriptable in-memory controllers.

#[cfg(any(test, feature = "virtual"))]
#[cfg_attr(docsrs, doc(cfg(feature = "virtual")))]
pub mod virtual_input;
