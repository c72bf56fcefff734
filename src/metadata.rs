//! Device metadata snapshot.
//!
//! [`DeviceMeta`] is a lightweight, cloneable description of a device suitable
//! for logging, persistence, and choosing a mapping family at bind time.
//! Hosts populate what the platform reports; unknown fields remain `None`.
//!
//! # Conventions
//! - `manufacturer` is the vendor string as reported by the XR runtime
//!   (e.g. `"Oculus"`, `"HTC"`, `"Valve"`).
//! - `name` should be the runtime's device name (e.g. `"Oculus Touch Controller"`).
//! - `serial_number` is opaque and only used for diagnostics.
//!
//! [`ResolverConfig`](crate::config::ResolverConfig) matches its family rules
//! against `manufacturer` and `name`.

use serde::{Deserialize, Serialize};

/// Snapshot of metadata describing a single device.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMeta {
    /// Vendor string from the runtime.
    pub manufacturer: Option<String>,

    /// Human-readable device name.
    pub name: Option<String>,

    /// Device serial number, if the runtime exposes one.
    pub serial_number: Option<String>,
}

impl DeviceMeta {
    /// `true` when `manufacturer` is `vendor`, or starts with `vendor` as a
    /// whole word (`"Meta Platforms, Inc."` for `"Meta"`), ignoring ASCII case.
    pub fn manufacturer_is(&self, vendor: &str) -> bool {
        let Some(manufacturer) = self.manufacturer.as_deref() else {
            return false;
        };
        let Some(head) = manufacturer.get(..vendor.len()) else {
            return false;
        };
        head.eq_ignore_ascii_case(vendor)
            && manufacturer[vendor.len()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric())
    }

    /// `true` when `name` contains `needle`, ignoring ASCII case.
    pub fn name_contains(&self, needle: &str) -> bool {
        contains_ignore_case(self.name.as_deref(), needle)
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_ascii_lowercase().contains(&needle.to_ascii_lowercase()))
}
