//! Resolver configuration.
//!
//! [`ResolverConfig`] decides which [`DeviceFamily`] a newly bound device uses
//! and whether haptic requests are forwarded. It can be built in code or
//! loaded from TOML/JSON:
//!
//! ```toml
//! default_family = "generic_xr"
//! haptics = true
//!
//! [[family_rules]]
//! manufacturer = "Oculus"
//! family = "oculus_style"
//!
//! [[family_rules]]
//! name_contains = "Quest"
//! family = "oculus_style"
//! ```
//!
//! Rules are checked in order; the first rule whose every given field matches
//! wins. A rule with no match fields matches every device.

use crate::error::ConfigError;
use crate::mapping::DeviceFamily;
use crate::metadata::DeviceMeta;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maps device metadata to a mapping family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRule {
    /// Vendor as reported in [`DeviceMeta::manufacturer`]; see
    /// [`DeviceMeta::manufacturer_is`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    /// Case-insensitive substring of [`DeviceMeta::name`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_contains: Option<String>,
    pub family: DeviceFamily,
}

impl FamilyRule {
    pub fn matches(&self, meta: &DeviceMeta) -> bool {
        let manufacturer_ok = self
            .manufacturer
            .as_deref()
            .map_or(true, |m| meta.manufacturer_is(m));
        let name_ok = self
            .name_contains
            .as_deref()
            .map_or(true, |n| meta.name_contains(n));
        manufacturer_ok && name_ok
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Family used when no rule matches.
    #[serde(default)]
    pub default_family: DeviceFamily,

    #[serde(default)]
    pub family_rules: Vec<FamilyRule>,

    /// Forward [`trigger_haptics`](crate::resolver::ControllerResolver::trigger_haptics)
    /// to the device.
    #[serde(default = "default_haptics")]
    pub haptics: bool,
}

fn default_haptics() -> bool {
    true
}

impl Default for ResolverConfig {
    /// Oculus and Meta controllers use the Oculus-style table; everything
    /// else is generic XR.
    fn default() -> Self {
        Self {
            default_family: DeviceFamily::GenericXr,
            family_rules: vec![
                FamilyRule {
                    manufacturer: Some("Oculus".into()),
                    name_contains: None,
                    family: DeviceFamily::OculusStyle,
                },
                FamilyRule {
                    manufacturer: Some("Meta".into()),
                    name_contains: None,
                    family: DeviceFamily::OculusStyle,
                },
            ],
            haptics: true,
        }
    }
}

impl ResolverConfig {
    /// A config that binds every device with `family` and no rules.
    pub fn fixed(family: DeviceFamily) -> Self {
        Self {
            default_family: family,
            family_rules: Vec::new(),
            haptics: true,
        }
    }

    /// Pick the family for a device about to be bound.
    pub fn select_family(&self, meta: &DeviceMeta) -> DeviceFamily {
        self.family_rules
            .iter()
            .find(|rule| rule.matches(meta))
            .map_or(self.default_family, |rule| rule.family)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a `.toml` or `.json` file, chosen by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&text),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&text),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}
