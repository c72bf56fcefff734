//! Error types.
//!
//! Most input conditions are not errors: an unbound hand, an absent feature,
//! or a family without touch sensing all degrade to zero values. The only
//! input-side error is a query the bound family's mapping table has no entry
//! for, which indicates a gap in the table rather than a hardware condition.

use crate::input::LogicalInput;
use crate::mapping::DeviceFamily;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving a logical input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("no touch mapping for {input} on {family} controllers")]
    UnmappedTouch {
        input: LogicalInput,
        family: DeviceFamily,
    },
}

/// Errors raised while loading a [`ResolverConfig`](crate::config::ResolverConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
