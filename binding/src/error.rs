//! Error taxonomy for the binding layer.
//!
//! Configuration errors are the caller's fault and are returned synchronously
//! from reconciliation. Load errors happen inside asynchronous script
//! callbacks and are delivered to an error callback instead. A missing
//! context or handle is not an error at all; the binding units no-op.

use crate::consts::{LOAD_STATUS_INIT_FAILED, LOAD_STATUS_SCRIPT_FAILED, LOAD_STATUS_UNAVAILABLE};

/// Invalid declarative configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A value outside a closed enumeration (map type, visibility, ...).
    #[error("invalid {kind} value: {value:?}")]
    InvalidValue { kind: &'static str, value: String },
    /// Both the included and excluded point-of-interest lists were supplied.
    #[error("can't specify both included and excluded point-of-interest categories")]
    ConflictingPoiFilters,
}

impl ConfigError {
    pub(crate) fn invalid(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue { kind, value: value.into() }
    }
}

/// The SDK refused an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    /// The SDK global is not present (not loaded yet, or failed to load).
    #[error("mapping SDK is not available")]
    Unavailable,
    /// Constructing an entity threw.
    #[error("failed to create {kind}: {message}")]
    Create { kind: &'static str, message: String },
    /// The parent handle passed to `create_entity` is not live.
    #[error("parent entity is not live")]
    ParentMissing,
}

/// Failure to load or initialize the SDK, reported with a status/message pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (status {status})")]
pub struct LoadError {
    pub status: u16,
    pub message: String,
}

impl LoadError {
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// The script tag fired `error`.
    #[must_use]
    pub fn script_failed() -> Self {
        Self::new(LOAD_STATUS_SCRIPT_FAILED, "Failed to load MapKit JS script.")
    }

    /// The script loaded but the SDK global is missing.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(LOAD_STATUS_UNAVAILABLE, "MapKit JS is not available.")
    }

    /// `init` threw; `message` is the thrown error's message when it had one.
    #[must_use]
    pub fn init_failed(message: Option<String>) -> Self {
        Self::new(
            LOAD_STATUS_INIT_FAILED,
            message.unwrap_or_else(|| "MapKit initialization failed.".to_owned()),
        )
    }
}

/// Anything a controller `sync` can fail with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sdk(#[from] SdkError),
}
