//! Property reconciliation: declarative props struct → SDK property writes.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::collections::HashMap;

use crate::error::ConfigError;
use crate::sdk::{Handle, MapSdk, PropertyValue};

/// Ordered `(sdk_name, value)` pairs. `None` means "reset to the SDK default".
pub type PropertyList = Vec<(&'static str, Option<PropertyValue>)>;

/// A props struct that knows how to translate itself into SDK properties.
pub trait PropertySet {
    /// Translate every field.
    ///
    /// # Errors
    ///
    /// Fails on invalid combinations before anything is written.
    fn properties(&self) -> Result<PropertyList, ConfigError>;
}

/// Remembers what was last written to one handle and writes only the difference.
#[derive(Debug, Default)]
pub struct PropertySync {
    handle: Option<Handle>,
    applied: HashMap<&'static str, Option<PropertyValue>>,
}

impl PropertySync {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply every entry of `props` that differs from what this handle last saw.
    ///
    /// Returns the number of SDK writes performed. Without a handle nothing
    /// happens and tracking is dropped.
    ///
    /// # Errors
    ///
    /// Returns the props' [`ConfigError`]; no property is written in that case.
    pub fn reconcile<S: MapSdk>(
        &mut self,
        sdk: &S,
        handle: Option<Handle>,
        props: &impl PropertySet,
    ) -> Result<usize, ConfigError> {
        let Some(handle) = handle else {
            self.reset();
            return Ok(0);
        };
        let list = props.properties().inspect_err(|err| {
            log::error!("rejecting properties for {handle:?}: {err}");
        })?;
        if self.handle != Some(handle) {
            self.applied.clear();
            self.handle = Some(handle);
        }

        let mut writes = 0;
        for (name, value) in list {
            if self.applied.get(name) == Some(&value) {
                continue;
            }
            match &value {
                Some(value) => sdk.set_property(handle, name, value),
                None => sdk.clear_property(handle, name),
            }
            self.applied.insert(name, value);
            writes += 1;
        }
        Ok(writes)
    }

    /// Forget the tracked handle so the next reconcile writes everything.
    pub fn reset(&mut self) {
        self.handle = None;
        self.applied.clear();
    }
}
