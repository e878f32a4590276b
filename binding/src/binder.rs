//! Entity lifecycle: one live SDK handle per (context, identity) pair.
//!
//! The binder owns the handle slot. A handle is created when both the
//! context and the identity inputs are present, replaced in the same call
//! when either changes, and destroyed exactly once on context loss or
//! teardown. The slot is taken before destroying, so a second teardown finds
//! nothing to destroy.

#[cfg(test)]
#[path = "binder_test.rs"]
mod binder_test;

use crate::error::SdkError;
use crate::sdk::{EntitySpec, Handle, MapSdk};

/// What a child entity attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// The SDK is loaded; used by the map itself.
    Sdk,
    /// A live map; used by annotations and overlays.
    Map(Handle),
}

impl Context {
    /// Parent handle passed to `create_entity`.
    #[must_use]
    pub fn parent(self) -> Option<Handle> {
        match self {
            Self::Sdk => None,
            Self::Map(handle) => Some(handle),
        }
    }
}

/// Outcome of one [`EntityBinder::sync`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No context or no identity, and nothing was live.
    Idle,
    Unchanged(Handle),
    Created(Handle),
    Replaced { old: Handle, new: Handle },
    Destroyed(Handle),
}

impl Transition {
    /// True when a handle came into existence during this call.
    #[must_use]
    pub fn created(self) -> bool {
        matches!(self, Self::Created(_) | Self::Replaced { .. })
    }
}

#[derive(Debug)]
struct Live<I> {
    context: Context,
    identity: I,
    handle: Handle,
}

#[derive(Debug)]
pub struct EntityBinder<I> {
    live: Option<Live<I>>,
}

impl<I> Default for EntityBinder<I> {
    fn default() -> Self {
        Self { live: None }
    }
}

impl<I: Clone + PartialEq> EntityBinder<I> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn handle(&self) -> Option<Handle> {
        self.live.as_ref().map(|live| live.handle)
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// True when a sync with these inputs would leave the handle untouched.
    #[must_use]
    pub fn is_current(&self, context: Option<Context>, identity: Option<&I>) -> bool {
        match (&self.live, context, identity) {
            (Some(live), Some(context), Some(identity)) => {
                live.context == context && live.identity == *identity
            }
            (None, None, _) | (None, _, None) => true,
            _ => false,
        }
    }

    /// Bring the live handle in line with `context` and `identity`.
    ///
    /// `build` is only called when a new entity is needed. Callers that hold
    /// listeners or delegates on the current handle must release them first
    /// whenever [`Self::is_current`] is false.
    ///
    /// # Errors
    ///
    /// Propagates the SDK's construction error. Any previous handle has
    /// already been destroyed by then, so the binder is left empty.
    pub fn sync<S: MapSdk>(
        &mut self,
        sdk: &S,
        context: Option<Context>,
        identity: Option<&I>,
        build: impl FnOnce(&I) -> EntitySpec<S::Node>,
    ) -> Result<Transition, SdkError> {
        let (Some(context), Some(identity)) = (context, identity) else {
            return Ok(match self.teardown(sdk) {
                Some(old) => Transition::Destroyed(old),
                None => Transition::Idle,
            });
        };

        if let Some(live) = &self.live
            && live.context == context
            && live.identity == *identity
        {
            return Ok(Transition::Unchanged(live.handle));
        }

        let old = self.teardown(sdk);
        let spec = build(identity);
        let kind = spec.kind();
        let handle = sdk.create_entity(context.parent(), spec).inspect_err(|err| {
            log::error!("{kind} creation failed: {err}");
        })?;
        self.live = Some(Live { context, identity: identity.clone(), handle });

        Ok(match old {
            Some(old) => {
                log::debug!("{kind} {old:?} replaced by {handle:?}");
                Transition::Replaced { old, new: handle }
            }
            None => {
                log::debug!("{kind} created as {handle:?}");
                Transition::Created(handle)
            }
        })
    }

    /// Destroy the live handle, if any. Safe to call repeatedly.
    pub fn teardown<S: MapSdk>(&mut self, sdk: &S) -> Option<Handle> {
        let live = self.live.take()?;
        sdk.destroy_entity(live.handle);
        log::debug!("entity {:?} destroyed", live.handle);
        Some(live.handle)
    }
}
