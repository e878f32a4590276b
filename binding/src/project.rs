//! Content projection into SDK-owned DOM.
//!
//! Annotation bodies and callout panels are rendered by the component into
//! detached containers. The SDK asks for those containers lazily: the body
//! through the element factory given at creation, the callout parts through
//! a delegate. The delegate only answers for slots that were provided, so the
//! SDK reserves no space for the rest.

#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;

use crate::sdk::{Handle, MapSdk};

/// One place declarative content can be projected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentSlot {
    /// The annotation body.
    Primary,
    CalloutContent,
    CalloutLeftAccessory,
    CalloutRightAccessory,
    /// Replaces the whole callout.
    CalloutElement,
}

impl ContentSlot {
    /// Slots served through the callout delegate, in delegate key order.
    pub const CALLOUT: [Self; 4] = [
        Self::CalloutElement,
        Self::CalloutLeftAccessory,
        Self::CalloutRightAccessory,
        Self::CalloutContent,
    ];

    /// Delegate method MapKit calls for this slot.
    #[must_use]
    pub fn delegate_key(self) -> Option<&'static str> {
        match self {
            Self::Primary => None,
            Self::CalloutContent => Some("calloutContentForAnnotation"),
            Self::CalloutLeftAccessory => Some("calloutLeftAccessoryForAnnotation"),
            Self::CalloutRightAccessory => Some("calloutRightAccessoryForAnnotation"),
            Self::CalloutElement => Some("calloutElementForAnnotation"),
        }
    }
}

/// Containers for the callout slots that were provided.
///
/// A present slot holding an empty container is still present: the caller
/// asked for the slot, it just has nothing in it yet.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSet<N> {
    pub content: Option<N>,
    pub left_accessory: Option<N>,
    pub right_accessory: Option<N>,
    pub element: Option<N>,
}

impl<N> Default for SlotSet<N> {
    fn default() -> Self {
        Self { content: None, left_accessory: None, right_accessory: None, element: None }
    }
}

impl<N> SlotSet<N> {
    #[must_use]
    pub fn get(&self, slot: ContentSlot) -> Option<&N> {
        match slot {
            ContentSlot::Primary => None,
            ContentSlot::CalloutContent => self.content.as_ref(),
            ContentSlot::CalloutLeftAccessory => self.left_accessory.as_ref(),
            ContentSlot::CalloutRightAccessory => self.right_accessory.as_ref(),
            ContentSlot::CalloutElement => self.element.as_ref(),
        }
    }

    #[must_use]
    pub fn with(mut self, slot: ContentSlot, node: N) -> Self {
        match slot {
            ContentSlot::Primary => {}
            ContentSlot::CalloutContent => self.content = Some(node),
            ContentSlot::CalloutLeftAccessory => self.left_accessory = Some(node),
            ContentSlot::CalloutRightAccessory => self.right_accessory = Some(node),
            ContentSlot::CalloutElement => self.element = Some(node),
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        ContentSlot::CALLOUT.iter().all(|&slot| self.get(slot).is_none())
    }

    /// Populated slots in delegate key order.
    pub fn populated(&self) -> impl Iterator<Item = ContentSlot> + '_ {
        ContentSlot::CALLOUT.into_iter().filter(move |&slot| self.get(slot).is_some())
    }
}

/// The lazy accessor object handed to the SDK. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CalloutDelegate<N> {
    slots: SlotSet<N>,
}

impl<N> CalloutDelegate<N> {
    /// Build a delegate, or `None` when no slot is populated.
    #[must_use]
    pub fn from_slots(slots: SlotSet<N>) -> Option<Self> {
        (!slots.is_empty()).then_some(Self { slots })
    }

    #[must_use]
    pub fn content_node(&self, slot: ContentSlot) -> Option<&N> {
        self.slots.get(slot)
    }

    /// Slots the delegate answers for.
    pub fn slots(&self) -> impl Iterator<Item = ContentSlot> + '_ {
        self.slots.populated()
    }
}

/// Keeps the callout delegate on one handle in step with the slot containers.
#[derive(Debug)]
pub struct ContentProjector<N> {
    attached: Option<(Handle, SlotSet<N>)>,
}

impl<N> Default for ContentProjector<N> {
    fn default() -> Self {
        Self { attached: None }
    }
}

impl<N: Clone + PartialEq> ContentProjector<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach, replace or remove the delegate as a unit.
    pub fn sync<S: MapSdk<Node = N>>(&mut self, sdk: &S, handle: Option<Handle>, slots: &SlotSet<N>) {
        let Some(handle) = handle else {
            self.detach(sdk);
            return;
        };
        if let Some((current, attached)) = &self.attached
            && *current == handle
            && attached == slots
        {
            return;
        }
        if let Some((current, _)) = &self.attached
            && *current != handle
        {
            self.detach(sdk);
        }
        sdk.set_callout_delegate(handle, CalloutDelegate::from_slots(slots.clone()));
        self.attached = Some((handle, slots.clone()));
    }

    /// Remove the delegate from the attached handle. Safe to call repeatedly.
    pub fn detach<S: MapSdk<Node = N>>(&mut self, sdk: &S) {
        if let Some((handle, _)) = self.attached.take() {
            sdk.set_callout_delegate(handle, None);
        }
    }
}
