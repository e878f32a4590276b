//! In-memory `MapSdk` that records every call. Test-only.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::SdkError;
use crate::geo::{Coordinate, Point};
use crate::project::{CalloutDelegate, ContentSlot};
use crate::sdk::{EntitySpec, Handle, Listener, ListenerId, MapSdk, NativeEvent, PropertyValue};

pub type FakeNode = &'static str;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create { handle: Handle, kind: &'static str, parent: Option<Handle> },
    Destroy(Handle),
    Set { handle: Handle, name: String, value: PropertyValue },
    Clear { handle: Handle, name: String },
    Listen { handle: Handle, event: String },
    Unlisten { handle: Handle, event: String },
    Delegate { handle: Handle, slots: Vec<ContentSlot> },
    Undelegate(Handle),
}

#[derive(Debug, Clone)]
pub struct FakeEntity {
    pub spec: EntitySpec<FakeNode>,
    pub parent: Option<Handle>,
    pub properties: BTreeMap<String, PropertyValue>,
    pub delegate: Option<CalloutDelegate<FakeNode>>,
}

#[derive(Default)]
struct State {
    next_id: u64,
    unavailable: bool,
    fail_create: Option<String>,
    entities: BTreeMap<Handle, FakeEntity>,
    listeners: BTreeMap<ListenerId, (Handle, String, Listener)>,
    calls: Vec<Call>,
}

#[derive(Clone, Default)]
pub struct FakeSdk {
    state: Rc<RefCell<State>>,
}

impl FakeSdk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.borrow_mut().unavailable = unavailable;
    }

    /// The next `create_entity` throws with `message`.
    pub fn fail_next_create(&self, message: &str) {
        self.state.borrow_mut().fail_create = Some(message.to_owned());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn count_calls(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn creates(&self) -> usize {
        self.count_calls(|c| matches!(c, Call::Create { .. }))
    }

    pub fn destroys(&self) -> usize {
        self.count_calls(|c| matches!(c, Call::Destroy(_)))
    }

    pub fn live_count(&self) -> usize {
        self.state.borrow().entities.len()
    }

    pub fn is_live(&self, handle: Handle) -> bool {
        self.state.borrow().entities.contains_key(&handle)
    }

    pub fn entity(&self, handle: Handle) -> Option<FakeEntity> {
        self.state.borrow().entities.get(&handle).cloned()
    }

    pub fn property(&self, handle: Handle, name: &str) -> Option<PropertyValue> {
        self.state.borrow().entities.get(&handle)?.properties.get(name).cloned()
    }

    /// Simulate the SDK changing a property on its own (drag, pan, ...).
    pub fn poke_property(&self, handle: Handle, name: &str, value: PropertyValue) {
        if let Some(entity) = self.state.borrow_mut().entities.get_mut(&handle) {
            entity.properties.insert(name.to_owned(), value);
        }
    }

    pub fn delegate(&self, handle: Handle) -> Option<CalloutDelegate<FakeNode>> {
        self.state.borrow().entities.get(&handle)?.delegate.clone()
    }

    pub fn listener_count(&self, handle: Handle, event: &str) -> usize {
        self.state
            .borrow()
            .listeners
            .values()
            .filter(|(h, e, _)| *h == handle && e == event)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Deliver `event` to every listener attached for (`handle`, `name`).
    pub fn emit(&self, handle: Handle, name: &str, event: &NativeEvent) {
        let listeners: Vec<Listener> = self
            .state
            .borrow()
            .listeners
            .values()
            .filter(|(h, e, _)| *h == handle && e == name)
            .map(|(_, _, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    fn next_id(state: &mut State) -> u64 {
        state.next_id += 1;
        state.next_id
    }
}

impl MapSdk for FakeSdk {
    type Node = FakeNode;

    fn create_entity(
        &self,
        parent: Option<Handle>,
        spec: EntitySpec<FakeNode>,
    ) -> Result<Handle, SdkError> {
        let mut state = self.state.borrow_mut();
        let kind = spec.kind();
        if state.unavailable {
            return Err(SdkError::Unavailable);
        }
        if let Some(message) = state.fail_create.take() {
            return Err(SdkError::Create { kind, message });
        }
        if let Some(parent) = parent
            && !state.entities.contains_key(&parent)
        {
            return Err(SdkError::ParentMissing);
        }
        let handle = Handle::new(Self::next_id(&mut state));
        let mut properties = BTreeMap::new();
        match &spec {
            EntitySpec::Map { initial_region: Some(region), .. } => {
                properties.insert("region".to_owned(), PropertyValue::Region(*region));
            }
            EntitySpec::Annotation { coordinate, .. } | EntitySpec::Marker { coordinate } => {
                properties.insert("coordinate".to_owned(), PropertyValue::Coordinate(*coordinate));
            }
            _ => {}
        }
        state.entities.insert(handle, FakeEntity { spec, parent, properties, delegate: None });
        state.calls.push(Call::Create { handle, kind, parent });
        Ok(handle)
    }

    fn destroy_entity(&self, handle: Handle) {
        let mut state = self.state.borrow_mut();
        state.entities.remove(&handle);
        state.entities.retain(|_, e| e.parent != Some(handle));
        state.calls.push(Call::Destroy(handle));
    }

    fn set_property(&self, handle: Handle, name: &str, value: &PropertyValue) {
        let mut state = self.state.borrow_mut();
        if let Some(entity) = state.entities.get_mut(&handle) {
            entity.properties.insert(name.to_owned(), value.clone());
        }
        state.calls.push(Call::Set { handle, name: name.to_owned(), value: value.clone() });
    }

    fn clear_property(&self, handle: Handle, name: &str) {
        let mut state = self.state.borrow_mut();
        if let Some(entity) = state.entities.get_mut(&handle) {
            entity.properties.remove(name);
        }
        state.calls.push(Call::Clear { handle, name: name.to_owned() });
    }

    fn read_property(&self, handle: Handle, name: &str) -> Option<PropertyValue> {
        self.property(handle, name)
    }

    fn add_event_listener(&self, handle: Handle, event: &str, listener: Listener) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId::new(Self::next_id(&mut state));
        state.listeners.insert(id, (handle, event.to_owned(), listener));
        state.calls.push(Call::Listen { handle, event: event.to_owned() });
        id
    }

    fn remove_event_listener(&self, handle: Handle, event: &str, id: ListenerId) {
        let mut state = self.state.borrow_mut();
        state.listeners.remove(&id);
        state.calls.push(Call::Unlisten { handle, event: event.to_owned() });
    }

    fn set_callout_delegate(&self, handle: Handle, delegate: Option<CalloutDelegate<FakeNode>>) {
        let mut state = self.state.borrow_mut();
        let call = match &delegate {
            Some(d) => Call::Delegate { handle, slots: d.slots().collect() },
            None => Call::Undelegate(handle),
        };
        if let Some(entity) = state.entities.get_mut(&handle) {
            entity.delegate = delegate;
        }
        state.calls.push(call);
    }

    /// Deterministic projection: ten pixels per degree, y is latitude.
    fn convert_point_on_page(&self, handle: Handle, point: Point) -> Option<Coordinate> {
        self.is_live(handle).then(|| Coordinate::new(point.y / 10.0, point.x / 10.0))
    }
}
