//! Event forwarding from native SDK listeners to user callbacks.
//!
//! An [`EventBinding`] holds at most one native listener. It rebinds when the
//! handle or the callback identity changes and unbinds when either goes away.
//! Native events are run through a payload mapper first; an event the mapper
//! can't translate is logged and dropped rather than forwarded raw.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::fmt;
use std::rc::Rc;

use crate::convert::MapType;
use crate::geo::{Coordinate, CoordinateRegion, Point};
use crate::sdk::{Callback, Handle, ListenerId, MapSdk, NativeEvent};

pub const REGION_CHANGE_START: &str = "region-change-start";
pub const REGION_CHANGE_END: &str = "region-change-end";
pub const MAP_TYPE_CHANGE: &str = "map-type-change";
pub const SINGLE_TAP: &str = "single-tap";
pub const DOUBLE_TAP: &str = "double-tap";
pub const LONG_PRESS: &str = "long-press";
pub const USER_LOCATION_CHANGE: &str = "user-location-change";
pub const USER_LOCATION_ERROR: &str = "user-location-error";
pub const CLICK: &str = "click";
pub const MOUSE_MOVE: &str = "mousemove";
pub const MOUSE_DOWN: &str = "mousedown";
pub const MOUSE_UP: &str = "mouseup";
pub const SELECT: &str = "select";
pub const DESELECT: &str = "deselect";
pub const DRAG_START: &str = "drag-start";
pub const DRAG_END: &str = "drag-end";
pub const DRAGGING: &str = "dragging";

/// Events delivered by the map's DOM element rather than the SDK object.
pub const DOM_EVENTS: [&str; 4] = [CLICK, MOUSE_MOVE, MOUSE_DOWN, MOUSE_UP];

/// Turns a native event into a stable payload, or `None` if it can't.
pub type Mapper<S, P> = fn(&S, Handle, &NativeEvent) -> Option<P>;

type Resolver = Rc<dyn Fn(Point) -> Option<Coordinate>>;

/// A pointer interaction on the map: tap, long press or mouse event.
#[derive(Clone)]
pub struct MapInteraction {
    pub point_on_page: Point,
    resolver: Resolver,
}

impl MapInteraction {
    pub fn new(point_on_page: Point, resolver: impl Fn(Point) -> Option<Coordinate> + 'static) -> Self {
        Self { point_on_page, resolver: Rc::new(resolver) }
    }

    /// Map coordinate under the pointer, if the map is still live.
    #[must_use]
    pub fn to_coordinates(&self) -> Option<Coordinate> {
        (self.resolver)(self.point_on_page)
    }
}

impl fmt::Debug for MapInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapInteraction").field("point_on_page", &self.point_on_page).finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserLocation {
    pub coordinate: Coordinate,
    pub timestamp_ms: Option<f64>,
    pub floor_level: Option<i32>,
}

/// Geolocation failure reason. Codes follow MapKit's `UserLocationError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLocationErrorCode {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    MapkitNotInitialized,
    Other(i32),
}

impl UserLocationErrorCode {
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            4 => Self::MapkitNotInitialized,
            other => Self::Other(other),
        }
    }

    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::PermissionDenied => 1,
            Self::PositionUnavailable => 2,
            Self::Timeout => 3,
            Self::MapkitNotInitialized => 4,
            Self::Other(code) => code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLocationError {
    pub code: UserLocationErrorCode,
    pub message: String,
}

// --- payload mappers ---

pub fn unit<S>(_: &S, _: Handle, _: &NativeEvent) -> Option<()> {
    Some(())
}

/// Region events carry nothing useful; the current region is read back.
pub fn region<S: MapSdk>(sdk: &S, handle: Handle, _: &NativeEvent) -> Option<CoordinateRegion> {
    sdk.read_property(handle, "region")?.as_region()
}

pub fn map_type<S: MapSdk>(sdk: &S, handle: Handle, _: &NativeEvent) -> Option<MapType> {
    let value = sdk.read_property(handle, "mapType")?;
    match MapType::from_sdk(value.as_text()?) {
        Ok(ty) => Some(ty),
        Err(err) => {
            log::warn!("map reported {err}");
            None
        }
    }
}

/// Final position after a drag, read from the entity itself.
pub fn entity_coordinate<S: MapSdk>(sdk: &S, handle: Handle, _: &NativeEvent) -> Option<Coordinate> {
    sdk.read_property(handle, "coordinate")?.as_coordinate()
}

/// Intermediate position while dragging, carried by the event.
pub fn event_coordinate<S>(_: &S, _: Handle, event: &NativeEvent) -> Option<Coordinate> {
    event.coordinate
}

pub fn interaction<S: MapSdk>(sdk: &S, handle: Handle, event: &NativeEvent) -> Option<MapInteraction> {
    let point = event.point_on_page?;
    let sdk = sdk.clone();
    Some(MapInteraction::new(point, move |p| sdk.convert_point_on_page(handle, p)))
}

pub fn user_location<S>(_: &S, _: Handle, event: &NativeEvent) -> Option<UserLocation> {
    Some(UserLocation {
        coordinate: event.coordinate?,
        timestamp_ms: event.timestamp_ms,
        floor_level: event.floor_level,
    })
}

pub fn user_location_error<S>(_: &S, _: Handle, event: &NativeEvent) -> Option<UserLocationError> {
    Some(UserLocationError {
        code: UserLocationErrorCode::from_code(event.code?),
        message: event.message.clone().unwrap_or_default(),
    })
}

// --- binding ---

#[derive(Debug)]
struct Bound<P> {
    handle: Handle,
    callback: Callback<P>,
    listener: ListenerId,
}

/// One named event on one entity, forwarded to at most one callback.
#[derive(Debug)]
pub struct EventBinding<P> {
    event: &'static str,
    bound: Option<Bound<P>>,
}

impl<P: 'static> EventBinding<P> {
    #[must_use]
    pub const fn new(event: &'static str) -> Self {
        Self { event, bound: None }
    }

    #[must_use]
    pub fn event(&self) -> &'static str {
        self.event
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// Bind, rebind or unbind so exactly one listener exists iff both inputs are present.
    pub fn sync<S: MapSdk>(
        &mut self,
        sdk: &S,
        handle: Option<Handle>,
        callback: Option<&Callback<P>>,
        mapper: Mapper<S, P>,
    ) {
        let (Some(handle), Some(callback)) = (handle, callback) else {
            self.unbind(sdk);
            return;
        };
        if let Some(bound) = &self.bound
            && bound.handle == handle
            && bound.callback == *callback
        {
            return;
        }
        self.unbind(sdk);

        let event = self.event;
        let target = sdk.clone();
        let forward = callback.clone();
        let listener = sdk.add_event_listener(
            handle,
            event,
            Rc::new(move |native: &NativeEvent| match mapper(&target, handle, native) {
                Some(payload) => forward.call(payload),
                None => log::warn!("dropping untranslatable {event} event on {handle:?}"),
            }),
        );
        self.bound = Some(Bound { handle, callback: callback.clone(), listener });
    }

    /// Detach the native listener, if any.
    pub fn unbind<S: MapSdk>(&mut self, sdk: &S) {
        if let Some(bound) = self.bound.take() {
            sdk.remove_event_listener(bound.handle, self.event, bound.listener);
        }
    }
}
