//! Map entity: props, callbacks and the controller that keeps one live map.

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use crate::binder::{Context, EntityBinder};
use crate::convert::{Distances, FeatureVisibility, MapType, PoiCategory};
use crate::error::{BindError, ConfigError};
use crate::events::{self, EventBinding, MapInteraction, UserLocation, UserLocationError};
use crate::geo::{CameraZoomRange, CoordinateRegion, Padding};
use crate::sdk::{Callback, EntitySpec, Handle, MapSdk, PoiFilter, PoiFilterMode, PropertyValue};
use crate::sync::{PropertyList, PropertySet, PropertySync};

/// Declarative map configuration. `Default` gives MapKit's stock map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub camera_boundary: Option<CoordinateRegion>,
    pub min_camera_distance: f64,
    pub max_camera_distance: f64,
    pub map_type: MapType,
    pub distances: Distances,
    pub padding: Padding,
    pub is_rotation_enabled: bool,
    pub is_scroll_enabled: bool,
    pub is_zoom_enabled: bool,
    pub shows_compass: FeatureVisibility,
    pub shows_scale: FeatureVisibility,
    pub shows_map_type_control: bool,
    pub shows_zoom_control: bool,
    pub shows_user_location_control: bool,
    pub shows_points_of_interest: bool,
    pub shows_user_location: bool,
    pub tracks_user_location: bool,
    pub included_categories: Option<Vec<PoiCategory>>,
    pub excluded_categories: Option<Vec<PoiCategory>>,
}

impl Default for MapOptions {
    fn default() -> Self {
        let zoom = CameraZoomRange::default();
        Self {
            camera_boundary: None,
            min_camera_distance: zoom.min_distance,
            max_camera_distance: zoom.max_distance,
            map_type: MapType::Standard,
            distances: Distances::Adaptive,
            padding: Padding::default(),
            is_rotation_enabled: true,
            is_scroll_enabled: true,
            is_zoom_enabled: true,
            shows_compass: FeatureVisibility::Adaptive,
            shows_scale: FeatureVisibility::Hidden,
            shows_map_type_control: true,
            shows_zoom_control: true,
            shows_user_location_control: false,
            shows_points_of_interest: true,
            shows_user_location: false,
            tracks_user_location: false,
            included_categories: None,
            excluded_categories: None,
        }
    }
}

impl MapOptions {
    /// The point-of-interest filter, if any.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ConflictingPoiFilters`] when both lists are given.
    pub fn poi_filter(&self) -> Result<Option<PoiFilter>, ConfigError> {
        match (&self.included_categories, &self.excluded_categories) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingPoiFilters),
            (Some(categories), None) => {
                Ok(Some(PoiFilter { mode: PoiFilterMode::Including, categories: categories.clone() }))
            }
            (None, Some(categories)) => {
                Ok(Some(PoiFilter { mode: PoiFilterMode::Excluding, categories: categories.clone() }))
            }
            (None, None) => Ok(None),
        }
    }
}

impl PropertySet for MapOptions {
    fn properties(&self) -> Result<PropertyList, ConfigError> {
        let filter = self.poi_filter()?;
        let zoom = CameraZoomRange { min_distance: self.min_camera_distance, max_distance: self.max_camera_distance };
        Ok(vec![
            ("cameraBoundary", self.camera_boundary.map(PropertyValue::Region)),
            ("cameraZoomRange", Some(zoom.into())),
            ("mapType", Some(self.map_type.to_sdk().into())),
            ("distances", Some(self.distances.to_sdk().into())),
            ("padding", Some(self.padding.into())),
            ("isRotationEnabled", Some(self.is_rotation_enabled.into())),
            ("isScrollEnabled", Some(self.is_scroll_enabled.into())),
            ("isZoomEnabled", Some(self.is_zoom_enabled.into())),
            ("showsCompass", Some(self.shows_compass.to_sdk().into())),
            ("showsScale", Some(self.shows_scale.to_sdk().into())),
            ("showsMapTypeControl", Some(self.shows_map_type_control.into())),
            ("showsZoomControl", Some(self.shows_zoom_control.into())),
            ("showsUserLocationControl", Some(self.shows_user_location_control.into())),
            ("showsPointsOfInterest", Some(self.shows_points_of_interest.into())),
            ("showsUserLocation", Some(self.shows_user_location.into())),
            ("tracksUserLocation", Some(self.tracks_user_location.into())),
            ("pointOfInterestFilter", filter.map(PropertyValue::PoiFilter)),
        ])
    }
}

/// Optional user callbacks for map events.
#[derive(Clone, Default)]
pub struct MapCallbacks {
    /// Fired once per created map, through [`MapController::announce_load`].
    pub on_load: Option<Callback<()>>,
    pub on_region_change_start: Option<Callback<CoordinateRegion>>,
    pub on_region_change_end: Option<Callback<CoordinateRegion>>,
    pub on_map_type_change: Option<Callback<MapType>>,
    pub on_single_tap: Option<Callback<MapInteraction>>,
    pub on_double_tap: Option<Callback<MapInteraction>>,
    pub on_long_press: Option<Callback<MapInteraction>>,
    pub on_click: Option<Callback<MapInteraction>>,
    pub on_mouse_move: Option<Callback<MapInteraction>>,
    pub on_mouse_down: Option<Callback<MapInteraction>>,
    pub on_mouse_up: Option<Callback<MapInteraction>>,
    pub on_user_location_change: Option<Callback<UserLocation>>,
    pub on_user_location_error: Option<Callback<UserLocationError>>,
}

struct MapEvents {
    region_change_start: EventBinding<CoordinateRegion>,
    region_change_end: EventBinding<CoordinateRegion>,
    map_type_change: EventBinding<MapType>,
    single_tap: EventBinding<MapInteraction>,
    double_tap: EventBinding<MapInteraction>,
    long_press: EventBinding<MapInteraction>,
    click: EventBinding<MapInteraction>,
    mouse_move: EventBinding<MapInteraction>,
    mouse_down: EventBinding<MapInteraction>,
    mouse_up: EventBinding<MapInteraction>,
    user_location_change: EventBinding<UserLocation>,
    user_location_error: EventBinding<UserLocationError>,
}

impl MapEvents {
    const fn new() -> Self {
        Self {
            region_change_start: EventBinding::new(events::REGION_CHANGE_START),
            region_change_end: EventBinding::new(events::REGION_CHANGE_END),
            map_type_change: EventBinding::new(events::MAP_TYPE_CHANGE),
            single_tap: EventBinding::new(events::SINGLE_TAP),
            double_tap: EventBinding::new(events::DOUBLE_TAP),
            long_press: EventBinding::new(events::LONG_PRESS),
            click: EventBinding::new(events::CLICK),
            mouse_move: EventBinding::new(events::MOUSE_MOVE),
            mouse_down: EventBinding::new(events::MOUSE_DOWN),
            mouse_up: EventBinding::new(events::MOUSE_UP),
            user_location_change: EventBinding::new(events::USER_LOCATION_CHANGE),
            user_location_error: EventBinding::new(events::USER_LOCATION_ERROR),
        }
    }

    fn sync<S: MapSdk>(&mut self, sdk: &S, h: Option<Handle>, cb: &MapCallbacks) {
        self.region_change_start.sync(sdk, h, cb.on_region_change_start.as_ref(), events::region);
        self.region_change_end.sync(sdk, h, cb.on_region_change_end.as_ref(), events::region);
        self.map_type_change.sync(sdk, h, cb.on_map_type_change.as_ref(), events::map_type);
        self.single_tap.sync(sdk, h, cb.on_single_tap.as_ref(), events::interaction);
        self.double_tap.sync(sdk, h, cb.on_double_tap.as_ref(), events::interaction);
        self.long_press.sync(sdk, h, cb.on_long_press.as_ref(), events::interaction);
        self.click.sync(sdk, h, cb.on_click.as_ref(), events::interaction);
        self.mouse_move.sync(sdk, h, cb.on_mouse_move.as_ref(), events::interaction);
        self.mouse_down.sync(sdk, h, cb.on_mouse_down.as_ref(), events::interaction);
        self.mouse_up.sync(sdk, h, cb.on_mouse_up.as_ref(), events::interaction);
        self.user_location_change.sync(sdk, h, cb.on_user_location_change.as_ref(), events::user_location);
        self.user_location_error.sync(sdk, h, cb.on_user_location_error.as_ref(), events::user_location_error);
    }

    fn unbind<S: MapSdk>(&mut self, sdk: &S) {
        self.sync(sdk, None, &MapCallbacks::default());
    }
}

/// Owns one map entity and everything attached to it.
pub struct MapController<S: MapSdk> {
    binder: EntityBinder<S::Node>,
    props: PropertySync,
    events: MapEvents,
    /// Live map whose props last reconciled cleanly.
    configured: Option<Handle>,
    /// Map `on_load` was last fired for.
    loaded: Option<Handle>,
}

impl<S: MapSdk> Default for MapController<S> {
    fn default() -> Self {
        Self {
            binder: EntityBinder::new(),
            props: PropertySync::new(),
            events: MapEvents::new(),
            configured: None,
            loaded: None,
        }
    }
}

impl<S: MapSdk> MapController<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn handle(&self) -> Option<Handle> {
        self.binder.handle()
    }

    /// Reconcile the map with the current inputs.
    ///
    /// `initial_region` is only used when a map is created. Returns the live
    /// handle, if any. `on_load` is not fired here; the owner calls
    /// [`Self::announce_load`] once it has published the handle.
    ///
    /// # Errors
    ///
    /// SDK construction failures and invalid props.
    pub fn sync(
        &mut self,
        sdk: &S,
        sdk_ready: bool,
        container: Option<&S::Node>,
        initial_region: Option<CoordinateRegion>,
        props: &MapOptions,
        callbacks: &MapCallbacks,
    ) -> Result<Option<Handle>, BindError> {
        let context = sdk_ready.then_some(Context::Sdk);
        if self.binder.is_live() && !self.binder.is_current(context, container) {
            self.events.unbind(sdk);
        }
        self.configured = None;
        self.binder.sync(sdk, context, container, |node| EntitySpec::Map {
            container: node.clone(),
            initial_region,
        })?;
        let handle = self.binder.handle();

        self.props.reconcile(sdk, handle, props)?;
        self.events.sync(sdk, handle, callbacks);
        self.configured = handle;
        Ok(handle)
    }

    /// Fire `on_load` once for the live map, after its first clean sync.
    ///
    /// Returns the announced handle. A map whose props failed is announced on
    /// the first later sync that succeeds.
    pub fn announce_load(&mut self, callbacks: &MapCallbacks) -> Option<Handle> {
        let handle = self.configured?;
        if self.loaded == Some(handle) {
            return None;
        }
        self.loaded = Some(handle);
        if let Some(on_load) = &callbacks.on_load {
            on_load.call(());
        }
        Some(handle)
    }

    /// Unbind every listener, then destroy the map.
    pub fn teardown(&mut self, sdk: &S) {
        self.events.unbind(sdk);
        self.binder.teardown(sdk);
        self.props.reset();
        self.configured = None;
    }
}
