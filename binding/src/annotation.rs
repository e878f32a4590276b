//! Annotations and markers.
//!
//! Both are positioned by coordinate, which is their identity: moving one
//! replaces the SDK object. Everything else is a property. Markers add the
//! balloon styling on top of the common annotation props.

#[cfg(test)]
#[path = "annotation_test.rs"]
mod annotation_test;

use crate::binder::{Context, EntityBinder};
use crate::consts::{DEFAULT_GLYPH_COLOR, DEFAULT_MARKER_COLOR};
use crate::convert::{CollisionMode, DisplayPriority, FeatureVisibility};
use crate::error::{BindError, ConfigError};
use crate::events::{self, EventBinding};
use crate::geo::{Coordinate, Padding, Point, Size};
use crate::project::{ContentProjector, SlotSet};
use crate::sdk::{Callback, EntitySpec, Handle, ImageSet, MapSdk, PropertyValue};
use crate::sync::{PropertyList, PropertySet, PropertySync};

/// Props shared by custom annotations and markers.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationOptions {
    pub title: String,
    pub subtitle: String,
    pub accessibility_label: Option<String>,
    pub size: Option<Size>,
    pub padding: Padding,
    pub anchor_offset: Point,
    pub callout_offset: Point,
    pub callout_enabled: Option<bool>,
    pub selected: bool,
    pub animates: bool,
    pub appearance_animation: String,
    pub draggable: bool,
    pub enabled: bool,
    pub visible: bool,
    pub clustering_identifier: Option<String>,
    pub collision_mode: Option<CollisionMode>,
    pub display_priority: Option<DisplayPriority>,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            accessibility_label: None,
            size: None,
            padding: Padding::default(),
            anchor_offset: Point::default(),
            callout_offset: Point::default(),
            callout_enabled: Some(true),
            selected: false,
            animates: true,
            appearance_animation: String::new(),
            draggable: false,
            enabled: true,
            visible: true,
            clustering_identifier: None,
            collision_mode: None,
            display_priority: None,
        }
    }
}

impl PropertySet for AnnotationOptions {
    fn properties(&self) -> Result<PropertyList, ConfigError> {
        Ok(vec![
            ("title", Some(self.title.as_str().into())),
            ("subtitle", Some(self.subtitle.as_str().into())),
            ("accessibilityLabel", self.accessibility_label.clone().map(PropertyValue::Text)),
            ("size", self.size.map(PropertyValue::Size)),
            ("padding", Some(self.padding.into())),
            ("anchorOffset", Some(self.anchor_offset.into())),
            ("calloutOffset", Some(self.callout_offset.into())),
            ("calloutEnabled", self.callout_enabled.map(PropertyValue::Bool)),
            ("selected", Some(self.selected.into())),
            ("animates", Some(self.animates.into())),
            ("appearanceAnimation", Some(self.appearance_animation.as_str().into())),
            ("draggable", Some(self.draggable.into())),
            ("enabled", Some(self.enabled.into())),
            ("visible", Some(self.visible.into())),
            ("clusteringIdentifier", self.clustering_identifier.clone().map(PropertyValue::Text)),
            ("collisionMode", self.collision_mode.map(|m| m.to_sdk().into())),
            ("displayPriority", self.display_priority.map(|p| p.as_number().into())),
        ])
    }
}

/// Balloon marker props.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    pub common: AnnotationOptions,
    pub color: String,
    pub glyph_color: String,
    pub glyph_text: String,
    pub glyph_image: Option<ImageSet>,
    pub selected_glyph_image: Option<ImageSet>,
    pub title_visibility: FeatureVisibility,
    pub subtitle_visibility: FeatureVisibility,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            common: AnnotationOptions { callout_enabled: None, ..AnnotationOptions::default() },
            color: DEFAULT_MARKER_COLOR.to_owned(),
            glyph_color: DEFAULT_GLYPH_COLOR.to_owned(),
            glyph_text: String::new(),
            glyph_image: None,
            selected_glyph_image: None,
            title_visibility: FeatureVisibility::Adaptive,
            subtitle_visibility: FeatureVisibility::Adaptive,
        }
    }
}

impl PropertySet for MarkerOptions {
    fn properties(&self) -> Result<PropertyList, ConfigError> {
        let mut list = self.common.properties()?;
        list.extend([
            ("color", Some(self.color.as_str().into())),
            ("glyphColor", Some(self.glyph_color.as_str().into())),
            ("glyphText", Some(self.glyph_text.as_str().into())),
            ("glyphImage", self.glyph_image.clone().map(PropertyValue::Images)),
            ("selectedGlyphImage", self.selected_glyph_image.clone().map(PropertyValue::Images)),
            ("titleVisibility", Some(self.title_visibility.to_sdk().into())),
            ("subtitleVisibility", Some(self.subtitle_visibility.to_sdk().into())),
        ]);
        Ok(list)
    }
}

/// Which SDK object backs the annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationKind<N> {
    /// Custom annotation whose body is the projected `content` node.
    Custom { content: N },
    Marker,
}

#[derive(Clone, Default)]
pub struct AnnotationCallbacks {
    pub on_select: Option<Callback<()>>,
    pub on_deselect: Option<Callback<()>>,
    pub on_drag_start: Option<Callback<()>>,
    /// Final coordinate once the drag ends.
    pub on_drag_end: Option<Callback<Coordinate>>,
    /// Intermediate coordinates during the drag.
    pub on_dragging: Option<Callback<Coordinate>>,
}

struct AnnotationEvents {
    select: EventBinding<()>,
    deselect: EventBinding<()>,
    drag_start: EventBinding<()>,
    drag_end: EventBinding<Coordinate>,
    dragging: EventBinding<Coordinate>,
}

impl AnnotationEvents {
    const fn new() -> Self {
        Self {
            select: EventBinding::new(events::SELECT),
            deselect: EventBinding::new(events::DESELECT),
            drag_start: EventBinding::new(events::DRAG_START),
            drag_end: EventBinding::new(events::DRAG_END),
            dragging: EventBinding::new(events::DRAGGING),
        }
    }

    fn sync<S: MapSdk>(&mut self, sdk: &S, h: Option<Handle>, cb: &AnnotationCallbacks) {
        self.select.sync(sdk, h, cb.on_select.as_ref(), events::unit);
        self.deselect.sync(sdk, h, cb.on_deselect.as_ref(), events::unit);
        self.drag_start.sync(sdk, h, cb.on_drag_start.as_ref(), events::unit);
        self.drag_end.sync(sdk, h, cb.on_drag_end.as_ref(), events::entity_coordinate);
        self.dragging.sync(sdk, h, cb.on_dragging.as_ref(), events::event_coordinate);
    }

    fn unbind<S: MapSdk>(&mut self, sdk: &S) {
        self.sync(sdk, None, &AnnotationCallbacks::default());
    }
}

/// Owns one annotation or marker on a map.
pub struct AnnotationController<S: MapSdk> {
    binder: EntityBinder<Coordinate>,
    props: PropertySync,
    events: AnnotationEvents,
    callout: ContentProjector<S::Node>,
}

impl<S: MapSdk> Default for AnnotationController<S> {
    fn default() -> Self {
        Self {
            binder: EntityBinder::new(),
            props: PropertySync::new(),
            events: AnnotationEvents::new(),
            callout: ContentProjector::new(),
        }
    }
}

impl<S: MapSdk> AnnotationController<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn handle(&self) -> Option<Handle> {
        self.binder.handle()
    }

    /// Reconcile with the current inputs. `map` is the parent map, if live.
    ///
    /// # Errors
    ///
    /// SDK construction failures and invalid props.
    #[allow(clippy::too_many_arguments)]
    pub fn sync(
        &mut self,
        sdk: &S,
        map: Option<Handle>,
        coordinate: Coordinate,
        kind: &AnnotationKind<S::Node>,
        props: &impl PropertySet,
        callout: &SlotSet<S::Node>,
        callbacks: &AnnotationCallbacks,
    ) -> Result<Option<Handle>, BindError> {
        let context = map.map(Context::Map);
        if self.binder.is_live() && !self.binder.is_current(context, Some(&coordinate)) {
            self.detach(sdk);
        }
        self.binder.sync(sdk, context, Some(&coordinate), |&coordinate| match kind {
            AnnotationKind::Custom { content } => {
                EntitySpec::Annotation { coordinate, content: content.clone() }
            }
            AnnotationKind::Marker => EntitySpec::Marker { coordinate },
        })?;
        let handle = self.binder.handle();

        self.props.reconcile(sdk, handle, props)?;
        self.events.sync(sdk, handle, callbacks);
        self.callout.sync(sdk, handle, callout);
        Ok(handle)
    }

    /// Unbind listeners and remove the callout delegate, then remove the annotation.
    pub fn teardown(&mut self, sdk: &S) {
        self.detach(sdk);
        self.binder.teardown(sdk);
        self.props.reset();
    }

    fn detach(&mut self, sdk: &S) {
        self.events.unbind(sdk);
        self.callout.detach(sdk);
    }
}
