//! Polyline and polygon overlays. The point list is the identity; the
//! stroke/fill appearance is folded into one `style` property.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use crate::binder::{Context, EntityBinder};
use crate::consts::{DEFAULT_FILL_COLOR, DEFAULT_LINE_WIDTH, DEFAULT_STROKE_COLOR};
use crate::convert::LineCap;
use crate::error::{BindError, ConfigError};
use crate::events::{self, EventBinding};
use crate::geo::Coordinate;
use crate::sdk::{Callback, EntitySpec, Handle, MapSdk, OverlayStyle, PropertyValue};
use crate::sync::{PropertyList, PropertySet, PropertySync};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Polyline,
    Polygon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayOptions {
    pub stroke_color: String,
    /// Polygons only.
    pub fill_color: Option<String>,
    pub line_width: f64,
    pub line_dash: Vec<f64>,
    pub line_cap: LineCap,
    pub visible: bool,
    pub enabled: bool,
    pub selected: bool,
}

impl OverlayOptions {
    #[must_use]
    pub fn polyline() -> Self {
        Self {
            stroke_color: DEFAULT_STROKE_COLOR.to_owned(),
            fill_color: None,
            line_width: DEFAULT_LINE_WIDTH,
            line_dash: Vec::new(),
            line_cap: LineCap::Round,
            visible: true,
            enabled: true,
            selected: false,
        }
    }

    #[must_use]
    pub fn polygon() -> Self {
        Self { fill_color: Some(DEFAULT_FILL_COLOR.to_owned()), ..Self::polyline() }
    }

    #[must_use]
    pub fn style(&self) -> OverlayStyle {
        OverlayStyle {
            stroke_color: self.stroke_color.clone(),
            fill_color: self.fill_color.clone(),
            line_width: self.line_width,
            line_dash: self.line_dash.clone(),
            line_cap: self.line_cap,
        }
    }
}

impl PropertySet for OverlayOptions {
    fn properties(&self) -> Result<PropertyList, ConfigError> {
        Ok(vec![
            ("style", Some(PropertyValue::Style(self.style()))),
            ("visible", Some(self.visible.into())),
            ("enabled", Some(self.enabled.into())),
            ("selected", Some(self.selected.into())),
        ])
    }
}

#[derive(Clone, Default)]
pub struct OverlayCallbacks {
    pub on_select: Option<Callback<()>>,
    pub on_deselect: Option<Callback<()>>,
}

/// Owns one overlay on a map.
pub struct OverlayController {
    binder: EntityBinder<Vec<Coordinate>>,
    props: PropertySync,
    select: EventBinding<()>,
    deselect: EventBinding<()>,
}

impl Default for OverlayController {
    fn default() -> Self {
        Self {
            binder: EntityBinder::new(),
            props: PropertySync::new(),
            select: EventBinding::new(events::SELECT),
            deselect: EventBinding::new(events::DESELECT),
        }
    }
}

impl OverlayController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn handle(&self) -> Option<Handle> {
        self.binder.handle()
    }

    /// Reconcile with the current inputs. Polygon rings must already be flattened.
    ///
    /// # Errors
    ///
    /// SDK construction failures.
    pub fn sync<S: MapSdk>(
        &mut self,
        sdk: &S,
        map: Option<Handle>,
        kind: OverlayKind,
        points: &[Coordinate],
        props: &OverlayOptions,
        callbacks: &OverlayCallbacks,
    ) -> Result<Option<Handle>, BindError> {
        let context = map.map(Context::Map);
        let points = points.to_vec();
        if self.binder.is_live() && !self.binder.is_current(context, Some(&points)) {
            self.unbind(sdk);
        }
        self.binder.sync(sdk, context, Some(&points), |points| match kind {
            OverlayKind::Polyline => EntitySpec::Polyline { points: points.clone() },
            OverlayKind::Polygon => EntitySpec::Polygon { points: points.clone() },
        })?;
        let handle = self.binder.handle();

        self.props.reconcile(sdk, handle, props)?;
        self.select.sync(sdk, handle, callbacks.on_select.as_ref(), events::unit);
        self.deselect.sync(sdk, handle, callbacks.on_deselect.as_ref(), events::unit);
        Ok(handle)
    }

    pub fn teardown<S: MapSdk>(&mut self, sdk: &S) {
        self.unbind(sdk);
        self.binder.teardown(sdk);
        self.props.reset();
    }

    fn unbind<S: MapSdk>(&mut self, sdk: &S) {
        self.select.unbind(sdk);
        self.deselect.unbind(sdk);
    }
}
