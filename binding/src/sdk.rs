//! The capability surface the binding needs from a mapping SDK.
//!
//! [`MapSdk`] is implemented by the MapKit JS bridge in the client crate and
//! by a recording fake in tests. Everything the binding does to the SDK goes
//! through these operations; nothing else reaches the SDK directly.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::convert::{LineCap, PoiCategory, SdkConstant};
use crate::error::SdkError;
use crate::geo::{CameraZoomRange, Coordinate, CoordinateRegion, Padding, Point, Size};
use crate::project::CalloutDelegate;

/// Opaque id of a live SDK object. Issued by the SDK, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Id of one attached native listener, returned by `add_event_listener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// The fields the binding reads from a native SDK or DOM event.
///
/// The bridge fills in whatever the event carried; mappers in
/// [`crate::events`] decide which fields are required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeEvent {
    pub coordinate: Option<Coordinate>,
    pub point_on_page: Option<Point>,
    pub timestamp_ms: Option<f64>,
    pub floor_level: Option<i32>,
    pub code: Option<i32>,
    pub message: Option<String>,
}

/// Include or exclude semantics of a point-of-interest filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoiFilterMode {
    Including,
    Excluding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoiFilter {
    pub mode: PoiFilterMode,
    pub categories: Vec<PoiCategory>,
}

/// Image URLs keyed by device pixel ratio (1, 2, 3).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet(pub BTreeMap<u8, String>);

impl ImageSet {
    /// Single image used for every pixel ratio.
    #[must_use]
    pub fn single(url: impl Into<String>) -> Self {
        Self(BTreeMap::from([(1, url.into())]))
    }

    #[must_use]
    pub fn with(mut self, ratio: u8, url: impl Into<String>) -> Self {
        self.0.insert(ratio, url.into());
        self
    }
}

/// Stroke and fill appearance of an overlay, applied as one `style` object.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub stroke_color: String,
    pub fill_color: Option<String>,
    pub line_width: f64,
    pub line_dash: Vec<f64>,
    pub line_cap: LineCap,
}

/// Every value shape the binding writes onto an SDK object.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Constant(SdkConstant),
    Padding(Padding),
    Point(Point),
    Size(Size),
    Region(CoordinateRegion),
    Coordinate(Coordinate),
    ZoomRange(CameraZoomRange),
    PoiFilter(PoiFilter),
    Images(ImageSet),
    Style(OverlayStyle),
    Numbers(Vec<f64>),
}

impl PropertyValue {
    #[must_use]
    pub fn as_region(&self) -> Option<CoordinateRegion> {
        match self {
            Self::Region(r) => Some(*r),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_coordinate(&self) -> Option<Coordinate> {
        match self {
            Self::Coordinate(c) => Some(*c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Constant(c) => Some(c.raw),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<SdkConstant> for PropertyValue {
    fn from(value: SdkConstant) -> Self {
        Self::Constant(value)
    }
}

impl From<Padding> for PropertyValue {
    fn from(value: Padding) -> Self {
        Self::Padding(value)
    }
}

impl From<Point> for PropertyValue {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<Size> for PropertyValue {
    fn from(value: Size) -> Self {
        Self::Size(value)
    }
}

impl From<CoordinateRegion> for PropertyValue {
    fn from(value: CoordinateRegion) -> Self {
        Self::Region(value)
    }
}

impl From<CameraZoomRange> for PropertyValue {
    fn from(value: CameraZoomRange) -> Self {
        Self::ZoomRange(value)
    }
}

impl From<ImageSet> for PropertyValue {
    fn from(value: ImageSet) -> Self {
        Self::Images(value)
    }
}

/// What to construct in `create_entity`.
#[derive(Debug, Clone, PartialEq)]
pub enum EntitySpec<N> {
    /// A map rendered into `container`.
    Map { container: N, initial_region: Option<CoordinateRegion> },
    /// A custom annotation whose element factory returns `content`.
    Annotation { coordinate: Coordinate, content: N },
    /// A balloon marker annotation.
    Marker { coordinate: Coordinate },
    Polyline { points: Vec<Coordinate> },
    Polygon { points: Vec<Coordinate> },
}

impl<N> EntitySpec<N> {
    /// Short name used in logs and errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Map { .. } => "map",
            Self::Annotation { .. } => "annotation",
            Self::Marker { .. } => "marker",
            Self::Polyline { .. } => "polyline",
            Self::Polygon { .. } => "polygon",
        }
    }
}

/// Native listener passed to the SDK.
pub type Listener = Rc<dyn Fn(&NativeEvent)>;

/// A user callback compared by identity.
///
/// Two `Callback`s are equal only when they share the same allocation, so a
/// freshly built closure always counts as a new callback and forces a rebind.
pub struct Callback<T>(Rc<dyn Fn(T)>);

impl<T> Callback<T> {
    pub fn new(f: impl Fn(T) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, value: T) {
        (self.0)(value);
    }
}

impl<T> Clone for Callback<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> PartialEq for Callback<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0))
    }
}

impl<T, F: Fn(T) + 'static> From<F> for Callback<T> {
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

/// Operations a mapping SDK must provide.
///
/// Handles passed in that are no longer live must be ignored, not panicked on.
pub trait MapSdk: Clone + 'static {
    /// DOM node type used for map containers and projected content.
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    /// Construct an entity. Children (annotations, overlays) are added to `parent`.
    ///
    /// # Errors
    ///
    /// [`SdkError::Unavailable`] when the SDK is not loaded,
    /// [`SdkError::ParentMissing`] when `parent` is required but not live, and
    /// [`SdkError::Create`] when the constructor throws.
    fn create_entity(
        &self,
        parent: Option<Handle>,
        spec: EntitySpec<Self::Node>,
    ) -> Result<Handle, SdkError>;

    /// Destroy a map, or remove an annotation/overlay from its map.
    fn destroy_entity(&self, handle: Handle);

    fn set_property(&self, handle: Handle, name: &str, value: &PropertyValue);

    /// Remove the own property so the SDK default shows through.
    fn clear_property(&self, handle: Handle, name: &str);

    fn read_property(&self, handle: Handle, name: &str) -> Option<PropertyValue>;

    fn add_event_listener(&self, handle: Handle, event: &str, listener: Listener) -> ListenerId;

    fn remove_event_listener(&self, handle: Handle, event: &str, id: ListenerId);

    /// Attach a callout delegate, replacing any previous one, or remove it with `None`.
    fn set_callout_delegate(&self, handle: Handle, delegate: Option<CalloutDelegate<Self::Node>>);

    /// Convert a page-space point to a coordinate on the map `handle`.
    fn convert_point_on_page(&self, handle: Handle, point: Point) -> Option<Coordinate>;
}
