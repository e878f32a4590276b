//! Plain value types shared by every entity kind.
//!
//! These mirror the shapes MapKit JS accepts (coordinates, spans, regions,
//! padding, points) without depending on the SDK. Conversion into live SDK
//! objects happens in the host bridge; this crate only carries the numbers.

#[cfg(test)]
#[path = "geo_test.rs"]
mod geo_test;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Extent of a region in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSpan {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl CoordinateSpan {
    #[must_use]
    pub const fn new(latitude_delta: f64, longitude_delta: f64) -> Self {
        Self { latitude_delta, longitude_delta }
    }
}

/// A rectangular geographic region: center plus span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRegion {
    pub center: Coordinate,
    pub span: CoordinateSpan,
}

impl CoordinateRegion {
    #[must_use]
    pub const fn new(center: Coordinate, span: CoordinateSpan) -> Self {
        Self { center, span }
    }
}

/// A point in CSS pixels. Used for page positions and anchor/callout offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Edge insets in CSS pixels, in MapKit's top/right/bottom/left order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    /// Same inset on all four edges.
    #[must_use]
    pub fn uniform(inset: f64) -> Self {
        Self::new(inset, inset, inset, inset)
    }
}

/// Width/height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Minimum and maximum camera distance in meters.
///
/// `max` may be `f64::INFINITY`, which MapKit treats as "no upper bound".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraZoomRange {
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for CameraZoomRange {
    fn default() -> Self {
        Self { min_distance: 0.0, max_distance: f64::INFINITY }
    }
}

/// One entry of a polygon's point list: either a single vertex or a ring.
///
/// Callers may mix both forms in one list; [`flatten_points`] turns the list
/// into the flat vertex sequence handed to the SDK.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolygonPoint {
    Vertex(Coordinate),
    Ring(Vec<Coordinate>),
}

impl From<Coordinate> for PolygonPoint {
    fn from(value: Coordinate) -> Self {
        Self::Vertex(value)
    }
}

impl From<Vec<Coordinate>> for PolygonPoint {
    fn from(value: Vec<Coordinate>) -> Self {
        Self::Ring(value)
    }
}

/// Flatten a mixed vertex/ring list, preserving order.
#[must_use]
pub fn flatten_points(points: &[PolygonPoint]) -> Vec<Coordinate> {
    points
        .iter()
        .flat_map(|point| match point {
            PolygonPoint::Vertex(c) => std::slice::from_ref(c),
            PolygonPoint::Ring(ring) => ring.as_slice(),
        })
        .copied()
        .collect()
}
