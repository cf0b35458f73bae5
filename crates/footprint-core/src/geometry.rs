//! Geometric primitives for planar import geometry.
//!
//! This module provides the value types used throughout Footprint for
//! reconstructing outlines and comparing their vertices.
//!
//! # Overview
//!
//! - [`PlanarPoint`] - A 2D coordinate in a projected (planar) coordinate system
//! - [`BoundingBox`] - An axis-aligned rectangle defined by its minimum and maximum corners
//! - [`RawPolygon`] - An outline's vertices before any identity is assigned
//! - [`GeoCoordinate`] - A geographic latitude/longitude pair in degrees
//!
//! # Coordinate Systems
//!
//! Source documents use an SVG-style frame where Y grows downward:
//!
//! ```text
//!   document frame            planar (map) frame
//!
//!   (0,0) ────────► +X        +Y
//!     │                        ▲
//!     │                        │
//!     ▼                        │
//!    +Y                      (0,0) ────────► +X
//! ```
//!
//! A [`PlanarPoint`] does not record which frame it belongs to. Callers
//! track that themselves; [`BoundingBox::mirror_y`] converts between them.

use serde::{Deserialize, Serialize};

/// A 2D point in a planar coordinate system.
///
/// # Examples
///
/// ```
/// # use footprint_core::geometry::PlanarPoint;
/// let a = PlanarPoint::new(10.0, 20.0);
/// let b = a.offset(5.0, 5.0);
///
/// assert_eq!(b, PlanarPoint::new(15.0, 25.0));
/// assert_eq!(a.distance(PlanarPoint::new(13.0, 24.0)), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    x: f64,
    y: f64,
}

impl PlanarPoint {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate (easting) of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate (northing) of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Returns this point moved by a relative delta
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance between two points of the same frame
    pub fn distance(self, other: PlanarPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns true if both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned rectangle in planar coordinates.
///
/// The minimum corner never exceeds the maximum corner on either axis.
/// Constructors enforce this by returning `None` for inverted input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min: PlanarPoint,
    max: PlanarPoint,
}

impl BoundingBox {
    /// Creates a bounding box from its two corners.
    ///
    /// Returns `None` if `min` exceeds `max` on either axis or if any
    /// coordinate is not finite.
    pub fn new(min: PlanarPoint, max: PlanarPoint) -> Option<Self> {
        if !min.is_finite() || !max.is_finite() || min.x > max.x || min.y > max.y {
            return None;
        }
        Some(Self { min, max })
    }

    /// Creates a bounding box from an SVG-style origin and extent
    /// (`min-x min-y width height`).
    ///
    /// # Examples
    ///
    /// ```
    /// # use footprint_core::geometry::{BoundingBox, PlanarPoint};
    /// let bbox = BoundingBox::from_origin_size(100.0, 200.0, 50.0, 20.0).unwrap();
    /// assert_eq!(bbox.min(), PlanarPoint::new(100.0, 200.0));
    /// assert_eq!(bbox.max(), PlanarPoint::new(150.0, 220.0));
    ///
    /// assert!(BoundingBox::from_origin_size(0.0, 0.0, -1.0, 5.0).is_none());
    /// ```
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Option<Self> {
        if width < 0.0 || height < 0.0 {
            return None;
        }
        Self::new(PlanarPoint::new(x, y), PlanarPoint::new(x + width, y + height))
    }

    /// Returns the minimum corner
    pub fn min(self) -> PlanarPoint {
        self.min
    }

    /// Returns the maximum corner
    pub fn max(self) -> PlanarPoint {
        self.max
    }

    /// Returns the width of the box
    pub fn width(self) -> f64 {
        self.max.x - self.min.x
    }

    /// Returns the height of the box
    pub fn height(self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns the horizontal line the box is mirrored across
    pub fn vertical_pivot(self) -> f64 {
        self.min.y + (self.max.y - self.min.y) / 2.0
    }

    /// Reflects a point across the box's vertical midpoint.
    ///
    /// The x-coordinate is unchanged. Reflecting twice with the same box
    /// returns the original point.
    pub fn mirror_y(self, point: PlanarPoint) -> PlanarPoint {
        let pivot = self.vertical_pivot();
        point.with_y(2.0 * pivot - point.y)
    }
}

/// The vertices of one outline, before identities are assigned.
///
/// A raw polygon always has at least three effective vertices. An explicit
/// closing vertex (a last vertex exactly equal to the first) is dropped on
/// construction; rings are closed again once identities exist.
///
/// # Examples
///
/// ```
/// # use footprint_core::geometry::{PlanarPoint, RawPolygon};
/// let square = RawPolygon::new(vec![
///     PlanarPoint::new(0.0, 0.0),
///     PlanarPoint::new(1.0, 0.0),
///     PlanarPoint::new(1.0, 1.0),
///     PlanarPoint::new(0.0, 1.0),
///     PlanarPoint::new(0.0, 0.0),
/// ])
/// .unwrap();
/// assert_eq!(square.len(), 4);
///
/// let segment = RawPolygon::new(vec![PlanarPoint::new(0.0, 0.0), PlanarPoint::new(1.0, 0.0)]);
/// assert!(segment.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RawPolygon {
    vertices: Vec<PlanarPoint>,
}

impl RawPolygon {
    /// Minimum number of effective vertices of a polygon
    pub const MIN_VERTICES: usize = 3;

    /// Creates a polygon, or `None` if fewer than [`Self::MIN_VERTICES`]
    /// effective vertices remain after dropping an explicit closing vertex.
    pub fn new(mut vertices: Vec<PlanarPoint>) -> Option<Self> {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        (vertices.len() >= Self::MIN_VERTICES).then_some(Self { vertices })
    }

    /// Returns the vertices in order, without a closing vertex
    pub fn vertices(&self) -> &[PlanarPoint] {
        &self.vertices
    }

    /// Returns the number of effective vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if there are no vertices; never the case once constructed
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Applies `f` to every vertex, preserving order and count.
    pub fn map_vertices(&self, f: impl Fn(PlanarPoint) -> PlanarPoint) -> Self {
        Self {
            vertices: self.vertices.iter().copied().map(f).collect(),
        }
    }
}

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    lat: f64,
    lon: f64,
}

impl GeoCoordinate {
    /// Creates a new coordinate from latitude and longitude in degrees
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns the latitude in degrees
    pub fn lat(self) -> f64 {
        self.lat
    }

    /// Returns the longitude in degrees
    pub fn lon(self) -> f64 {
        self.lon
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_point_new() {
        let point = PlanarPoint::new(10.0, 20.0);
        assert_eq!(point.x(), 10.0);
        assert_eq!(point.y(), 20.0);
    }

    #[test]
    fn test_point_offset() {
        let point = PlanarPoint::new(10.0, 20.0).offset(-3.0, 2.5);
        assert_eq!(point, PlanarPoint::new(7.0, 22.5));
    }

    #[test]
    fn test_point_distance() {
        let a = PlanarPoint::new(0.0, 0.0);
        let b = PlanarPoint::new(3.0, 4.0);
        assert_approx_eq!(f64, a.distance(b), 5.0);
        assert_approx_eq!(f64, b.distance(a), 5.0);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn test_point_is_finite() {
        assert!(PlanarPoint::new(1.0, 2.0).is_finite());
        assert!(!PlanarPoint::new(f64::NAN, 2.0).is_finite());
        assert!(!PlanarPoint::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_bounding_box_rejects_inverted_corners() {
        let a = PlanarPoint::new(10.0, 10.0);
        let b = PlanarPoint::new(0.0, 20.0);
        assert!(BoundingBox::new(a, b).is_none());
        assert!(BoundingBox::new(b.with_y(0.0), a).is_some());
    }

    #[test]
    fn test_bounding_box_from_origin_size() {
        let bbox = BoundingBox::from_origin_size(981000.0, 6_300_000.0, 500.0, 300.0).unwrap();
        assert_eq!(bbox.width(), 500.0);
        assert_eq!(bbox.height(), 300.0);
        assert_eq!(bbox.vertical_pivot(), 6_300_150.0);
    }

    #[test]
    fn test_bounding_box_zero_size_is_valid() {
        let bbox = BoundingBox::from_origin_size(5.0, 5.0, 0.0, 0.0).unwrap();
        assert_eq!(bbox.min(), bbox.max());
    }

    #[test]
    fn test_mirror_y() {
        let bbox = BoundingBox::from_origin_size(0.0, 100.0, 50.0, 40.0).unwrap();
        // pivot = 120
        let mirrored = bbox.mirror_y(PlanarPoint::new(7.0, 105.0));
        assert_eq!(mirrored, PlanarPoint::new(7.0, 135.0));
    }

    #[test]
    fn test_raw_polygon_counts_effective_vertices() {
        let triangle = vec![
            PlanarPoint::new(0.0, 0.0),
            PlanarPoint::new(4.0, 0.0),
            PlanarPoint::new(0.0, 3.0),
        ];
        assert_eq!(RawPolygon::new(triangle.clone()).unwrap().len(), 3);

        let mut closed = triangle.clone();
        closed.push(PlanarPoint::new(0.0, 0.0));
        assert_eq!(RawPolygon::new(closed).unwrap().vertices(), triangle.as_slice());

        let collapsed = vec![
            PlanarPoint::new(0.0, 0.0),
            PlanarPoint::new(4.0, 0.0),
            PlanarPoint::new(0.0, 0.0),
        ];
        assert!(RawPolygon::new(collapsed).is_none());
    }

    #[test]
    fn test_raw_polygon_map_vertices() {
        let polygon = RawPolygon::new(vec![
            PlanarPoint::new(0.0, 0.0),
            PlanarPoint::new(4.0, 0.0),
            PlanarPoint::new(0.0, 3.0),
        ])
        .unwrap();
        let moved = polygon.map_vertices(|p| p.offset(1.0, 1.0));
        assert_eq!(moved.vertices()[2], PlanarPoint::new(1.0, 4.0));
        assert_eq!(moved.len(), 3);
    }

    /// Dyadic rationals with a small numerator keep every intermediate exact.
    fn dyadic() -> impl Strategy<Value = f64> {
        (-1_000_000i64..1_000_000).prop_map(|n| n as f64 / 64.0)
    }

    proptest! {
        #[test]
        fn mirror_y_is_an_involution_for_dyadic_input(
            (x, y) in (dyadic(), dyadic()),
            (origin_y, height) in (dyadic(), (0i64..1_000_000).prop_map(|n| n as f64 / 64.0)),
        ) {
            let bbox = BoundingBox::from_origin_size(0.0, origin_y, 10.0, height).unwrap();
            let point = PlanarPoint::new(x, y);
            prop_assert_eq!(bbox.mirror_y(bbox.mirror_y(point)), point);
        }

        #[test]
        fn distance_is_symmetric(
            (ax, ay, bx, by) in (-1e6f64..1e6, -1e6f64..1e6, -1e6f64..1e6, -1e6f64..1e6),
        ) {
            let a = PlanarPoint::new(ax, ay);
            let b = PlanarPoint::new(bx, by);
            prop_assert_eq!(a.distance(b), b.distance(a));
        }
    }
}
