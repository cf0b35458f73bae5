//! Axis correction between document space and map space.
//!
//! Drawings put the y axis downwards while planar map coordinates grow
//! northwards. Reflecting every vertex across the horizontal midline of the
//! document's view box restores the map orientation; the x axis is shared.

use footprint_core::geometry::{BoundingBox, RawPolygon};

/// Reflect every vertex of `polygon` across the midline of `view_box`.
///
/// Vertex order and count are preserved. Applying the correction twice with
/// the same box gives back the input.
///
/// # Examples
///
/// ```
/// # use footprint::axis::correct_axis;
/// # use footprint_core::geometry::{BoundingBox, PlanarPoint, RawPolygon};
/// let view_box = BoundingBox::from_origin_size(0.0, 0.0, 100.0, 50.0).unwrap();
/// let polygon = RawPolygon::new(vec![
///     PlanarPoint::new(10.0, 20.0),
///     PlanarPoint::new(15.0, 25.0),
///     PlanarPoint::new(12.0, 27.0),
/// ])
/// .unwrap();
///
/// let corrected = correct_axis(&polygon, view_box);
/// assert_eq!(corrected.vertices()[0], PlanarPoint::new(10.0, 30.0));
/// ```
pub fn correct_axis(polygon: &RawPolygon, view_box: BoundingBox) -> RawPolygon {
    polygon.map_vertices(|vertex| view_box.mirror_y(vertex))
}
