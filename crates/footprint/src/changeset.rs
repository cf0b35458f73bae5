//! The change set handed to the host application.
//!
//! A change set only ever adds entities: new points first, then the
//! outlines that reference them. Existing points appear only as references.

use log::{debug, info};
use serde::Serialize;

use footprint_core::{
    geometry::{GeoCoordinate, PlanarPoint},
    identifier::{PointId, PolygonId, VertexRef},
    projection::Projection,
};

use crate::{
    conflate::Conflation,
    dedup::DedupedBatch,
};

/// A point to be created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPoint {
    id: PointId,
    position: PlanarPoint,
    geo: GeoCoordinate,
}

impl NewPoint {
    pub fn id(&self) -> PointId {
        self.id
    }

    /// Planar position, in map orientation
    pub fn position(&self) -> PlanarPoint {
        self.position
    }

    pub fn geo(&self) -> GeoCoordinate {
        self.geo
    }
}

/// An outline to be created, as a closed ring of vertex references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPolygon {
    id: PolygonId,
    vertices: Vec<VertexRef>,
}

impl NewPolygon {
    pub fn id(&self) -> PolygonId {
        self.id
    }

    pub fn vertices(&self) -> &[VertexRef] {
        &self.vertices
    }
}

/// Everything one import adds, applied by the host as a single unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeSet {
    label: String,
    points: Vec<NewPoint>,
    polygons: Vec<NewPolygon>,
}

impl ChangeSet {
    /// Description of the change for the host's history
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Points to create, in identity order
    pub fn points(&self) -> &[NewPoint] {
        &self.points
    }

    /// Outlines to create, in document order
    pub fn polygons(&self) -> &[NewPolygon] {
        &self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.polygons.is_empty()
    }
}

/// Build the change set for a conflated batch.
///
/// A new point is emitted when it was not rewired and some emitted outline
/// references it.
pub fn emit(
    batch: &DedupedBatch,
    conflation: &Conflation,
    projection: &dyn Projection,
    label: &str,
) -> ChangeSet {
    let polygons: Vec<NewPolygon> = batch
        .polygons()
        .iter()
        .zip(conflation.decisions())
        .filter(|(_, decision)| decision.is_emitted())
        .map(|(polygon, _)| NewPolygon {
            id: polygon.id(),
            vertices: conflation.resolve(polygon),
        })
        .collect();

    let mut referenced = vec![false; batch.points().len()];
    for id in polygons
        .iter()
        .flat_map(|p| p.vertices.iter())
        .filter_map(|vertex| vertex.as_new())
    {
        if let Some(slot) = referenced.get_mut(id.index()) {
            *slot = true;
        }
    }

    let points: Vec<NewPoint> = batch
        .points()
        .iter()
        .filter(|point| referenced[point.id().index()])
        .map(|point| NewPoint {
            id: point.id(),
            position: point.position(),
            geo: projection.planar_to_geographic(point.position()),
        })
        .collect();

    debug!(points = points.len(), polygons = polygons.len(); "Change set emitted");
    if polygons.is_empty() {
        info!("Nothing to add, every outline already exists");
    }

    ChangeSet {
        label: label.to_owned(),
        points,
        polygons,
    }
}

#[cfg(test)]
mod tests {
    use footprint_core::{
        dataset::ExistingPoint,
        geometry::RawPolygon,
        identifier::ExistingId,
        projection::IdentityProjection,
    };

    use super::*;
    use crate::{
        conflate::conflate,
        dedup::{Proximity, deduplicate},
    };

    fn square(x: f64, y: f64) -> RawPolygon {
        RawPolygon::new(vec![
            PlanarPoint::new(x, y),
            PlanarPoint::new(x + 10.0, y),
            PlanarPoint::new(x + 10.0, y + 10.0),
            PlanarPoint::new(x, y + 10.0),
        ])
        .unwrap()
    }

    fn run(polygons: &[RawPolygon], existing: &[ExistingPoint]) -> ChangeSet {
        let proximity = Proximity::default();
        let batch = deduplicate(polygons, &proximity);
        let conflation = conflate(&batch, existing, &proximity);
        emit(&batch, &conflation, &IdentityProjection, "Create buildings")
    }

    #[test]
    fn test_points_precede_polygons_and_keep_order() {
        let change_set = run(&[square(0.0, 0.0), square(10.0, 0.0)], &[]);

        assert_eq!(change_set.label(), "Create buildings");
        let ids: Vec<usize> = change_set.points().iter().map(|p| p.id().index()).collect();
        assert_eq!(ids, [0, 1, 2, 3, 4, 5]);

        let polygons: Vec<usize> = change_set.polygons().iter().map(|p| p.id().index()).collect();
        assert_eq!(polygons, [0, 1]);
    }

    #[test]
    fn test_points_carry_projected_position() {
        let change_set = run(&[square(2.0, 48.0)], &[]);
        let point = &change_set.points()[0];
        assert_eq!(point.geo(), GeoCoordinate::new(48.0, 2.0));
    }

    #[test]
    fn test_rewired_points_are_not_emitted() {
        let existing = [ExistingPoint::new(ExistingId::new(9), PlanarPoint::new(10.0, 0.0))];
        let change_set = run(&[square(0.0, 0.0)], &existing);

        assert_eq!(change_set.points().len(), 3);
        assert!(change_set.points().iter().all(|p| p.id() != PointId::new(1)));
        assert_eq!(
            change_set.polygons()[0].vertices()[1],
            VertexRef::Existing(ExistingId::new(9))
        );
    }

    #[test]
    fn test_redundant_outline_emits_nothing() {
        let existing: Vec<ExistingPoint> = square(0.0, 0.0)
            .vertices()
            .iter()
            .enumerate()
            .map(|(i, &p)| ExistingPoint::new(ExistingId::new(i as u64), p))
            .collect();
        let change_set = run(&[square(0.0, 0.0)], &existing);

        assert!(change_set.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let existing = [ExistingPoint::new(ExistingId::new(9), PlanarPoint::new(10.0, 0.0))];
        let change_set = run(&[square(0.0, 0.0)], &existing);
        let json = serde_json::to_value(&change_set).unwrap();

        assert_eq!(json["label"], "Create buildings");
        assert_eq!(json["points"][0]["id"], 0);
        assert_eq!(json["points"][0]["position"]["x"], 0.0);
        assert_eq!(json["points"][0]["geo"]["lat"], 0.0);
        assert_eq!(json["polygons"][0]["vertices"][1]["kind"], "existing");
        assert_eq!(json["polygons"][0]["vertices"][1]["id"], 9);
    }
}
