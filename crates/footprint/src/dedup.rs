//! Identity assignment for the vertices of one import batch.
//!
//! Adjacent outlines on a cadastre sheet share corners, but each outline
//! carries its own copy of the coordinates, slightly perturbed by rounding.
//! [`deduplicate`] gives every vertex a [`PointId`] so that vertices closer
//! than the [`Proximity`] tolerance share one identity.
//!
//! The scan is quadratic and order dependent: a vertex takes the identity
//! of the *first* allocated point within tolerance, even when a later one
//! is closer.

use std::collections::HashSet;

use log::{debug, trace};

use footprint_core::{
    geometry::{PlanarPoint, RawPolygon},
    identifier::{PointId, PolygonId},
};

/// Distance function used to compare two planar points
pub type DistanceFn = fn(PlanarPoint, PlanarPoint) -> f64;

fn euclidean(a: PlanarPoint, b: PlanarPoint) -> f64 {
    a.distance(b)
}

/// Tolerance under which two points are the same point.
///
/// Two points are near when their distance is strictly below `epsilon`.
///
/// # Examples
///
/// ```
/// # use footprint::dedup::Proximity;
/// # use footprint_core::geometry::PlanarPoint;
/// let proximity = Proximity::default();
/// let origin = PlanarPoint::new(0.0, 0.0);
///
/// assert!(proximity.is_near(origin, PlanarPoint::new(0.049, 0.0)));
/// assert!(!proximity.is_near(origin, PlanarPoint::new(0.05, 0.0)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Proximity {
    epsilon: f64,
    distance: DistanceFn,
}

impl Proximity {
    /// Tolerance in planar units (metres for Lambert 93 sheets)
    pub const DEFAULT_EPSILON: f64 = 0.05;

    /// Creates a Euclidean proximity with the given tolerance
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            distance: euclidean,
        }
    }

    /// Replaces the distance function
    pub fn with_distance(mut self, distance: DistanceFn) -> Self {
        self.distance = distance;
        self
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns true if `a` and `b` are closer than the tolerance
    pub fn is_near(&self, a: PlanarPoint, b: PlanarPoint) -> bool {
        (self.distance)(a, b) < self.epsilon
    }
}

impl Default for Proximity {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EPSILON)
    }
}

/// A vertex position that has been given an identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdentifiedPoint {
    id: PointId,
    position: PlanarPoint,
}

impl IdentifiedPoint {
    pub fn id(&self) -> PointId {
        self.id
    }

    pub fn position(&self) -> PlanarPoint {
        self.position
    }
}

/// An outline expressed as a closed ring of point identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPolygon {
    id: PolygonId,
    ring: Vec<PointId>,
}

impl LocalPolygon {
    /// Index of the outline in the input batch
    pub fn id(&self) -> PolygonId {
        self.id
    }

    /// The closed ring: the first identity is repeated at the end
    pub fn ring(&self) -> &[PointId] {
        &self.ring
    }

    /// The ring without its closing identity
    pub fn vertices(&self) -> &[PointId] {
        &self.ring[..self.ring.len().saturating_sub(1)]
    }
}

/// The identified points and outlines of one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupedBatch {
    points: Vec<IdentifiedPoint>,
    polygons: Vec<LocalPolygon>,
    collapsed: usize,
}

impl DedupedBatch {
    /// Points in identity order; `points()[i].id().index() == i`
    pub fn points(&self) -> &[IdentifiedPoint] {
        &self.points
    }

    pub fn point(&self, id: PointId) -> Option<&IdentifiedPoint> {
        self.points.get(id.index())
    }

    /// Outlines in input order
    pub fn polygons(&self) -> &[LocalPolygon] {
        &self.polygons
    }

    /// Number of outlines dropped because their vertices merged
    pub fn collapsed(&self) -> usize {
        self.collapsed
    }
}

/// Assign identities to the vertices of `polygons`.
///
/// Vertices are visited polygon by polygon, in order. Each one either takes
/// the identity of the first known point within tolerance or becomes a new
/// point. Consecutive vertices of an outline that end up with the same
/// identity are merged; an outline left with fewer than three distinct
/// identities is dropped. Only points referenced by a remaining outline are
/// returned, renumbered in allocation order.
pub fn deduplicate(polygons: &[RawPolygon], proximity: &Proximity) -> DedupedBatch {
    let mut allocated: Vec<PlanarPoint> = Vec::new();
    let mut rings: Vec<(PolygonId, Vec<usize>)> = Vec::with_capacity(polygons.len());
    let mut collapsed = 0;

    for (index, polygon) in polygons.iter().enumerate() {
        let mut ring: Vec<usize> = Vec::with_capacity(polygon.len() + 1);
        for &vertex in polygon.vertices() {
            let slot = match allocated
                .iter()
                .position(|&known| proximity.is_near(known, vertex))
            {
                Some(slot) => slot,
                None => {
                    allocated.push(vertex);
                    allocated.len() - 1
                }
            };
            if ring.last() != Some(&slot) {
                ring.push(slot);
            }
        }
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }

        let distinct: HashSet<usize> = ring.iter().copied().collect();
        if distinct.len() < RawPolygon::MIN_VERTICES {
            debug!(polygon = index, distinct = distinct.len(); "Outline collapsed after merging vertices");
            collapsed += 1;
            continue;
        }

        if let Some(&first) = ring.first() {
            ring.push(first);
        }
        rings.push((PolygonId::new(index), ring));
    }

    // Renumber the points that are still referenced.
    let mut referenced = vec![false; allocated.len()];
    for (_, ring) in &rings {
        for &slot in ring {
            referenced[slot] = true;
        }
    }
    let mut renumbered: Vec<Option<PointId>> = vec![None; allocated.len()];
    let mut points = Vec::with_capacity(allocated.len());
    for (slot, position) in allocated.iter().enumerate() {
        if referenced[slot] {
            let id = PointId::new(points.len());
            renumbered[slot] = Some(id);
            points.push(IdentifiedPoint {
                id,
                position: *position,
            });
        }
    }

    let polygons: Vec<LocalPolygon> = rings
        .into_iter()
        .map(|(id, ring)| LocalPolygon {
            id,
            ring: ring
                .into_iter()
                .filter_map(|slot| renumbered[slot])
                .collect(),
        })
        .collect();

    debug!(
        vertices = polygons.iter().map(|p| p.vertices().len()).sum::<usize>(),
        points = points.len(),
        polygons = polygons.len(),
        collapsed;
        "Batch deduplicated"
    );
    trace!(points:?; "Identified points");

    DedupedBatch {
        points,
        polygons,
        collapsed,
    }
}
