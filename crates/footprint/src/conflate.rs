//! Conflation of a deduplicated batch into an existing dataset.
//!
//! Every new point that lies within tolerance of an existing, live point is
//! rewired onto it. An outline whose every corner was rewired already exists
//! in the dataset and is dropped. Rewiring can bring two corners of an
//! outline onto the same existing point; such corners are merged the same
//! way deduplication merges them.

use std::collections::{BTreeMap, HashSet};

use log::{debug, trace};

use footprint_core::{
    dataset::ExistingDataset,
    geometry::RawPolygon,
    identifier::{ExistingId, PointId, VertexRef},
};

use crate::dedup::{DedupedBatch, LocalPolygon, Proximity};

/// What happens to one outline of the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflationDecision {
    /// No corner matches an existing point
    Keep,
    /// Some corners are replaced by the existing points they match
    RewireSome(BTreeMap<PointId, ExistingId>),
    /// Every corner matches an existing point; the outline is not emitted
    Redundant,
    /// Rewiring left fewer than three distinct corners; the outline is not
    /// emitted
    Collapsed,
}

impl ConflationDecision {
    /// Returns true if the outline is part of the change set
    pub fn is_emitted(&self) -> bool {
        !matches!(
            self,
            ConflationDecision::Redundant | ConflationDecision::Collapsed
        )
    }
}

/// Result of conflating a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conflation {
    matches: BTreeMap<PointId, ExistingId>,
    decisions: Vec<ConflationDecision>,
}

impl Conflation {
    /// Existing point each rewired new point resolves to
    pub fn matches(&self) -> &BTreeMap<PointId, ExistingId> {
        &self.matches
    }

    pub fn matched(&self, id: PointId) -> Option<ExistingId> {
        self.matches.get(&id).copied()
    }

    /// One decision per outline, parallel to [`DedupedBatch::polygons`]
    pub fn decisions(&self) -> &[ConflationDecision] {
        &self.decisions
    }

    /// Resolve the ring of `polygon` against the matches.
    ///
    /// Consecutive corners rewired onto the same existing point are merged,
    /// wrap-around included. The returned ring is closed.
    pub fn resolve(&self, polygon: &LocalPolygon) -> Vec<VertexRef> {
        resolve_ring(polygon, &self.matches)
    }
}

fn resolve_ring(polygon: &LocalPolygon, matches: &BTreeMap<PointId, ExistingId>) -> Vec<VertexRef> {
    let mut ring: Vec<VertexRef> = Vec::with_capacity(polygon.ring().len());
    for &id in polygon.vertices() {
        let vertex = match matches.get(&id) {
            Some(&existing) => VertexRef::Existing(existing),
            None => VertexRef::New(id),
        };
        if ring.last() != Some(&vertex) {
            ring.push(vertex);
        }
    }
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    if let Some(&first) = ring.first() {
        ring.push(first);
    }
    ring
}

fn distinct_vertices(ring: &[VertexRef]) -> usize {
    ring.iter().collect::<HashSet<_>>().len()
}

/// Match every point of `batch` against `dataset` and decide the fate of
/// each outline.
///
/// Points are visited in identity order. Each takes the first live existing
/// point within tolerance, in dataset order; deleted and incomplete points
/// are ignored. The dataset is only read.
pub fn conflate<D>(batch: &DedupedBatch, dataset: &D, proximity: &Proximity) -> Conflation
where
    D: ExistingDataset + ?Sized,
{
    let mut matches = BTreeMap::new();
    for point in batch.points() {
        let hit = dataset
            .points()
            .filter(|existing| existing.is_matchable())
            .find(|existing| proximity.is_near(point.position(), existing.position()));
        if let Some(existing) = hit {
            trace!(point:% = point.id(), existing:% = existing.id(); "Point rewired");
            matches.insert(point.id(), existing.id());
        }
    }

    let decisions: Vec<ConflationDecision> = batch
        .polygons()
        .iter()
        .map(|polygon| {
            let rewired: BTreeMap<PointId, ExistingId> = polygon
                .vertices()
                .iter()
                .filter_map(|&id| matches.get(&id).map(|&existing| (id, existing)))
                .collect();
            let all_rewired = polygon.vertices().iter().all(|id| rewired.contains_key(id));

            if rewired.is_empty() {
                ConflationDecision::Keep
            } else if all_rewired {
                ConflationDecision::Redundant
            } else if distinct_vertices(&resolve_ring(polygon, &matches)) < RawPolygon::MIN_VERTICES {
                debug!(polygon:% = polygon.id(); "Outline collapsed after rewiring");
                ConflationDecision::Collapsed
            } else {
                ConflationDecision::RewireSome(rewired)
            }
        })
        .collect();

    debug!(
        points = batch.points().len(),
        matched = matches.len(),
        dropped = decisions.iter().filter(|d| !d.is_emitted()).count();
        "Batch conflated"
    );

    Conflation { matches, decisions }
}
