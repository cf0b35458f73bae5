//! Summary of what an import did.

use std::fmt;

use serde::Serialize;

use footprint_core::geometry::BoundingBox;
use footprint_parser::{Discard, ParsedDocument};

use crate::{
    changeset::ChangeSet,
    conflate::{Conflation, ConflationDecision},
    dedup::DedupedBatch,
};

/// Number of discarded paths, by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiscardCounts {
    pub empty: usize,
    pub empty_coordinate: usize,
    pub missing_coordinate: usize,
    pub degenerate: usize,
}

impl DiscardCounts {
    fn record(&mut self, reason: &Discard) {
        match reason {
            Discard::Empty => self.empty += 1,
            Discard::EmptyCoordinate { .. } => self.empty_coordinate += 1,
            Discard::MissingCoordinate => self.missing_coordinate += 1,
            Discard::Degenerate { .. } => self.degenerate += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.empty + self.empty_coordinate + self.missing_coordinate + self.degenerate
    }
}

/// Counters describing one import, from document to change set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    /// Area the caller asked for, as given
    pub window: Option<BoundingBox>,
    /// `<path>` elements with path data
    pub paths_seen: usize,
    /// Paths left out because they are not closed
    pub open_paths: usize,
    /// Paths skipped because their data is malformed
    pub skipped_paths: usize,
    pub discarded: DiscardCounts,
    /// Outlines reconstructed from the document
    pub polygons_built: usize,
    /// Outlines dropped because their corners merged together, during
    /// deduplication or rewiring
    pub polygons_collapsed: usize,
    /// Distinct points after deduplication
    pub points_identified: usize,
    /// Points rewired onto existing points
    pub points_matched: usize,
    pub polygons_kept: usize,
    pub polygons_rewired: usize,
    pub polygons_redundant: usize,
    pub points_emitted: usize,
    pub polygons_emitted: usize,
}

impl ImportReport {
    pub(crate) fn new(
        window: Option<BoundingBox>,
        document: &ParsedDocument,
        batch: &DedupedBatch,
        conflation: &Conflation,
        change_set: &ChangeSet,
    ) -> Self {
        let mut discarded = DiscardCounts::default();
        for path in document.discarded() {
            discarded.record(path.reason());
        }

        let count = |f: fn(&ConflationDecision) -> bool| conflation.decisions().iter().filter(|d| f(d)).count();

        Self {
            window,
            paths_seen: document.paths_seen(),
            open_paths: document.open_paths(),
            skipped_paths: document.skipped().len(),
            discarded,
            polygons_built: document.polygons().len(),
            polygons_collapsed: batch.collapsed()
                + count(|d| matches!(d, ConflationDecision::Collapsed)),
            points_identified: batch.points().len(),
            points_matched: conflation.matches().len(),
            polygons_kept: count(|d| matches!(d, ConflationDecision::Keep)),
            polygons_rewired: count(|d| matches!(d, ConflationDecision::RewireSome(_))),
            polygons_redundant: count(|d| matches!(d, ConflationDecision::Redundant)),
            points_emitted: change_set.points().len(),
            polygons_emitted: change_set.polygons().len(),
        }
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} paths, {} outlines built, {} new points and {} outlines emitted \
             ({} points matched, {} outlines already present)",
            self.paths_seen,
            self.polygons_built,
            self.points_emitted,
            self.polygons_emitted,
            self.points_matched,
            self.polygons_redundant,
        )
    }
}
