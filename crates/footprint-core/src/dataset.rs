//! Read-only access to the dataset an import is conflated into.
//!
//! The dataset is owned by the host application. The import pipeline only
//! iterates over its points to find ones that coincide with new geometry;
//! it never adds, removes or flags anything.

use std::collections::HashSet;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::{geometry::PlanarPoint, identifier::ExistingId};

/// Errors raised while assembling an in-memory [`Dataset`].
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("point {0} appears more than once in the dataset")]
    DuplicateId(ExistingId),

    #[error("point {0} has a non-finite position")]
    NonFinitePosition(ExistingId),
}

/// A point already committed to the map.
///
/// Points flagged as deleted or incomplete are still visible to callers
/// but never take part in proximity matching (see [`ExistingPoint::is_matchable`]).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExistingPoint {
    id: ExistingId,
    #[serde(flatten)]
    position: PlanarPoint,
    #[serde(default)]
    deleted: bool,
    #[serde(default)]
    incomplete: bool,
}

impl ExistingPoint {
    /// Creates a live, complete point
    pub fn new(id: ExistingId, position: PlanarPoint) -> Self {
        Self {
            id,
            position,
            deleted: false,
            incomplete: false,
        }
    }

    /// Marks the point as deleted
    pub fn with_deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }

    /// Marks the point as incomplete (position not fully known)
    pub fn with_incomplete(mut self, incomplete: bool) -> Self {
        self.incomplete = incomplete;
        self
    }

    pub fn id(&self) -> ExistingId {
        self.id
    }

    pub fn position(&self) -> PlanarPoint {
        self.position
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn is_incomplete(&self) -> bool {
        self.incomplete
    }

    /// Returns true if new geometry may be snapped onto this point
    pub fn is_matchable(&self) -> bool {
        !self.deleted && !self.incomplete
    }
}

/// Read-only accessor into the dataset new geometry is merged into.
///
/// Iteration order matters: when several existing points lie within the
/// proximity tolerance of a new point, the first one yielded wins.
pub trait ExistingDataset {
    /// Iterates over every point of the dataset, including deleted and
    /// incomplete ones.
    fn points(&self) -> impl Iterator<Item = &ExistingPoint>;
}

/// An in-memory dataset snapshot.
///
/// # Examples
///
/// ```
/// use footprint_core::dataset::{Dataset, ExistingDataset, ExistingPoint};
/// use footprint_core::geometry::PlanarPoint;
/// use footprint_core::identifier::ExistingId;
///
/// let dataset = Dataset::new(vec![
///     ExistingPoint::new(ExistingId::new(1), PlanarPoint::new(0.0, 0.0)),
///     ExistingPoint::new(ExistingId::new(2), PlanarPoint::new(5.0, 0.0)).with_deleted(true),
/// ])
/// .unwrap();
///
/// assert_eq!(dataset.points().count(), 2);
/// assert_eq!(dataset.points().filter(|p| p.is_matchable()).count(), 1);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "DatasetDocument")]
pub struct Dataset {
    points: Vec<ExistingPoint>,
}

impl Dataset {
    /// Builds a dataset, rejecting duplicate ids and non-finite positions.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] for the first offending point.
    pub fn new(points: Vec<ExistingPoint>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::with_capacity(points.len());
        for point in &points {
            if !seen.insert(point.id) {
                return Err(DatasetError::DuplicateId(point.id));
            }
            if !point.position.is_finite() {
                return Err(DatasetError::NonFinitePosition(point.id));
            }
        }

        debug!(points = points.len(); "Dataset snapshot loaded");
        Ok(Self { points })
    }

    /// Returns the number of points, including unmatchable ones
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the dataset holds no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ExistingDataset for Dataset {
    fn points(&self) -> impl Iterator<Item = &ExistingPoint> {
        self.points.iter()
    }
}

impl ExistingDataset for [ExistingPoint] {
    fn points(&self) -> impl Iterator<Item = &ExistingPoint> {
        self.iter()
    }
}

/// On-disk shape of a dataset snapshot, before validation.
#[derive(Debug, Default, Deserialize)]
pub struct DatasetDocument {
    #[serde(default)]
    pub points: Vec<ExistingPoint>,
}

impl TryFrom<DatasetDocument> for Dataset {
    type Error = DatasetError;

    fn try_from(document: DatasetDocument) -> Result<Self, Self::Error> {
        Dataset::new(document.points)
    }
}
