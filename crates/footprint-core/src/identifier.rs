//! Identity handles for points and polygons.
//!
//! New entities created by an import are identified by small indices
//! allocated in order ([`PointId`], [`PolygonId`]). Entities that already
//! live in the map dataset carry the dataset's own identifier
//! ([`ExistingId`]). A polygon vertex refers to either kind through
//! [`VertexRef`], so rewiring a vertex onto an existing point is a matter
//! of rebuilding a reference list rather than mutating shared geometry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a point allocated during an import.
///
/// Ids are assigned in allocation order starting at zero, so ordering by
/// id is ordering by first appearance in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(usize);

impl PointId {
    /// Creates a point id from its allocation index
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the allocation index
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "new:{}", self.0)
    }
}

/// Identity of a polygon built during an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolygonId(usize);

impl PolygonId {
    /// Creates a polygon id from its allocation index
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the allocation index
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "polygon:{}", self.0)
    }
}

/// Identity of a point that already exists in the target dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExistingId(u64);

impl ExistingId {
    /// Wraps a dataset identifier
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw dataset identifier
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExistingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "existing:{}", self.0)
    }
}

/// A polygon vertex, referring either to a new point or to an existing one.
///
/// # Examples
///
/// ```
/// use footprint_core::identifier::{ExistingId, PointId, VertexRef};
///
/// let fresh = VertexRef::New(PointId::new(3));
/// let reused = VertexRef::Existing(ExistingId::new(42));
///
/// assert!(fresh.is_new());
/// assert_eq!(reused.to_string(), "existing:42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum VertexRef {
    /// A point created by this import
    New(PointId),
    /// A point already present in the dataset
    Existing(ExistingId),
}

impl VertexRef {
    /// Returns true if the vertex refers to a point created by this import
    pub fn is_new(self) -> bool {
        matches!(self, VertexRef::New(_))
    }

    /// Returns the new point id, if any
    pub fn as_new(self) -> Option<PointId> {
        match self {
            VertexRef::New(id) => Some(id),
            VertexRef::Existing(_) => None,
        }
    }
}

impl fmt::Display for VertexRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexRef::New(id) => write!(f, "{id}"),
            VertexRef::Existing(id) => write!(f, "{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_id_ordering_follows_allocation() {
        assert!(PointId::new(0) < PointId::new(1));
        assert_eq!(PointId::new(7).index(), 7);
    }

    #[test]
    fn test_display() {
        assert_eq!(PointId::new(2).to_string(), "new:2");
        assert_eq!(PolygonId::new(1).to_string(), "polygon:1");
        assert_eq!(ExistingId::new(99).to_string(), "existing:99");
        assert_eq!(VertexRef::New(PointId::new(5)).to_string(), "new:5");
    }

    #[test]
    fn test_vertex_ref_as_new() {
        assert_eq!(
            VertexRef::New(PointId::new(4)).as_new(),
            Some(PointId::new(4))
        );
        assert_eq!(VertexRef::Existing(ExistingId::new(4)).as_new(), None);
        assert!(!VertexRef::Existing(ExistingId::new(4)).is_new());
    }
}
