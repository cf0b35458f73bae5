//! Configuration types for Footprint imports.
//!
//! All types implement [`serde::Deserialize`]; every field has a default,
//! so an empty document deserializes to [`AppConfig::default`].
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`DocumentConfig`] - Which paths are read from a document.
//! - [`ConflationConfig`] - Proximity tolerance for merging points.
//! - [`ProjectionConfig`] - Planar to geographic conversion of new points.
//! - [`ChangeSetConfig`] - Metadata attached to the produced change set.
//!
//! # Example
//!
//! ```
//! # use footprint::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.conflation().epsilon(), 0.05);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use footprint_core::projection::ProjectionKind;
use footprint_parser::ParseOptions;

use crate::{FootprintError, dedup::Proximity};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Document reading section.
    #[serde(default)]
    document: DocumentConfig,

    /// Conflation section.
    #[serde(default)]
    conflation: ConflationConfig,

    /// Projection section.
    #[serde(default)]
    projection: ProjectionConfig,

    /// Change set section.
    #[serde(default)]
    change_set: ChangeSetConfig,
}

impl AppConfig {
    /// Creates a configuration from its sections.
    pub fn new(
        document: DocumentConfig,
        conflation: ConflationConfig,
        projection: ProjectionConfig,
        change_set: ChangeSetConfig,
    ) -> Self {
        Self {
            document,
            conflation,
            projection,
            change_set,
        }
    }

    pub fn document(&self) -> &DocumentConfig {
        &self.document
    }

    pub fn conflation(&self) -> &ConflationConfig {
        &self.conflation
    }

    pub fn projection(&self) -> &ProjectionConfig {
        &self.projection
    }

    pub fn change_set(&self) -> &ChangeSetConfig {
        &self.change_set
    }

    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`FootprintError::Config`] if the conflation tolerance is not
    /// a positive finite number.
    pub fn validate(&self) -> Result<(), FootprintError> {
        let epsilon = self.conflation.epsilon;
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(FootprintError::Config(format!(
                "conflation epsilon must be a positive number, got {epsilon}"
            )));
        }
        Ok(())
    }
}

/// Which paths are read from a document.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    /// Only read paths whose data ends with a close marker.
    #[serde(default = "default_closed_paths_only")]
    closed_paths_only: bool,
}

impl DocumentConfig {
    pub fn new(closed_paths_only: bool) -> Self {
        Self { closed_paths_only }
    }

    pub fn closed_paths_only(&self) -> bool {
        self.closed_paths_only
    }

    /// Parser options for this section.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            closed_paths_only: self.closed_paths_only,
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self::new(default_closed_paths_only())
    }
}

fn default_closed_paths_only() -> bool {
    true
}

/// Proximity tolerance for merging points.
#[derive(Debug, Clone, Deserialize)]
pub struct ConflationConfig {
    /// Distance, in planar units, under which two points are the same.
    #[serde(default = "default_epsilon")]
    epsilon: f64,
}

impl ConflationConfig {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Euclidean proximity with the configured tolerance.
    pub fn proximity(&self) -> Proximity {
        Proximity::new(self.epsilon)
    }
}

impl Default for ConflationConfig {
    fn default() -> Self {
        Self::new(default_epsilon())
    }
}

fn default_epsilon() -> f64 {
    Proximity::DEFAULT_EPSILON
}

/// Planar to geographic conversion of new points.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectionConfig {
    /// Projection of the document's planar coordinates.
    #[serde(default)]
    kind: ProjectionKind,
}

impl ProjectionConfig {
    pub fn new(kind: ProjectionKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }
}

/// Metadata attached to the produced change set.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeSetConfig {
    /// Description of the change shown in the host's history.
    #[serde(default = "default_label")]
    label: String,
}

impl ChangeSetConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for ChangeSetConfig {
    fn default() -> Self {
        Self::new(default_label())
    }
}

fn default_label() -> String {
    "Create buildings".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.document().closed_paths_only());
        assert_eq!(config.conflation().epsilon(), 0.05);
        assert_eq!(config.projection().kind(), ProjectionKind::Lambert93);
        assert_eq!(config.change_set().label(), "Create buildings");
    }

    #[test]
    fn test_validate_rejects_unusable_epsilon() {
        for epsilon in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = AppConfig::new(
                DocumentConfig::default(),
                ConflationConfig::new(epsilon),
                ProjectionConfig::default(),
                ChangeSetConfig::default(),
            );
            assert!(
                matches!(config.validate(), Err(FootprintError::Config(_))),
                "epsilon {epsilon} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_options_follow_document_section() {
        let options = DocumentConfig::new(false).parse_options();
        assert!(!options.closed_paths_only);
    }
}
