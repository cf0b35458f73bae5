//! Export of change sets.
//!
//! This module provides the [`Exporter`] trait for writing a [`ChangeSet`]
//! to an output format. It is the last stage of an import.
//!
//! # Pipeline Position
//!
//! ```text
//! Document Text
//!     ↓ parse
//! Raw Outlines
//!     ↓ axis correction, deduplication
//! Identified Batch
//!     ↓ conflation
//! Change Set
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`json`] - JSON output via [`json::JsonExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`FootprintError::Export`] at the crate boundary.
//!
//! [`FootprintError::Export`]: crate::FootprintError::Export

/// JSON export backend.
pub mod json;

use crate::changeset::ChangeSet;

/// Abstraction for change set export backends.
pub trait Exporter {
    /// Writes `change_set` in the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if the change set cannot be represented in
    /// the target format, or [`Error::Io`] if writing the output fails.
    fn export_change_set(&mut self, change_set: &ChangeSet) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The change set cannot be represented in the target format
    #[error("Encode error: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
}
