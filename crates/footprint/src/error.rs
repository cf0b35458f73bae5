//! Error types for Footprint operations.
//!
//! This module provides the main error type [`FootprintError`] which wraps
//! the error conditions that can occur during an import.

use std::io;

use thiserror::Error;

use footprint_core::dataset::DatasetError;
use footprint_parser::error::ParseError;

/// The main error type for Footprint operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant contains structured error information with document
/// spans, together with the document text they point into, for rich error
/// reporting.
#[derive(Debug, Error)]
pub enum FootprintError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for FootprintError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl FootprintError {
    /// Create a new `Parse` error with the associated document text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
