//! # Footprint Parser
//!
//! Reads building outline documents: SVG files whose root `viewBox` gives
//! the planar extent of the drawing and whose `<path>` elements each trace
//! one outline as an absolute moveto followed by relative lineto segments.
//!
//! ## Usage
//!
//! ```
//! # use footprint_parser::{parse_document, ParseOptions, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"<svg viewBox="0 0 100 100">
//!         <path d="M10 20l5 5 -3 2Z"/>
//!     </svg>"#;
//!
//!     let document = parse_document(source, &ParseOptions::default())?;
//!     assert_eq!(document.polygons().len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! Coordinates are returned exactly as drawn, in the document's own
//! downward-pointing y axis; flipping them is left to the caller.

mod document;
pub mod error;
mod lexer;
pub mod path;
mod span;
mod tokens;
pub mod viewbox;

pub use error::{Diagnostic, ErrorCode, ParseError};
pub use path::{Discard, Reconstruction};
pub use span::Span;

use log::{debug, info, warn};

use footprint_core::geometry::{BoundingBox, RawPolygon};

use error::DiagnosticCollector;

/// Options controlling which paths are read from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Only read paths whose data ends with a close marker
    pub closed_paths_only: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            closed_paths_only: true,
        }
    }
}

/// A path that was dropped as an artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscardedPath {
    element: Span,
    reason: Discard,
}

impl DiscardedPath {
    /// The `<path>` element in the document
    pub fn element(&self) -> Span {
        self.element
    }

    pub fn reason(&self) -> &Discard {
        &self.reason
    }
}

/// The outlines read from one document.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    view_box: BoundingBox,
    polygons: Vec<RawPolygon>,
    skipped: Vec<Diagnostic>,
    discarded: Vec<DiscardedPath>,
    paths_seen: usize,
    open_paths: usize,
}

impl ParsedDocument {
    /// The declared extent of the drawing
    pub fn view_box(&self) -> BoundingBox {
        self.view_box
    }

    /// Reconstructed outlines, in document order
    pub fn polygons(&self) -> &[RawPolygon] {
        &self.polygons
    }

    /// Paths with malformed data, one diagnostic each.
    ///
    /// Spans point into the document text.
    pub fn skipped(&self) -> &[Diagnostic] {
        &self.skipped
    }

    pub fn discarded(&self) -> &[DiscardedPath] {
        &self.discarded
    }

    /// Number of `<path>` elements with a `d` attribute
    pub fn paths_seen(&self) -> usize {
        self.paths_seen
    }

    /// Number of paths left out because they are not closed
    pub fn open_paths(&self) -> usize {
        self.open_paths
    }
}

/// Parse a document into raw outlines.
///
/// Paths are read in document order:
///
/// 1. **Scan** - Resolve the root `viewBox` and collect path data
/// 2. **Reconstruct** - Turn each path into absolute vertices
///
/// A path with malformed data is skipped and reported through
/// [`ParsedDocument::skipped`]; a path that is an artifact of the producer
/// is recorded in [`ParsedDocument::discarded`]. Neither stops the parse.
///
/// # Errors
///
/// Returns a [`ParseError`] if the document is not well-formed XML, its
/// root is not `<svg>`, or its `viewBox` is missing or invalid.
pub fn parse_document(source: &str, options: &ParseOptions) -> Result<ParsedDocument, ParseError> {
    info!(bytes = source.len(); "Parsing document");

    let scan = document::scan(source, options.closed_paths_only)?;
    debug!(view_box:? = scan.view_box, paths = scan.paths.len(); "Document scanned");

    let mut polygons = Vec::with_capacity(scan.paths.len());
    let mut discarded = Vec::new();
    let mut collector = DiagnosticCollector::new();

    for source_path in &scan.paths {
        match path::reconstruct(&source_path.data) {
            Ok(Reconstruction::Polygon(polygon)) => polygons.push(polygon),
            Ok(Reconstruction::Discarded(reason)) => {
                debug!(element:? = source_path.element, reason:% = reason; "Path discarded");
                discarded.push(DiscardedPath {
                    element: source_path.element,
                    reason,
                });
            }
            Err(diagnostic) => {
                let diagnostic = match source_path.data_offset {
                    Some(offset) => diagnostic.shifted(offset),
                    None => diagnostic.without_labels(),
                }
                .with_secondary_label(source_path.element, "in this path");
                warn!(diagnostic:%; "Skipping path");
                collector.emit(diagnostic);
            }
        }
    }

    if collector.has_errors() {
        warn!("Some paths could not be read");
    }
    let skipped = collector.finish();

    info!(
        paths_seen = scan.paths_seen,
        polygons = polygons.len(),
        discarded = discarded.len(),
        skipped = skipped.len(),
        open_paths = scan.open_paths;
        "Document parsed"
    );

    Ok(ParsedDocument {
        view_box: scan.view_box,
        polygons,
        skipped,
        discarded,
        paths_seen: scan.paths_seen,
        open_paths: scan.open_paths,
    })
}
