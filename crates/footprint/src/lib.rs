//! Footprint - Import building outlines from SVG cadastre sheets.
//!
//! A cadastre sheet draws each building as one closed `<path>`. This library
//! reads those outlines, brings them back into map orientation, merges the
//! corners that neighbouring outlines share, and conflates the result with
//! the points already present in a map dataset. The output is a
//! [`ChangeSet`] that adds only what is missing.

pub mod axis;
pub mod changeset;
pub mod config;
pub mod conflate;
pub mod dedup;
pub mod export;
pub mod report;

mod error;

pub use footprint_core::{dataset, geometry, identifier, projection};
pub use footprint_parser::{Diagnostic, ParsedDocument};

pub use changeset::ChangeSet;
pub use error::FootprintError;
pub use report::ImportReport;

use std::fmt;

use log::{debug, info, trace};

use footprint_core::{
    dataset::ExistingDataset,
    geometry::{BoundingBox, RawPolygon},
    projection::Projection,
};

use config::AppConfig;

/// The product of one import.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    change_set: ChangeSet,
    report: ImportReport,
    skipped: Vec<Diagnostic>,
}

impl ImportOutcome {
    pub fn change_set(&self) -> &ChangeSet {
        &self.change_set
    }

    pub fn report(&self) -> &ImportReport {
        &self.report
    }

    /// Diagnostics for the paths that were skipped as malformed
    pub fn skipped(&self) -> &[Diagnostic] {
        &self.skipped
    }
}

/// Builder for importing outline documents.
///
/// A builder holds no state between imports and can be shared across
/// threads. Imports against one dataset must still be serialized by the
/// caller so that each sees the previous one's commit.
///
/// # Examples
///
/// ```rust
/// use footprint::{ImportBuilder, config::AppConfig, dataset::Dataset};
///
/// let source = r#"<svg viewBox="0 0 100 100">
///     <path d="M10 20l5 5 -3 2Z"/>
/// </svg>"#;
///
/// let builder = ImportBuilder::new(AppConfig::default());
/// let outcome = builder
///     .import(source, None, &Dataset::default())
///     .expect("Failed to import");
///
/// assert_eq!(outcome.change_set().points().len(), 3);
/// assert_eq!(outcome.change_set().polygons().len(), 1);
/// ```
pub struct ImportBuilder {
    config: AppConfig,
    projection: Box<dyn Projection + Send + Sync>,
}

impl ImportBuilder {
    /// Create a new import builder with the given configuration.
    ///
    /// The projection is taken from the configuration; use
    /// [`ImportBuilder::with_projection`] to supply another one.
    pub fn new(config: AppConfig) -> Self {
        let projection = config.projection().kind().build();
        Self { config, projection }
    }

    /// Replace the projection used for emitted points.
    pub fn with_projection(mut self, projection: impl Projection + Send + Sync + 'static) -> Self {
        self.projection = Box::new(projection);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a document into raw outlines.
    ///
    /// # Errors
    ///
    /// Returns `FootprintError::Parse` if the document is not well-formed,
    /// is not SVG, or has no usable `viewBox`.
    pub fn parse(&self, source: &str) -> Result<ParsedDocument, FootprintError> {
        let document = footprint_parser::parse_document(source, &self.config.document().parse_options())
            .map_err(|err| FootprintError::new_parse_error(err, source))?;

        debug!(polygons = document.polygons().len(); "Document parsed successfully");
        Ok(document)
    }

    /// Parse a document and conflate its outlines with `dataset`.
    ///
    /// `window` is the area the caller asked for. It is recorded in the
    /// report and not otherwise used.
    ///
    /// # Errors
    ///
    /// Returns `FootprintError::Config` for an unusable configuration and
    /// `FootprintError::Parse` for a document that cannot be read at all.
    /// Malformed paths do not fail the import; see
    /// [`ImportOutcome::skipped`].
    pub fn import<D>(
        &self,
        source: &str,
        window: Option<BoundingBox>,
        dataset: &D,
    ) -> Result<ImportOutcome, FootprintError>
    where
        D: ExistingDataset + ?Sized,
    {
        self.config.validate()?;
        let document = self.parse(source)?;
        Ok(self.conflate(&document, window, dataset))
    }

    /// Conflate the outlines of an already parsed document with `dataset`.
    pub fn conflate<D>(
        &self,
        document: &ParsedDocument,
        window: Option<BoundingBox>,
        dataset: &D,
    ) -> ImportOutcome
    where
        D: ExistingDataset + ?Sized,
    {
        info!(window:? = window; "Importing outlines");

        let view_box = document.view_box();
        let corrected: Vec<RawPolygon> = document
            .polygons()
            .iter()
            .map(|polygon| axis::correct_axis(polygon, view_box))
            .collect();
        trace!(corrected:?; "Outlines in map orientation");

        let proximity = self.config.conflation().proximity();
        let batch = dedup::deduplicate(&corrected, &proximity);
        let conflation = conflate::conflate(&batch, dataset, &proximity);

        let change_set = changeset::emit(
            &batch,
            &conflation,
            self.projection.as_ref(),
            self.config.change_set().label(),
        );

        let report = ImportReport::new(window, document, &batch, &conflation, &change_set);
        info!(report:%; "Import completed");

        ImportOutcome {
            change_set,
            report,
            skipped: document.skipped().to_vec(),
        }
    }
}

impl Default for ImportBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl fmt::Debug for ImportBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
