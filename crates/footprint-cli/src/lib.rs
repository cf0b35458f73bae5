//! CLI logic for the Footprint import tool.
//!
//! This module contains the core CLI logic: it reads a document and an
//! optional dataset, runs the import, and writes the change set.

pub mod error_adapter;

mod args;
mod config;
mod dataset;

pub use args::{Args, parse_window};

use std::{
    fs::{self, File},
    io::BufWriter,
};

use log::{info, warn};

use footprint::{
    FootprintError, ImportBuilder, ImportReport,
    export::{Exporter, json::JsonExporter},
};

use error_adapter::skipped_reports;

/// Run the Footprint CLI application
///
/// This function imports the input document against the dataset and writes
/// the resulting change set to the output file. Paths that could not be
/// read are reported as warnings.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `FootprintError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Dataset loading errors
/// - Document errors
/// - Export errors
pub fn run(args: &Args) -> Result<ImportReport, FootprintError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Importing document"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read inputs
    let source = fs::read_to_string(&args.input)?;
    let dataset = dataset::load_dataset(args.dataset.as_ref())?;

    // Import using the ImportBuilder API
    let builder = ImportBuilder::new(app_config);
    let outcome = builder.import(&source, args.window, &dataset)?;

    report_skipped(&outcome, &source);

    // Write output file
    let file = File::create(&args.output)?;
    let mut exporter = JsonExporter::new(BufWriter::new(file));
    exporter.export_change_set(outcome.change_set())?;

    info!(output_file = args.output; "Change set exported successfully");

    Ok(outcome.report().clone())
}

/// Render the diagnostics of skipped paths as warnings
fn report_skipped(outcome: &footprint::ImportOutcome, source: &str) {
    let reporter = miette::GraphicalReportHandler::new();
    for report in skipped_reports(outcome.skipped(), source) {
        let mut writer = String::new();
        match reporter.render_report(&mut writer, &report) {
            Ok(()) => warn!("{writer}"),
            Err(_) => warn!("{report}"),
        }
    }
}
