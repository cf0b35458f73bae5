//! Command-line argument definitions for the Footprint CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the dataset to
//! conflate with, configuration file selection, and logging verbosity.

use clap::Parser;

use footprint::geometry::{BoundingBox, PlanarPoint};

/// Command-line arguments for the Footprint import tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input SVG document
    #[arg(help = "Path to the input SVG document")]
    pub input: String,

    /// Path to the existing dataset (JSON)
    #[arg(short, long)]
    pub dataset: Option<String>,

    /// Path to the output change set (JSON)
    #[arg(short, long, default_value = "changeset.json")]
    pub output: String,

    /// Requested area as `min-x,min-y,max-x,max-y`
    #[arg(short, long, value_parser = parse_window)]
    pub window: Option<BoundingBox>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Parse a `min-x,min-y,max-x,max-y` window
pub fn parse_window(value: &str) -> Result<BoundingBox, String> {
    let numbers = value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|err| format!("`{}` is not a number: {err}", part.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let [min_x, min_y, max_x, max_y] = numbers[..] else {
        return Err(format!("expected four numbers, got {}", numbers.len()));
    };

    BoundingBox::new(PlanarPoint::new(min_x, min_y), PlanarPoint::new(max_x, max_y))
        .ok_or_else(|| "window corners must be finite with min <= max".to_string())
}
