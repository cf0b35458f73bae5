//! Loading the existing dataset from a JSON file.
//!
//! The file holds the points the import is conflated with:
//!
//! ```json
//! { "points": [ { "id": 17, "x": 981283.38, "y": 368690.15, "deleted": false } ] }
//! ```

use std::{fs, path::Path};

use log::info;
use thiserror::Error;

use footprint::{
    FootprintError,
    dataset::{Dataset, DatasetDocument},
};

/// Dataset file errors for CLI
#[derive(Debug, Error)]
pub enum DatasetFileError {
    #[error("Failed to parse dataset {path}: {message}")]
    Parse { path: String, message: String },
}

impl From<DatasetFileError> for FootprintError {
    fn from(err: DatasetFileError) -> Self {
        FootprintError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            err.to_string(),
        ))
    }
}

/// Load the dataset at `path`, or an empty dataset when none is given.
///
/// # Errors
///
/// Returns `FootprintError::Io` if the file cannot be read or is not a
/// dataset document, and `FootprintError::Dataset` if it holds duplicate
/// points.
pub fn load_dataset(path: Option<impl AsRef<Path>>) -> Result<Dataset, FootprintError> {
    let Some(path) = path else {
        info!("No dataset given, conflating against an empty dataset");
        return Ok(Dataset::default());
    };
    let path = path.as_ref();

    let content = fs::read_to_string(path)?;
    let document: DatasetDocument =
        serde_json::from_str(&content).map_err(|err| DatasetFileError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
    let dataset = Dataset::try_from(document)?;

    info!(path = path.display().to_string(), points = dataset.len(); "Dataset loaded");
    Ok(dataset)
}
