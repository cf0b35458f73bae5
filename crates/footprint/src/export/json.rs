//! JSON change set export.

use std::io::Write;

use log::debug;

use super::{Error, Exporter};
use crate::changeset::ChangeSet;

/// Writes change sets as pretty-printed JSON.
///
/// # Examples
///
/// ```
/// # use footprint::{changeset::ChangeSet, export::{Exporter, json::JsonExporter}};
/// let mut exporter = JsonExporter::new(Vec::new());
/// exporter.export_change_set(&ChangeSet::default()).unwrap();
///
/// let json = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(json.contains("\"polygons\": []"));
/// ```
#[derive(Debug)]
pub struct JsonExporter<W> {
    writer: W,
}

impl<W: Write> JsonExporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the exporter, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for JsonExporter<W> {
    fn export_change_set(&mut self, change_set: &ChangeSet) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut self.writer, change_set).map_err(|err| {
            if err.is_io() {
                Error::Io(err.into())
            } else {
                Error::Encode(err.to_string())
            }
        })?;
        writeln!(self.writer).map_err(Error::Io)?;
        self.writer.flush().map_err(Error::Io)?;

        debug!(
            points = change_set.points().len(),
            polygons = change_set.polygons().len();
            "Change set written as JSON"
        );
        Ok(())
    }
}
