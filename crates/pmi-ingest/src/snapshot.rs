//! Two-row CSV snapshot reading.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use thiserror::Error;
use tracing::debug;

use pmi_model::{ClassifyError, Frame};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

/// Read a maintenance snapshot into a [`Frame`].
///
/// The input must hold exactly two rows: column names, then values. Header
/// names are trimmed (including a UTF-8 BOM on the first cell); values are
/// kept verbatim.
pub fn read_snapshot<R: Read>(reader: R) -> Result<Frame, IngestError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    if rows.len() != 2 {
        return Err(ClassifyError::RowCount { rows: rows.len() }.into());
    }
    let values = rows.pop().unwrap_or_default();
    let mut names = rows.pop().unwrap_or_default();
    for name in &mut names {
        *name = normalize_header(name);
    }

    let frame = Frame::from_rows(&names, &values)?;
    debug!(columns = frame.len(), "snapshot read");
    Ok(frame)
}

/// Read a snapshot from a CSV file on disk.
pub fn read_snapshot_file(path: &Path) -> Result<Frame, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_snapshot(file)
}

fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}').trim().to_string()
}
