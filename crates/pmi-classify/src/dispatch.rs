//! Top-level snapshot dispatch: read, look up the model, classify,
//! validate.

use std::io::Read;

use thiserror::Error;
use tracing::debug;

use pmi_ingest::{IngestError, read_snapshot};
use pmi_model::{ClassifyError, Frame, Observation, Window};

use crate::engine::{classify, validate_completeness};
use crate::registry::SchemaRegistry;

/// Well-known column carrying the device model string.
pub const MODEL_COLUMN: &str = "Model Name";

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

/// Read a two-row CSV snapshot and classify it against the registry.
pub fn probe_reader<R: Read>(
    reader: R,
    registry: &SchemaRegistry,
) -> Result<Vec<Observation>, ProbeError> {
    let frame = read_snapshot(reader)?;
    let observations = classify_frame(&frame, registry)?;
    Ok(observations)
}

/// Classify an already-built frame: model lookup, the three passes, then the
/// completeness check.
pub fn classify_frame(
    frame: &Frame,
    registry: &SchemaRegistry,
) -> Result<Vec<Observation>, ClassifyError> {
    let model_entry = frame
        .find_unique(MODEL_COLUMN, Window::default())?
        .ok_or_else(|| ClassifyError::MissingColumn {
            name: MODEL_COLUMN.to_string(),
        })?;
    let schema = registry.lookup(&model_entry.raw_value)?;

    let classification = classify(frame, schema)?;
    validate_completeness(frame, schema, &classification.consumed)?;
    debug!(
        model = %schema.model,
        observations = classification.observations.len(),
        "snapshot classified"
    );
    Ok(classification.observations)
}
