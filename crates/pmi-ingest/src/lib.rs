//! Maintenance snapshot ingestion.
//!
//! Printers report maintenance counters as a two-row CSV: a header row of
//! column names followed by a single value row. This crate reads that
//! snapshot from any reader and builds the indexed [`pmi_model::Frame`] the
//! classification engine consumes.

pub mod snapshot;

pub use snapshot::{IngestError, read_snapshot, read_snapshot_file};
