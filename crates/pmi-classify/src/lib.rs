//! Column-to-metric classification for printer maintenance snapshots.
//!
//! The engine applies a per-model [`pmi_model::Schema`] to a snapshot
//! [`pmi_model::Frame`] in three fixed passes (info, grouped, plain),
//! tracking which column indexes each rule consumed. The completeness
//! validator then requires every column to be consumed exactly once or
//! explicitly ignore-listed, so a firmware revision that grows a new counter
//! fails loudly instead of silently dropping data.

pub mod builtin;
pub mod dispatch;
pub mod engine;
pub mod registry;

pub use dispatch::{MODEL_COLUMN, ProbeError, classify_frame, probe_reader};
pub use engine::{Classification, INFO_METRIC, classify, validate_completeness};
pub use registry::{RegistryError, SchemaRegistry};
