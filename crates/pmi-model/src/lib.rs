//! Data model for printer maintenance snapshots.
//!
//! A maintenance snapshot is a two-row CSV (column names + values) reported
//! by a printer. This crate defines the types the rest of the workspace is
//! built on:
//!
//! - [`Frame`]: the indexed column entries of one snapshot
//! - [`Schema`]: the declarative per-model ruleset that classifies columns
//! - [`Observation`]: one labeled numeric metric sample
//! - the classification and schema-validation error taxonomies

pub mod error;
pub mod frame;
pub mod labels;
pub mod observation;
pub mod schema;
pub mod transform;

pub use error::{ClassifyError, SchemaError};
pub use frame::{ColumnEntry, Frame};
pub use labels::{info_label_name, is_valid_label_name, is_valid_metric_name};
pub use observation::Observation;
pub use schema::{
    GroupRule, GroupRuleSpec, PlainRule, PlainRuleSpec, Schema, SchemaSpec, Window,
};
pub use transform::ValueTransform;
