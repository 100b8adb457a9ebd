//! Error taxonomies for schema construction and snapshot classification.

use thiserror::Error;

/// Errors raised while compiling a schema into its validated form.
///
/// All of these surface at startup or schema-file load time. A registry that
/// was built successfully can never produce one of these during
/// classification.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema {model:?}: invalid pattern {pattern:?}: {source}")]
    BadPattern {
        model: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("schema {model:?}: pattern {pattern:?} declares {groups} capture groups, expected exactly 1")]
    CaptureCount {
        model: String,
        pattern: String,
        groups: usize,
    },

    #[error(
        "schema {model:?}: info columns {first:?} and {second:?} both normalize to label {label:?}"
    )]
    DuplicateInfoLabel {
        model: String,
        label: String,
        first: String,
        second: String,
    },

    #[error("schema {model:?}: {label:?} is not a valid label name")]
    InvalidLabelName { model: String, label: String },

    #[error("schema {model:?}: {metric:?} is not a valid metric name")]
    InvalidMetricName { model: String, metric: String },

    #[error("schema {model:?}: window [{min}, {max}] matches no index")]
    EmptyWindow { model: String, min: usize, max: usize },

    #[error("duplicate schema for model {model:?}")]
    DuplicateModel { model: String },
}

/// Errors raised while classifying one snapshot.
///
/// Every variant is terminal for the invocation: no partial observation list
/// is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The snapshot did not contain exactly a header row and a value row.
    #[error("expected 2 csv rows, got {rows}")]
    RowCount { rows: usize },

    /// Header and value rows disagree on column count.
    #[error("header row has {names} columns, value row has {values}")]
    ColumnCountMismatch { names: usize, values: usize },

    /// A lookup by name matched more than one column and no window
    /// disambiguated it.
    #[error("column name {name:?} is ambiguous (indexes {first} and {second})")]
    AmbiguousColumnName {
        name: String,
        first: usize,
        second: usize,
    },

    /// The reported model string has no schema in the registry.
    #[error("unknown model name: {model:?}")]
    UnknownModel { model: String },

    /// A required column was absent from the frame.
    #[error("missing column {name:?}")]
    MissingColumn { name: String },

    /// A grouped rule matched without exactly one participating capture.
    #[error("pattern {pattern:?} matched column {column:?} without a capture")]
    PatternMismatch { pattern: String, column: String },

    /// A raw value could not be parsed as a number.
    #[error("column {column:?}: cannot parse {value:?} as a number")]
    ValueFormat { column: String, value: String },

    /// A column index was claimed by more than one rule.
    #[error("column {column:?} (index {index}) consumed by more than one rule")]
    DuplicateConsumption { column: String, index: usize },

    /// A column was neither consumed by any rule nor ignore-listed.
    #[error("column {column:?} with value {value:?} not covered by any rule")]
    UnaccountedColumn { column: String, value: String },
}
