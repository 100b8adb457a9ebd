//! Classification output: one labeled numeric sample.

use std::collections::BTreeMap;

/// One metric sample produced by classification.
///
/// Labels live in a `BTreeMap`, which makes label names unique and gives a
/// canonical order for rendering and comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub metric: String,
    pub labels: BTreeMap<String, String>,
    pub value: f64,
}

impl Observation {
    pub fn new(metric: impl Into<String>, labels: BTreeMap<String, String>, value: f64) -> Self {
        Self {
            metric: metric.into(),
            labels,
            value,
        }
    }

    /// Convenience for the common single-label case.
    pub fn with_label(
        metric: impl Into<String>,
        name: impl Into<String>,
        label_value: impl Into<String>,
        value: f64,
    ) -> Self {
        let mut labels = BTreeMap::new();
        labels.insert(name.into(), label_value.into());
        Self::new(metric, labels, value)
    }
}
