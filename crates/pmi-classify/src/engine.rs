//! The three classification passes and the completeness validator.

use std::collections::{BTreeMap, BTreeSet};

use pmi_model::{
    ClassifyError, ColumnEntry, Frame, Observation, Schema, Window, info_label_name,
};

/// Metric name of the composite info observation.
pub const INFO_METRIC: &str = "printer_info";

/// Result of running the passes over one frame.
#[derive(Debug, Clone)]
pub struct Classification {
    /// Observations in emission order: info first, then grouped rules in
    /// declaration order (entries in frame order), then plain rules.
    pub observations: Vec<Observation>,
    /// Column indexes consumed by any rule.
    pub consumed: BTreeSet<usize>,
}

/// Run the info, grouped, and plain passes over `frame`.
///
/// The first error aborts the whole classification; no partial observation
/// list is returned. Consumption is tracked in a single index set across all
/// passes, so a column claimed twice fails with
/// [`ClassifyError::DuplicateConsumption`] no matter which pass claims it
/// second.
pub fn classify(frame: &Frame, schema: &Schema) -> Result<Classification, ClassifyError> {
    let mut result = Classification {
        observations: Vec::new(),
        consumed: BTreeSet::new(),
    };
    info_pass(frame, schema, &mut result)?;
    grouped_pass(frame, schema, &mut result)?;
    plain_pass(frame, schema, &mut result)?;
    Ok(result)
}

/// Require every entry to be consumed or ignore-listed.
///
/// This is the firmware-drift detector: an unexpected new counter fails the
/// probe instead of being silently dropped.
pub fn validate_completeness(
    frame: &Frame,
    schema: &Schema,
    consumed: &BTreeSet<usize>,
) -> Result<(), ClassifyError> {
    for entry in frame.entries() {
        if consumed.contains(&entry.index) || schema.ignore_names.contains(&entry.name) {
            continue;
        }
        return Err(ClassifyError::UnaccountedColumn {
            column: entry.name.clone(),
            value: entry.raw_value.clone(),
        });
    }
    Ok(())
}

fn consume(consumed: &mut BTreeSet<usize>, entry: &ColumnEntry) -> Result<(), ClassifyError> {
    if !consumed.insert(entry.index) {
        return Err(ClassifyError::DuplicateConsumption {
            column: entry.name.clone(),
            index: entry.index,
        });
    }
    Ok(())
}

fn info_pass(
    frame: &Frame,
    schema: &Schema,
    result: &mut Classification,
) -> Result<(), ClassifyError> {
    let mut labels = BTreeMap::new();
    for column in &schema.info_columns {
        let entry = frame
            .find_unique(column, Window::default())?
            .ok_or_else(|| ClassifyError::MissingColumn {
                name: column.clone(),
            })?;
        consume(&mut result.consumed, entry)?;
        // Empty values are omitted from the label set, not an error.
        if entry.raw_value.is_empty() {
            continue;
        }
        labels.insert(info_label_name(column), entry.raw_value.clone());
    }
    result
        .observations
        .push(Observation::new(INFO_METRIC, labels, 1.0));
    Ok(())
}

fn grouped_pass(
    frame: &Frame,
    schema: &Schema,
    result: &mut Classification,
) -> Result<(), ClassifyError> {
    for rule in &schema.group_rules {
        for entry in frame.entries() {
            if !rule.window.contains(entry.index) {
                continue;
            }
            let Some(captures) = rule.pattern.captures(&entry.name) else {
                continue;
            };
            // The single declared group may still not participate in the
            // match (an optional group); that is a rule defect, not a skip.
            let capture = captures.get(1).ok_or_else(|| ClassifyError::PatternMismatch {
                pattern: rule.pattern.as_str().to_string(),
                column: entry.name.clone(),
            })?;
            consume(&mut result.consumed, entry)?;
            let value = rule.transform.apply(&entry.name, &entry.raw_value)?;
            result.observations.push(Observation::with_label(
                rule.metric.clone(),
                rule.label.clone(),
                capture.as_str(),
                value,
            ));
        }
    }
    Ok(())
}

fn plain_pass(
    frame: &Frame,
    schema: &Schema,
    result: &mut Classification,
) -> Result<(), ClassifyError> {
    for rule in &schema.plain_rules {
        let entry = frame
            .find_unique(&rule.column, rule.window)?
            .ok_or_else(|| ClassifyError::MissingColumn {
                name: rule.column.clone(),
            })?;
        consume(&mut result.consumed, entry)?;
        let value = rule.transform.apply(&entry.name, &entry.raw_value)?;
        result
            .observations
            .push(Observation::new(rule.metric.clone(), rule.labels.clone(), value));
    }
    Ok(())
}
