//! Declarative per-model classification schemas.
//!
//! A [`SchemaSpec`] is the serializable description of a ruleset (raw
//! pattern strings, as found in a schema file). [`Schema::compile`] turns it
//! into the validated, immutable form the engine runs: patterns compiled,
//! capture-group counts checked, info label collisions rejected. Everything
//! that can be caught at construction time is, so a registry that built
//! successfully never produces a schema-shaped surprise mid-classification.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::labels::{info_label_name, is_valid_label_name, is_valid_metric_name};
use crate::transform::ValueTransform;

/// Optional inclusive column-index bounds restricting where a rule may
/// match. Used to disambiguate repeated column names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
}

impl Window {
    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn starting_at(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn up_to(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// True when `index` lies within the bounds; an unset bound is
    /// unbounded.
    pub fn contains(self, index: usize) -> bool {
        self.min.is_none_or(|min| index >= min) && self.max.is_none_or(|max| index <= max)
    }

    fn is_unbounded(self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Serializable grouped rule: one metric per matching column, the label
/// value taken from the pattern's single capture group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRuleSpec {
    /// Metric name emitted for every match.
    pub metric: String,
    /// Regex over column names; must declare exactly one capture group.
    pub pattern: String,
    /// Label name carrying the captured value.
    pub label: String,
    #[serde(default)]
    pub transform: ValueTransform,
    #[serde(default, skip_serializing_if = "window_is_unbounded")]
    pub window: Window,
}

/// Serializable plain rule: exactly one column by exact name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlainRuleSpec {
    /// Exact column name; absence from the frame is an error.
    pub column: String,
    /// Metric name emitted.
    pub metric: String,
    /// Static labels attached to the observation.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub transform: ValueTransform,
    #[serde(default, skip_serializing_if = "window_is_unbounded")]
    pub window: Window,
}

fn window_is_unbounded(window: &Window) -> bool {
    window.is_unbounded()
}

/// Serializable description of one model's ruleset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaSpec {
    /// Exact model-name string the schema applies to.
    pub model: String,
    /// Required columns aggregated into the composite info observation.
    #[serde(default)]
    pub info_columns: Vec<String>,
    #[serde(default)]
    pub group_rules: Vec<GroupRuleSpec>,
    #[serde(default)]
    pub plain_rules: Vec<PlainRuleSpec>,
    /// Column names exempt from the completeness requirement.
    #[serde(default)]
    pub ignore_names: Vec<String>,
}

/// Compiled grouped rule.
#[derive(Debug, Clone)]
pub struct GroupRule {
    pub metric: String,
    pub pattern: Regex,
    pub label: String,
    pub transform: ValueTransform,
    pub window: Window,
}

/// Compiled plain rule.
#[derive(Debug, Clone)]
pub struct PlainRule {
    pub column: String,
    pub metric: String,
    pub labels: BTreeMap<String, String>,
    pub transform: ValueTransform,
    pub window: Window,
}

/// Validated, immutable ruleset for one printer model.
///
/// Safe for unlimited concurrent readers once constructed.
#[derive(Debug, Clone)]
pub struct Schema {
    pub model: String,
    pub info_columns: Vec<String>,
    pub group_rules: Vec<GroupRule>,
    pub plain_rules: Vec<PlainRule>,
    pub ignore_names: BTreeSet<String>,
}

impl Schema {
    /// Compile and validate a spec.
    pub fn compile(spec: SchemaSpec) -> Result<Self, SchemaError> {
        let model = spec.model;

        let mut seen_labels: BTreeMap<String, String> = BTreeMap::new();
        for column in &spec.info_columns {
            let label = info_label_name(column);
            if !is_valid_label_name(&label) {
                return Err(SchemaError::InvalidLabelName {
                    model,
                    label: format!("{label} (from column {column:?})"),
                });
            }
            if let Some(first) = seen_labels.insert(label.clone(), column.clone()) {
                return Err(SchemaError::DuplicateInfoLabel {
                    model,
                    label,
                    first,
                    second: column.clone(),
                });
            }
        }

        let mut group_rules = Vec::with_capacity(spec.group_rules.len());
        for rule in spec.group_rules {
            if !is_valid_metric_name(&rule.metric) {
                return Err(SchemaError::InvalidMetricName {
                    model,
                    metric: rule.metric,
                });
            }
            if !is_valid_label_name(&rule.label) {
                return Err(SchemaError::InvalidLabelName {
                    model,
                    label: rule.label,
                });
            }
            check_window(&model, rule.window)?;
            let pattern = Regex::new(&rule.pattern).map_err(|source| SchemaError::BadPattern {
                model: model.clone(),
                pattern: rule.pattern.clone(),
                source,
            })?;
            // captures_len counts the implicit whole-match group.
            let groups = pattern.captures_len() - 1;
            if groups != 1 {
                return Err(SchemaError::CaptureCount {
                    model,
                    pattern: rule.pattern,
                    groups,
                });
            }
            group_rules.push(GroupRule {
                metric: rule.metric,
                pattern,
                label: rule.label,
                transform: rule.transform,
                window: rule.window,
            });
        }

        let mut plain_rules = Vec::with_capacity(spec.plain_rules.len());
        for rule in spec.plain_rules {
            if !is_valid_metric_name(&rule.metric) {
                return Err(SchemaError::InvalidMetricName {
                    model,
                    metric: rule.metric,
                });
            }
            for label in rule.labels.keys() {
                if !is_valid_label_name(label) {
                    return Err(SchemaError::InvalidLabelName {
                        model,
                        label: label.clone(),
                    });
                }
            }
            check_window(&model, rule.window)?;
            plain_rules.push(PlainRule {
                column: rule.column,
                metric: rule.metric,
                labels: rule.labels,
                transform: rule.transform,
                window: rule.window,
            });
        }

        Ok(Self {
            model,
            info_columns: spec.info_columns,
            group_rules,
            plain_rules,
            ignore_names: spec.ignore_names.into_iter().collect(),
        })
    }
}

fn check_window(model: &str, window: Window) -> Result<(), SchemaError> {
    if let (Some(min), Some(max)) = (window.min, window.max)
        && min > max
    {
        return Err(SchemaError::EmptyWindow {
            model: model.to_string(),
            min,
            max,
        });
    }
    Ok(())
}
