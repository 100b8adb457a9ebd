//! Value transforms applied to raw column values.

use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;

/// Pure numeric parse applied to a raw value before an observation is
/// emitted.
///
/// A closed set of named variants keeps rulesets inspectable and
/// serializable, instead of opaque per-rule callables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueTransform {
    /// Plain decimal parse. The default for every rule.
    #[default]
    Decimal,
    /// Percentage to ratio: `"96"` becomes `0.96`.
    PercentToRatio,
}

impl ValueTransform {
    /// Parse `raw` as reported under column `column`.
    ///
    /// Fails with [`ClassifyError::ValueFormat`] on unparsable input.
    pub fn apply(self, column: &str, raw: &str) -> Result<f64, ClassifyError> {
        let parsed: f64 = raw.trim().parse().map_err(|_| ClassifyError::ValueFormat {
            column: column.to_string(),
            value: raw.to_string(),
        })?;
        Ok(match self {
            Self::Decimal => parsed,
            Self::PercentToRatio => parsed / 100.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_parses_integers_and_floats() {
        assert_eq!(ValueTransform::Decimal.apply("c", "10245").expect("parse"), 10245.0);
        assert_eq!(ValueTransform::Decimal.apply("c", "2.5").expect("parse"), 2.5);
    }

    #[test]
    fn percent_to_ratio_divides_by_hundred() {
        let value = ValueTransform::PercentToRatio.apply("c", "96").expect("parse");
        assert_eq!(value, 0.96);
    }

    #[test]
    fn unparsable_value_names_the_column() {
        let err = ValueTransform::Decimal.apply("Page Counter", "n/a").unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::ValueFormat { ref column, ref value }
                if column == "Page Counter" && value == "n/a"
        ));
    }

    #[test]
    fn serde_names_are_kebab_case() {
        let t: ValueTransform = serde_json::from_str("\"percent-to-ratio\"").expect("decode");
        assert_eq!(t, ValueTransform::PercentToRatio);
    }
}
