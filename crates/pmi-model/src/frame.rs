//! Indexed column entries built from one snapshot.

use crate::error::ClassifyError;
use crate::schema::Window;

/// One column of a snapshot: its original row position, name, and raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnEntry {
    /// 0-based position within the original row. Unique per frame.
    pub index: usize,
    /// Column name from the header row. Not necessarily unique.
    pub name: String,
    /// Unparsed value from the value row.
    pub raw_value: String,
}

/// Ordered column entries of one maintenance snapshot.
///
/// Built from a header row and a value row of equal length. Blank-named
/// columns are dropped before entries are built, so index gaps are expected;
/// the surviving indexes are the original row positions.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    entries: Vec<ColumnEntry>,
}

impl Frame {
    /// Build a frame from a header row and a value row.
    ///
    /// Fails with [`ClassifyError::ColumnCountMismatch`] when the rows have
    /// different lengths.
    pub fn from_rows(names: &[String], values: &[String]) -> Result<Self, ClassifyError> {
        if names.len() != values.len() {
            return Err(ClassifyError::ColumnCountMismatch {
                names: names.len(),
                values: values.len(),
            });
        }
        let entries = names
            .iter()
            .zip(values)
            .enumerate()
            .filter(|(_, (name, _))| !name.is_empty())
            .map(|(index, (name, value))| ColumnEntry {
                index,
                name: name.clone(),
                raw_value: value.clone(),
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ColumnEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the single entry with the given exact name whose index lies in
    /// `window`.
    ///
    /// Returns `Ok(None)` when no entry matches; the caller decides whether
    /// absence is an error. Two or more matches fail with
    /// [`ClassifyError::AmbiguousColumnName`].
    pub fn find_unique(
        &self,
        name: &str,
        window: Window,
    ) -> Result<Option<&ColumnEntry>, ClassifyError> {
        let mut found: Option<&ColumnEntry> = None;
        for entry in &self.entries {
            if entry.name != name || !window.contains(entry.index) {
                continue;
            }
            if let Some(first) = found {
                return Err(ClassifyError::AmbiguousColumnName {
                    name: name.to_string(),
                    first: first.index,
                    second: entry.index,
                });
            }
            found = Some(entry);
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(pairs: &[(&str, &str)]) -> (Vec<String>, Vec<String>) {
        let names = pairs.iter().map(|(n, _)| (*n).to_string()).collect();
        let values = pairs.iter().map(|(_, v)| (*v).to_string()).collect();
        (names, values)
    }

    #[test]
    fn blank_names_are_dropped_but_indexes_kept() {
        let (names, values) = rows(&[("A", "1"), ("", "x"), ("B", "2")]);
        let frame = Frame::from_rows(&names, &values).expect("frame");
        let indexes: Vec<usize> = frame.entries().iter().map(|e| e.index).collect();
        assert_eq!(indexes, vec![0, 2]);
        assert_eq!(frame.entries()[1].name, "B");
        assert_eq!(frame.entries()[1].raw_value, "2");
    }

    #[test]
    fn unequal_rows_are_rejected() {
        let names = vec!["A".to_string(), "B".to_string()];
        let values = vec!["1".to_string()];
        let err = Frame::from_rows(&names, &values).unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::ColumnCountMismatch { names: 2, values: 1 }
        ));
    }

    #[test]
    fn find_unique_reports_ambiguity() {
        let (names, values) = rows(&[("Total", "1"), ("Total", "2")]);
        let frame = Frame::from_rows(&names, &values).expect("frame");
        let err = frame.find_unique("Total", Window::default()).unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::AmbiguousColumnName { first: 0, second: 1, .. }
        ));
    }

    #[test]
    fn find_unique_respects_windows() {
        let (names, values) = rows(&[("Total", "1"), ("Total", "2")]);
        let frame = Frame::from_rows(&names, &values).expect("frame");
        let entry = frame
            .find_unique("Total", Window::up_to(0))
            .expect("unique")
            .expect("present");
        assert_eq!(entry.raw_value, "1");
        let entry = frame
            .find_unique("Total", Window::starting_at(1))
            .expect("unique")
            .expect("present");
        assert_eq!(entry.raw_value, "2");
        assert!(
            frame
                .find_unique("Missing", Window::default())
                .expect("unique")
                .is_none()
        );
    }
}
