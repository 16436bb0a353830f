//! Export policy lookup
//!
//! Unknown series are not an error: new acquisition protocols show up over
//! time and must not halt conversion, so they simply export nothing.

use crate::schema::{ExportFormat, FormatSet};
use serde::Serialize;
use std::collections::BTreeMap;

static NO_EXPORT: FormatSet = FormatSet::EMPTY;

/// Series identifier -> formats, after study overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExportPolicy {
    entries: BTreeMap<String, FormatSet>,
}

impl ExportPolicy {
    pub fn new(entries: BTreeMap<String, FormatSet>) -> Self {
        Self { entries }
    }

    /// Formats required for `series`.
    ///
    /// Matching is exact and case-sensitive; a series without an entry
    /// yields the empty set.
    pub fn lookup(&self, series: &str) -> &FormatSet {
        self.entries.get(series).unwrap_or(&NO_EXPORT)
    }

    /// Whether `series` must be exported as `format`.
    pub fn exports(&self, series: &str, format: ExportFormat) -> bool {
        self.lookup(series).contains(format)
    }

    /// Whether `series` has an explicit entry, even an empty one.
    pub fn is_configured(&self, series: &str) -> bool {
        self.entries.contains_key(series)
    }

    /// Series that require `format`, in sorted order.
    pub fn series_requiring(&self, format: ExportFormat) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, formats)| formats.contains(format))
            .map(|(series, _)| series.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormatSet)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ExportPolicy {
        let mut entries = BTreeMap::new();
        entries.insert(
            "T1".to_string(),
            [ExportFormat::Nii, ExportFormat::Dcm, ExportFormat::Mnc]
                .into_iter()
                .collect(),
        );
        entries.insert("Software".to_string(), FormatSet::new());
        ExportPolicy::new(entries)
    }

    #[test]
    fn unknown_series_exports_nothing() {
        let policy = policy();
        assert!(policy.lookup("UNKNOWN-SEQ").is_empty());
        assert!(!policy.is_configured("UNKNOWN-SEQ"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let policy = policy();
        assert_eq!(policy.lookup("T1").len(), 3);
        assert!(policy.lookup("t1").is_empty());
    }

    #[test]
    fn configured_empty_entry_is_distinguishable() {
        let policy = policy();
        assert!(policy.lookup("Software").is_empty());
        assert!(policy.is_configured("Software"));
    }

    #[test]
    fn series_requiring_format() {
        let policy = policy();
        assert_eq!(policy.series_requiring(ExportFormat::Mnc), vec!["T1"]);
        assert!(policy.series_requiring(ExportFormat::Nrrd).is_empty());
        assert!(policy.exports("T1", ExportFormat::Dcm));
    }
}
