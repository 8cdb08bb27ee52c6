// IRLogView - core/filter.rs
//
// Composable filter engine for classified records.
// All active filters are AND-combined.
// Core layer: pure logic, no I/O.

use crate::core::model::{LogRecord, RecordKind};
use crate::util::error::FilterError;
use regex::Regex;
use std::collections::HashSet;

/// Complete filter state. All fields are AND-combined when applied.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Record kinds to include (empty = all).
    pub kinds: HashSet<RecordKind>,

    /// Only records for which `LogRecord::is_alert` holds.
    pub alerts_only: bool,

    /// Substring text search (case-insensitive). Empty = no filter.
    pub text_search: String,

    /// Compiled regex search. None = no regex filter.
    pub regex_search: Option<Regex>,
}

impl RecordFilter {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
            && !self.alerts_only
            && self.text_search.is_empty()
            && self.regex_search.is_none()
    }

    /// Set the regex search pattern, compiling it.
    /// Returns an error if the pattern is invalid.
    pub fn set_regex(&mut self, pattern: &str) -> Result<(), FilterError> {
        if pattern.is_empty() {
            self.regex_search = None;
            return Ok(());
        }
        let regex = Regex::new(pattern).map_err(|e| FilterError::InvalidRegex {
            pattern: pattern.to_string(),
            source: e,
        })?;
        self.regex_search = Some(regex);
        Ok(())
    }

    /// Quick filter: warnings, criticals, error entries and read failures.
    pub fn alerts() -> Self {
        Self {
            alerts_only: true,
            ..Default::default()
        }
    }

    /// Quick filter: one record kind.
    pub fn only(kind: RecordKind) -> Self {
        Self {
            kinds: HashSet::from([kind]),
            ..Default::default()
        }
    }
}

/// Apply filters to a slice of records, returning indices of matching records.
pub fn apply_filters(records: &[LogRecord], filter: &RecordFilter) -> Vec<usize> {
    if filter.is_empty() {
        return (0..records.len()).collect();
    }

    let text_lower = filter.text_search.to_lowercase();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_all(record, filter, &text_lower))
        .map(|(idx, _)| idx)
        .collect()
}

/// Check if a single record matches all active filters.
fn matches_all(record: &LogRecord, filter: &RecordFilter, text_lower: &str) -> bool {
    if !filter.kinds.is_empty() && !filter.kinds.contains(&record.kind()) {
        return false;
    }

    if filter.alerts_only && !record.is_alert() {
        return false;
    }

    if !text_lower.is_empty() && !record.content().to_lowercase().contains(text_lower) {
        return false;
    }

    if let Some(ref regex) = filter.regex_search {
        if !regex.is_match(record.content()) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::classify;

    fn records() -> Vec<LogRecord> {
        [
            "=== Process Investigation ===",
            "[INFO] 2025-08-06 12:25:28: Listing processes",
            "[ERROR] 2025-08-06 12:25:29: ps exited with code 1",
            "Command: ps aux",
            "WARNING: hidden process pid 4242",
            "No suspicious processes found",
        ]
        .iter()
        .map(|l| classify(l))
        .collect()
    }

    #[test]
    fn test_empty_filter_returns_all() {
        let result = apply_filters(&records(), &RecordFilter::default());
        assert_eq!(result, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_kind_filter() {
        let result = apply_filters(&records(), &RecordFilter::only(RecordKind::Log));
        assert_eq!(result, vec![1, 2]);
    }

    #[test]
    fn test_alerts_filter() {
        let result = apply_filters(&records(), &RecordFilter::alerts());
        assert_eq!(result, vec![2, 4]);
    }

    #[test]
    fn test_text_search_case_insensitive() {
        let filter = RecordFilter {
            text_search: "PROCESS".to_string(),
            ..Default::default()
        };
        let result = apply_filters(&records(), &filter);
        assert_eq!(result, vec![0, 1, 4, 5]);
    }

    #[test]
    fn test_regex_filter() {
        let mut filter = RecordFilter::default();
        filter.set_regex(r"pid \d+").unwrap();
        assert_eq!(apply_filters(&records(), &filter), vec![4]);
    }

    #[test]
    fn test_combined_filters() {
        let filter = RecordFilter {
            kinds: HashSet::from([RecordKind::Log, RecordKind::Command]),
            text_search: "ps".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&records(), &filter), vec![2, 3]);
    }

    #[test]
    fn test_invalid_regex() {
        let mut filter = RecordFilter::default();
        assert!(filter.set_regex("[invalid").is_err());
        assert!(filter.set_regex("").is_ok());
        assert!(filter.regex_search.is_none());
    }
}
