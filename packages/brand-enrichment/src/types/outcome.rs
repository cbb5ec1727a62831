//! Per-row and per-batch results.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::answer::ParsedFields;
use super::evidence::EvidenceResult;
use super::log::BatchLog;
use super::reference::BrandEntry;
use super::table::InputRow;

/// How an inferred brand/manufacturer pair compares to the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReconciliationStatus {
    /// Reference manufacturer equals the inferred one.
    Consistent,
    /// Brand is known but the manufacturer differs.
    Inconsistent,
    /// Brand is not in the reference table.
    NoReferenceEntry,
    /// The model gave no usable brand.
    NoBrandInferred,
}

impl ReconciliationStatus {
    /// Label written to the output table.
    pub fn label(&self) -> &'static str {
        match self {
            ReconciliationStatus::Consistent => "一致",
            ReconciliationStatus::Inconsistent => "不一致",
            ReconciliationStatus::NoReferenceEntry => "マスタ未登録",
            ReconciliationStatus::NoBrandInferred => "ブランド推定なし",
        }
    }
}

impl fmt::Display for ReconciliationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the pipeline produced for one row.
///
/// For a failed row the parsed fields are blank and `status` is `None`;
/// the query and evidence are kept for diagnosis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowResult {
    pub query: String,
    pub fields: ParsedFields,
    pub evidence: EvidenceResult,
    pub status: Option<ReconciliationStatus>,
    /// Reference entry for the inferred brand, when there is one.
    pub reference: Option<BrandEntry>,
}

/// An input row together with its result.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    pub row: InputRow,
    pub result: RowResult,
    /// Reason the row failed, if it did.
    pub failure: Option<String>,
}

impl RowRecord {
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// Fraction of rows finished so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f32 / self.total as f32
        }
    }
}

/// Output of one batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Headers of the input table, in source order.
    pub headers: Vec<String>,
    /// One record per input row, in source order.
    pub records: Vec<RowRecord>,
    /// Unmodified input rows that failed.
    pub errors: Vec<InputRow>,
    pub log: BatchLog,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.records.iter().filter(|r| !r.is_failed()).count()
    }

    pub fn failed(&self) -> usize {
        self.errors.len()
    }

    /// Row count per reconciliation status.
    pub fn status_count(&self, status: ReconciliationStatus) -> usize {
        self.records
            .iter()
            .filter(|r| r.result.status == Some(status))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_fraction() {
        assert_eq!(Progress { completed: 1, total: 4 }.fraction(), 0.25);
        assert_eq!(Progress { completed: 0, total: 0 }.fraction(), 1.0);
    }

    #[test]
    fn test_counts_without_records() {
        let outcome = BatchOutcome {
            errors: vec![InputRow::new()],
            ..Default::default()
        };
        assert_eq!(outcome.succeeded(), 0);
        assert_eq!(outcome.failed(), 1);
    }

    #[test]
    fn test_succeeded_counts_unfailed_records() {
        let record = |failure: Option<&str>| RowRecord {
            row: InputRow::new(),
            result: RowResult::default(),
            failure: failure.map(str::to_string),
        };
        let outcome = BatchOutcome {
            records: vec![record(None), record(Some("inference failed")), record(None)],
            errors: vec![InputRow::new()],
            ..Default::default()
        };
        assert_eq!(outcome.succeeded(), 2);
    }

    #[test]
    fn test_status_labels_are_distinct() {
        let labels = [
            ReconciliationStatus::Consistent,
            ReconciliationStatus::Inconsistent,
            ReconciliationStatus::NoReferenceEntry,
            ReconciliationStatus::NoBrandInferred,
        ]
        .map(|s| s.to_string());
        let unique: std::collections::HashSet<_> = labels.iter().collect();
        assert_eq!(unique.len(), 4);
    }
}
