//! Report store contract and the in-memory journal.

use crate::report::LocationReport;
use thiserror::Error;

/// Errors a report store can surface.
///
/// A failed query must never be conflated with an empty result: an empty
/// `Vec` means "no recent activity", an `Err` means the store itself failed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage engine failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored record could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// The narrow contract a storage engine must satisfy to hold the journal.
///
/// Append one immutable record; list records strictly newer than a cutoff.
/// Retention and pruning are the implementation's concern - the density
/// engine only ever looks at a trailing window.
pub trait ReportStore {
    /// Append a report. One durable write; failure aborts the caller's
    /// update.
    fn insert(&self, report: LocationReport) -> crate::Result<()>;

    /// Every report with `timestamp > cutoff_ms`, in no particular order.
    fn reports_newer_than(&self, cutoff_ms: u64) -> crate::Result<Vec<LocationReport>>;
}

impl<S: ReportStore + ?Sized> ReportStore for std::sync::Arc<S> {
    fn insert(&self, report: LocationReport) -> crate::Result<()> {
        (**self).insert(report)
    }

    fn reports_newer_than(&self, cutoff_ms: u64) -> crate::Result<Vec<LocationReport>> {
        (**self).reports_newer_than(cutoff_ms)
    }
}

/// In-memory journal backed by an append-only `Vec`.
///
/// Interior mutability keeps the trait object shareable behind an `Arc`
/// without a write lock on the hot read path being held across queries.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    reports: std::sync::RwLock<Vec<LocationReport>>,
}

impl MemoryJournal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records ever appended.
    pub fn len(&self) -> usize {
        self.reports.read().expect("journal lock poisoned").len()
    }

    /// True if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReportStore for MemoryJournal {
    fn insert(&self, report: LocationReport) -> crate::Result<()> {
        self.reports
            .write()
            .map_err(|e| StoreError::Storage(e.to_string()))?
            .push(report);
        Ok(())
    }

    fn reports_newer_than(&self, cutoff_ms: u64) -> crate::Result<Vec<LocationReport>> {
        let reports = self
            .reports
            .read()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(reports
            .iter()
            .filter(|r| r.is_newer_than(cutoff_ms))
            .cloned()
            .collect())
    }
}
