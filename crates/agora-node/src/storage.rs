//! Persistent report storage using RocksDB.
//!
//! Keys order records by ingestion timestamp so the active-set query is a
//! single forward range scan:
//!
//! ```text
//! report:{timestamp_ms:013}:{seq:06} -> JSON-encoded LocationReport
//! ```
//!
//! `seq` disambiguates reports ingested in the same millisecond within one
//! process lifetime.

use crate::error::Result;
use agora_journal::{LocationReport, ReportStore, StoreError};
use rocksdb::{Direction, IteratorMode, Options, DB};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

const REPORT_PREFIX: &[u8] = b"report:";

/// Storage backend for the location journal.
pub struct Storage {
    db: DB,
    seq: AtomicU64,
}

impl Storage {
    /// Open or create storage at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)?;
        Ok(Self {
            db,
            seq: AtomicU64::new(0),
        })
    }

    fn report_key(&self, timestamp_ms: u64) -> String {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        format!("report:{timestamp_ms:013}:{:06}", seq % 1_000_000)
    }

    /// First key at or after `timestamp_ms` (any sequence number).
    fn scan_start(timestamp_ms: u64) -> String {
        format!("report:{timestamp_ms:013}:")
    }

    /// Store one report.
    pub fn put_report(&self, report: &LocationReport) -> Result<()> {
        let key = self.report_key(report.timestamp);
        let value = serde_json::to_vec(report)?;
        self.db.put(key.as_bytes(), value)?;
        Ok(())
    }

    /// List every report with `timestamp > cutoff_ms`, oldest first.
    pub fn list_reports_newer_than(&self, cutoff_ms: u64) -> Result<Vec<LocationReport>> {
        // Keys embed the millisecond, so starting the scan at cutoff + 1
        // makes the bound strict.
        let start = Self::scan_start(cutoff_ms.saturating_add(1));
        let mut reports = Vec::new();

        let iter = self
            .db
            .iterator(IteratorMode::From(start.as_bytes(), Direction::Forward));
        for item in iter {
            let (key, value) = item?;
            if !key.starts_with(REPORT_PREFIX) {
                break;
            }
            let report: LocationReport = serde_json::from_slice(&value)?;
            reports.push(report);
        }

        Ok(reports)
    }
}

fn to_store_error(e: crate::error::Error) -> StoreError {
    match e {
        crate::error::Error::Serialization(e) => StoreError::Corrupt(e.to_string()),
        other => StoreError::Storage(other.to_string()),
    }
}

impl ReportStore for Storage {
    fn insert(&self, report: LocationReport) -> agora_journal::Result<()> {
        self.put_report(&report).map_err(to_store_error)
    }

    fn reports_newer_than(&self, cutoff_ms: u64) -> agora_journal::Result<Vec<LocationReport>> {
        self.list_reports_newer_than(cutoff_ms)
            .map_err(to_store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_geo::GeoPoint;
    use agora_journal::SubjectId;
    use tempfile::tempdir;

    fn report(subject: &str, ts: u64) -> LocationReport {
        LocationReport::with_timestamp(
            SubjectId::new(subject),
            GeoPoint::from_lat_lon(40.0, -75.0),
            ts,
        )
    }

    #[test]
    fn report_roundtrip() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        let original = report("user-1", 1_700_000_000_000);
        storage.put_report(&original).unwrap();

        let loaded = storage.list_reports_newer_than(0).unwrap();
        assert_eq!(loaded, vec![original]);
    }

    #[test]
    fn newer_than_is_strict() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        storage.put_report(&report("a", 1_000)).unwrap();
        storage.put_report(&report("b", 2_000)).unwrap();
        storage.put_report(&report("c", 3_000)).unwrap();

        assert_eq!(storage.list_reports_newer_than(999).unwrap().len(), 3);
        assert_eq!(storage.list_reports_newer_than(1_000).unwrap().len(), 2);
        assert_eq!(storage.list_reports_newer_than(2_000).unwrap().len(), 1);
        assert_eq!(storage.list_reports_newer_than(3_000).unwrap().len(), 0);
    }

    #[test]
    fn same_millisecond_reports_all_kept() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        for i in 0..5 {
            storage
                .put_report(&report(&format!("user-{i}"), 1_000))
                .unwrap();
        }

        assert_eq!(storage.list_reports_newer_than(0).unwrap().len(), 5);
    }

    #[test]
    fn scan_is_oldest_first() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        storage.put_report(&report("late", 3_000)).unwrap();
        storage.put_report(&report("early", 1_000)).unwrap();
        storage.put_report(&report("mid", 2_000)).unwrap();

        let loaded = storage.list_reports_newer_than(0).unwrap();
        let subjects: Vec<_> = loaded.iter().map(|r| r.subject_id.as_str()).collect();
        assert_eq!(subjects, vec!["early", "mid", "late"]);
    }

    #[test]
    fn survives_reopen() {
        let dir = tempdir().unwrap();

        {
            let storage = Storage::open(dir.path()).unwrap();
            storage.put_report(&report("persisted", 1_000)).unwrap();
        }

        let storage = Storage::open(dir.path()).unwrap();
        let loaded = storage.list_reports_newer_than(0).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].subject_id.as_str(), "persisted");
    }

    #[test]
    fn trait_view_matches_inherent_api() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        let store: &dyn ReportStore = &storage;
        store.insert(report("via-trait", 5_000)).unwrap();

        assert_eq!(store.reports_newer_than(4_999).unwrap().len(), 1);
        assert_eq!(store.reports_newer_than(5_000).unwrap().len(), 0);
    }
}
