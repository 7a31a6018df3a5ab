//! Agora Location Journal
//!
//! An append-only log of location reports, queryable by recency.
//!
//! # Design
//!
//! Every position a subject reports becomes one immutable [`LocationReport`]
//! stamped with the server clock at ingestion time. The journal is never
//! compacted or deduplicated by this crate: a subject that reports twice
//! inside a window contributes two records to that window.
//!
//! The [`ReportStore`] trait is the narrow contract any storage engine must
//! satisfy to back the density engine: append one record, list records newer
//! than a cutoff. [`MemoryJournal`] is the in-process implementation used by
//! tests and embedded callers; the node crate provides a persistent one.

mod report;
mod store;

pub use report::{now_ms, LocationReport, SubjectId};
pub use store::{MemoryJournal, ReportStore, StoreError};

/// Result type for journal operations.
pub type Result<T> = std::result::Result<T, StoreError>;
