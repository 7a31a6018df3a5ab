//! Location report types.

use agora_geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Opaque subject identifier.
///
/// Not unique per record - a subject emits many reports over time. The
/// journal never interprets the contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub String);

impl SubjectId {
    /// Create a subject id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SubjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Current Unix time in milliseconds (the journal's clock resolution).
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// One observation of a subject's position at an instant.
///
/// Immutable after creation; the store owns persisted records and readers
/// never mutate them. Timestamps are assigned by the server clock at
/// ingestion, so they are not monotonic across subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationReport {
    /// Who reported.
    pub subject_id: SubjectId,

    /// Where they were (longitude-first storage, geographic pair semantics).
    pub position: GeoPoint,

    /// Unix milliseconds at ingestion.
    pub timestamp: u64,
}

impl LocationReport {
    /// Create a report stamped with the current server clock.
    pub fn new(subject_id: SubjectId, position: GeoPoint) -> Self {
        Self {
            subject_id,
            position,
            timestamp: now_ms(),
        }
    }

    /// Create a report with an explicit timestamp.
    pub fn with_timestamp(subject_id: SubjectId, position: GeoPoint, timestamp: u64) -> Self {
        Self {
            subject_id,
            position,
            timestamp,
        }
    }

    /// True if this report is strictly newer than the cutoff.
    ///
    /// The bound is strict: a report stamped exactly at the cutoff is out.
    pub fn is_newer_than(&self, cutoff_ms: u64) -> bool {
        self.timestamp > cutoff_ms
    }
}
