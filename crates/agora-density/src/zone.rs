//! Zone classification.
//!
//! A pure mapping from a neighbor count to one of three levels. The
//! boundaries are strict-greater comparisons against the configured
//! cutoffs, so with the defaults:
//!
//! - count ≤ 15 → `NORMAL`
//! - 16 ≤ count ≤ 35 → `MEDIUM`
//! - count ≥ 36 → `HEAVY`

use crate::config::DensityConfig;
use serde::{Deserialize, Serialize};

/// Crowd zone classification for a density count.
///
/// Ordered: `Normal < Medium < Heavy`, so a larger count never classifies
/// lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ZoneLevel {
    /// Sparse surroundings; no action.
    Normal,
    /// Noticeably crowded; informational.
    Medium,
    /// Dangerously crowded; triggers a warning to the subject.
    Heavy,
}

impl ZoneLevel {
    /// Classify a neighbor count against the configured cutoffs.
    pub fn classify(count: u32, config: &DensityConfig) -> Self {
        if count > config.heavy_over {
            ZoneLevel::Heavy
        } else if count > config.medium_over {
            ZoneLevel::Medium
        } else {
            ZoneLevel::Normal
        }
    }

    /// Rank for monotonicity checks: `Normal` = 0, `Medium` = 1, `Heavy` = 2.
    pub const fn rank(self) -> u8 {
        match self {
            ZoneLevel::Normal => 0,
            ZoneLevel::Medium => 1,
            ZoneLevel::Heavy => 2,
        }
    }

    /// True for the level that triggers an alert.
    pub const fn is_heavy(self) -> bool {
        matches!(self, ZoneLevel::Heavy)
    }
}

impl std::fmt::Display for ZoneLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ZoneLevel::Normal => "NORMAL",
            ZoneLevel::Medium => "MEDIUM",
            ZoneLevel::Heavy => "HEAVY",
        };
        f.write_str(s)
    }
}
