//! Agora Density Engine
//!
//! Derives crowd-density signals from a sliding window of location reports.
//!
//! # Pipeline
//!
//! A location update flows through four steps:
//!
//! 1. the report is appended to the journal (one durable write),
//! 2. the active set - every report newer than `now - active_window` - is
//!    re-derived from the journal,
//! 3. reports within `radius_m` of the update's position are counted and the
//!    count is classified into a [`ZoneLevel`],
//! 4. a [`ZoneLevel::Heavy`] classification emits exactly one alert to the
//!    reporting subject through the [`AlertSink`].
//!
//! # No Cached State
//!
//! Density is recomputed fresh on every update. A fast-changing crowd makes
//! any incremental count stale by the time it is read, so the engine holds
//! no state beyond its configuration.
//!
//! # Self-Counting
//!
//! The just-written report is inside the window its own density query reads,
//! so a subject counts itself (distance 0). [`DensityConfig::count_own_reports`]
//! keeps that behavior by default; setting it to `false` excludes every
//! report by the querying subject instead.

mod config;
mod density;
mod monitor;
mod zone;

pub use config::DensityConfig;
pub use density::density_at;
pub use monitor::{AlertSink, CrowdMonitor, UpdateOutcome, HEAVY_ZONE_WARNING};
pub use zone::ZoneLevel;
