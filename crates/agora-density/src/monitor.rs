//! The update pipeline: persist, re-derive, classify, maybe alert.

use crate::config::DensityConfig;
use crate::density::density_at;
use crate::zone::ZoneLevel;
use agora_geo::GeoPoint;
use agora_journal::{now_ms, LocationReport, ReportStore, SubjectId};

/// Warning text pushed to a subject whose zone classifies as `HEAVY`.
pub const HEAVY_ZONE_WARNING: &str = "WARNING: You are in a HEAVY crowd zone!";

/// Notification collaborator contract.
///
/// Delivery is best-effort and fire-and-forget: implementations must not
/// block the update path and must swallow (log) their own failures. The
/// engine calls this at most once per update, only for `HEAVY` zones.
pub trait AlertSink {
    /// Address `message` to one subject.
    fn notify(&self, subject: &SubjectId, message: &str);
}

/// What an update computed, exposed for observability and tests.
///
/// Transport callers only relay success or failure; density and zone are
/// internal signals, not part of the update contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Neighbors counted within the radius, including the new report itself
    /// when self-counting is on.
    pub density: u32,
    /// Classification of that count.
    pub zone: ZoneLevel,
}

/// Orchestrates location updates over a report store and an alert sink.
///
/// Holds no density state of its own - every query re-reads the store. Two
/// concurrent updates may each see or miss the other's write; that race is
/// accepted, density being an approximate signal.
pub struct CrowdMonitor<S, A> {
    store: S,
    alerts: A,
    config: DensityConfig,
}

impl<S: ReportStore, A: AlertSink> CrowdMonitor<S, A> {
    /// Create a monitor with default configuration.
    pub fn new(store: S, alerts: A) -> Self {
        Self::with_config(store, alerts, DensityConfig::default())
    }

    /// Create a monitor with explicit configuration.
    pub fn with_config(store: S, alerts: A, config: DensityConfig) -> Self {
        Self {
            store,
            alerts,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &DensityConfig {
        &self.config
    }

    /// Ingest one location update.
    ///
    /// Persists the report, recomputes density at the reported position
    /// (the write happens first, so the subject's own report is visible to
    /// its own query), classifies the zone, and alerts the subject iff the
    /// zone is `HEAVY`. A storage failure at any step aborts the update
    /// before any alert is evaluated.
    pub fn record_location(
        &self,
        subject_id: SubjectId,
        lat: f64,
        lon: f64,
    ) -> agora_journal::Result<UpdateOutcome> {
        let position = GeoPoint::from_lat_lon(lat, lon);
        let report = LocationReport::new(subject_id.clone(), position);
        let now = report.timestamp;

        self.store.insert(report)?;

        let mut active = self.active_set(now)?;
        if !self.config.count_own_reports {
            active.retain(|r| r.subject_id != subject_id);
        }

        let density = density_at(position, &active, &self.config);
        let zone = ZoneLevel::classify(density, &self.config);

        tracing::debug!(
            subject = %subject_id,
            density,
            zone = %zone,
            "location update classified"
        );

        if zone.is_heavy() {
            self.alerts.notify(&subject_id, HEAVY_ZONE_WARNING);
        }

        Ok(UpdateOutcome { density, zone })
    }

    /// Raw density at a position, over the active set at call time.
    ///
    /// Read-only: does not write, does not alert, never filters by subject.
    pub fn density_near(&self, lat: f64, lon: f64) -> agora_journal::Result<u32> {
        let active = self.active_set(now_ms())?;
        Ok(density_at(
            GeoPoint::from_lat_lon(lat, lon),
            &active,
            &self.config,
        ))
    }

    /// All reports inside the active window right now.
    pub fn active_reports(&self) -> agora_journal::Result<Vec<LocationReport>> {
        self.active_set(now_ms())
    }

    fn active_set(&self, now: u64) -> agora_journal::Result<Vec<LocationReport>> {
        self.store.reports_newer_than(self.config.cutoff_ms(now))
    }
}
