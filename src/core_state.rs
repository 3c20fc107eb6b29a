//! Shared application state.
//!
//! `CoreState` owns the single `TrackerState` behind an `RwLock` and
//! hands out snapshots to the view builders. Actions take the write lock,
//! so they apply one at a time in arrival order.

use std::sync::{Arc, RwLock, RwLockReadGuard};

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::TrackerConfig;
use crate::home::{get_dashboard_data, DashboardData};
use crate::reports::{get_reports_data, ReportsData};
use crate::schedule::{schedule_for, ScheduleRow};
use crate::stats::{compute_stats, AdherenceStats};
use crate::tracker::{Action, TrackerError, TrackerState};
use crate::trend::{weekly_trend, TrendPoint};

// ═══════════════════════════════════════════════════════════
// Clock
// ═══════════════════════════════════════════════════════════

/// Source of "now" for every derived view and recorded action.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    tracker: RwLock<TrackerState>,
    config: TrackerConfig,
    clock: Arc<dyn Clock>,
}

impl CoreState {
    /// Empty tracker on the system clock.
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: TrackerConfig, clock: Arc<dyn Clock>) -> Self {
        let tracker = TrackerState::new(clock.now());
        Self {
            tracker: RwLock::new(tracker),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    // ── Read path ───────────────────────────────────────────

    /// Acquire a read lock on the tracker.
    pub fn read_tracker(&self) -> Result<RwLockReadGuard<'_, TrackerState>, CoreError> {
        self.tracker.read().map_err(|_| CoreError::LockPoisoned)
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> Result<TrackerState, CoreError> {
        Ok(self.read_tracker()?.clone())
    }

    pub fn dashboard(&self) -> Result<DashboardData, CoreError> {
        let tracker = self.read_tracker()?;
        Ok(get_dashboard_data(&tracker, self.now(), &self.config))
    }

    pub fn reports(&self) -> Result<ReportsData, CoreError> {
        let tracker = self.read_tracker()?;
        Ok(get_reports_data(&tracker, self.now(), &self.config))
    }

    pub fn schedule(&self) -> Result<Vec<ScheduleRow>, CoreError> {
        let tracker = self.read_tracker()?;
        Ok(schedule_for(&tracker, self.today()))
    }

    pub fn stats(&self) -> Result<AdherenceStats, CoreError> {
        let tracker = self.read_tracker()?;
        Ok(compute_stats(&tracker, self.now(), &self.config))
    }

    pub fn trend(&self) -> Result<Vec<TrendPoint>, CoreError> {
        let tracker = self.read_tracker()?;
        Ok(weekly_trend(&tracker, self.today(), self.config.roster_weighting))
    }

    // ── Write path ──────────────────────────────────────────

    /// Apply `action` and store the resulting state.
    ///
    /// Returns a copy of the new state. A refused action leaves the
    /// stored state as it was.
    pub fn dispatch(&self, action: Action) -> Result<TrackerState, CoreError> {
        let name = action.name();
        let now = self.now();
        let mut guard = self.tracker.write().map_err(|_| CoreError::LockPoisoned)?;

        match guard.apply(action, now, &self.config) {
            Ok(next) => {
                *guard = next.clone();
                tracing::info!(
                    action = name,
                    medications = next.medications().len(),
                    log_entries = next.intake_log().len(),
                    "Tracker action applied"
                );
                Ok(next)
            }
            Err(e) => {
                tracing::warn!(action = name, error = %e, "Tracker action refused");
                Err(CoreError::Tracker(e))
            }
        }
    }
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

/// Errors from CoreState operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftPatch;
    use crate::models::{SlotStatus, View};
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap()
    }

    fn test_state() -> CoreState {
        CoreState::with_clock(TrackerConfig::default(), Arc::new(FixedClock(fixed_now())))
    }

    fn add_aspirin(core: &CoreState) {
        core.dispatch(Action::UpdateDraft(DraftPatch {
            name: Some("Aspirin".into()),
            strength: Some("100".into()),
            ..Default::default()
        }))
        .unwrap();
        core.dispatch(Action::SaveDraft).unwrap();
    }

    #[test]
    fn new_state_is_empty_dashboard() {
        let core = test_state();
        let snapshot = core.snapshot().unwrap();
        assert!(snapshot.medications().is_empty());
        assert_eq!(snapshot.view(), View::Dashboard);
        assert_eq!(snapshot.draft().start_date, fixed_now().date_naive());
    }

    #[test]
    fn dispatch_stores_new_state() {
        let core = test_state();
        add_aspirin(&core);
        assert_eq!(core.snapshot().unwrap().medications().len(), 1);
        assert_eq!(core.schedule().unwrap().len(), 1);
    }

    #[test]
    fn refused_action_keeps_state() {
        let core = test_state();
        core.dispatch(Action::SetView(View::Add)).unwrap();
        let err = core.dispatch(Action::SaveDraft).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Tracker(TrackerError::MissingField("name"))
        ));
        assert_eq!(core.snapshot().unwrap().view(), View::Add);
    }

    #[test]
    fn aspirin_scenario_through_core() {
        let core = test_state();
        add_aspirin(&core);
        let id = core.snapshot().unwrap().medications()[0].id;

        let schedule = core.schedule().unwrap();
        assert_eq!(schedule[0].time, "08:00");
        assert_eq!(schedule[0].status, SlotStatus::Pending);

        core.dispatch(Action::MarkTaken {
            medication_id: id,
            time: "08:00".into(),
        })
        .unwrap();

        assert_eq!(core.schedule().unwrap()[0].status, SlotStatus::Taken);
        let stats = core.stats().unwrap();
        assert_eq!(stats.taken, 1);
        assert_eq!(stats.remaining, 0);
        assert_eq!(core.trend().unwrap().len(), 7);
    }

    #[test]
    fn views_use_the_clock() {
        let core = test_state();
        assert_eq!(core.today(), fixed_now().date_naive());
        assert_eq!(core.dashboard().unwrap().today, fixed_now().date_naive());
        assert_eq!(core.reports().unwrap().trend[6].date, fixed_now().date_naive());
    }
}
