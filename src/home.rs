//! Dashboard screen: view model assembled from tracker state.
//!
//! Provides everything the dashboard renders in one value: today's
//! stats, the dose schedule, the medication list, and the weekly
//! progress banner.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::config::TrackerConfig;
use crate::models::MedicationSummary;
use crate::schedule::{schedule_for, ScheduleRow};
use crate::stats::{compute_stats, AdherenceStats};
use crate::tracker::TrackerState;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Weekly progress banner under the schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyProgress {
    pub adherence: u32,
    pub on_track: bool,
    pub label: &'static str,
}

impl WeeklyProgress {
    pub fn new(adherence: u32, threshold: u32) -> Self {
        let on_track = adherence >= threshold;
        Self {
            adherence,
            on_track,
            label: if on_track { "On Track" } else { "Needs Attention" },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub today: NaiveDate,
    /// False renders the "add your first medication" empty state.
    pub has_medications: bool,
    pub stats: AdherenceStats,
    pub schedule: Vec<ScheduleRow>,
    pub medications: Vec<MedicationSummary>,
    pub progress: WeeklyProgress,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

pub fn get_dashboard_data(
    state: &TrackerState,
    now: DateTime<Utc>,
    config: &TrackerConfig,
) -> DashboardData {
    let today = now.date_naive();
    let stats = compute_stats(state, now, config);
    let progress = WeeklyProgress::new(stats.adherence, config.on_track_threshold);

    DashboardData {
        today,
        has_medications: !state.medications().is_empty(),
        schedule: schedule_for(state, today),
        medications: state.medications().iter().map(MedicationSummary::from).collect(),
        stats,
        progress,
    }
}
