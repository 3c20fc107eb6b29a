//! Reports screen: adherence summary, weekly trend and recent activity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::config::TrackerConfig;
use crate::models::{EntryId, IntakeStatus, MedicationId};
use crate::stats::compute_stats;
use crate::tracker::TrackerState;
use crate::trend::{weekly_trend, TrendPoint};

/// A log entry resolved to its medication name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityItem {
    pub entry_id: EntryId,
    pub medication_id: MedicationId,
    pub medication_name: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: IntakeStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportsData {
    /// Trailing-week adherence percentage.
    pub adherence: u32,
    /// Taken entries over the whole log.
    pub total_taken: usize,
    pub active_medications: usize,
    pub trend: Vec<TrendPoint>,
    /// Newest first.
    pub recent_activity: Vec<ActivityItem>,
}

pub fn get_reports_data(
    state: &TrackerState,
    now: DateTime<Utc>,
    config: &TrackerConfig,
) -> ReportsData {
    let stats = compute_stats(state, now, config);

    ReportsData {
        adherence: stats.adherence,
        total_taken: state.intake_log().iter().filter(|l| l.is_taken()).count(),
        active_medications: state.medications().len(),
        trend: weekly_trend(state, now.date_naive(), config.roster_weighting),
        recent_activity: recent_activity(state, config.recent_activity_limit),
    }
}

/// The last `limit` log entries, newest first. Entries whose medication
/// no longer exists are dropped after the limit is applied.
pub fn recent_activity(state: &TrackerState, limit: usize) -> Vec<ActivityItem> {
    let log = state.intake_log();
    let start = log.len().saturating_sub(limit);

    log[start..]
        .iter()
        .rev()
        .filter_map(|entry| {
            let med = state.medication(entry.medication_id)?;
            Some(ActivityItem {
                entry_id: entry.id,
                medication_id: med.id,
                medication_name: med.name.clone(),
                date: entry.date,
                time: entry.time.clone(),
                status: entry.status,
            })
        })
        .collect()
}
