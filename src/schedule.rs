//! Today's dose schedule, derived from medications and the intake log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{EntryId, Medication, SlotStatus};
use crate::tracker::TrackerState;

/// One scheduled dose for the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub time: String,
    pub medication: Medication,
    pub status: SlotStatus,
    /// Log entry that set the status, if any.
    pub log_id: Option<EntryId>,
}

impl ScheduleRow {
    /// Pending rows are the only ones that accept a taken/skipped action.
    pub fn is_actionable(&self) -> bool {
        self.status == SlotStatus::Pending
    }
}

/// One row per (medication, reminder time) for `day`, ordered by time.
///
/// A slot takes the status of the first matching log entry; slots without
/// one are pending. Rows with equal times keep medication order.
pub fn schedule_for(state: &TrackerState, day: NaiveDate) -> Vec<ScheduleRow> {
    let mut rows: Vec<ScheduleRow> = state
        .medications()
        .iter()
        .flat_map(move |med| {
            med.times.iter().map(move |time| {
                let log = state
                    .intake_log()
                    .iter()
                    .find(|l| l.matches_slot(med.id, time, day));
                ScheduleRow {
                    time: time.clone(),
                    medication: med.clone(),
                    status: log.map_or(SlotStatus::Pending, |l| l.status.into()),
                    log_id: log.map(|l| l.id),
                }
            })
        })
        .collect();

    rows.sort_by(|a, b| a.time.cmp(&b.time));
    rows
}
