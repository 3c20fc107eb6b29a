//! Seven-day adherence trend for the reports screen.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::RosterWeighting;
use crate::stats::{percent, slots_on, window_days};
use crate::tracker::TrackerState;

/// Day labels indexed by days since Monday.
pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub day: &'static str,
    pub taken: usize,
    pub scheduled: usize,
    pub percentage: u32,
}

pub fn day_label(date: NaiveDate) -> &'static str {
    DAY_LABELS[date.weekday().num_days_from_monday() as usize]
}

/// One point per calendar day for the seven days ending `today`, oldest first.
pub fn weekly_trend(
    state: &TrackerState,
    today: NaiveDate,
    roster: RosterWeighting,
) -> Vec<TrendPoint> {
    window_days(today)
        .map(|date| {
            let taken = state
                .intake_log()
                .iter()
                .filter(|l| l.date == date && l.is_taken())
                .count();
            let scheduled = slots_on(state.medications(), date, roster);
            TrendPoint {
                date,
                day: day_label(date),
                taken,
                scheduled,
                percentage: percent(taken, scheduled),
            }
        })
        .collect()
}
