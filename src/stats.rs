//! Today's counts and trailing-week adherence.
//!
//! The adherence window and the roster used for historical days are
//! policies (`AdherenceWindow`, `RosterWeighting`). The defaults keep the
//! raw `now - 7 days` comparison and weight every day with the current
//! medication set.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::config::TrackerConfig;
use crate::models::{
    active_slot_total, daily_slot_total, AdherenceWindow, IntakeLogEntry, Medication,
    RosterWeighting,
};
use crate::tracker::TrackerState;

/// Length of the adherence window and the trend series, in days.
pub const WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdherenceStats {
    /// Taken entries dated today.
    pub taken: usize,
    /// Today's scheduled slots minus `taken`. Skipped doses still count
    /// as remaining.
    pub remaining: usize,
    /// Percentage of scheduled doses taken over the window, 0–100.
    pub adherence: u32,
    /// Slots scheduled today under the configured roster policy.
    pub scheduled_today: usize,
}

pub fn compute_stats(
    state: &TrackerState,
    now: DateTime<Utc>,
    config: &TrackerConfig,
) -> AdherenceStats {
    let today = now.date_naive();
    let log = state.intake_log();
    let medications = state.medications();

    let taken = log
        .iter()
        .filter(|l| l.date == today && l.is_taken())
        .count();
    let scheduled_today = slots_on(medications, today, config.roster_weighting);

    let window_taken = taken_in_window(log, now, config.adherence_window);
    let window_scheduled = window_slot_total(medications, today, config.roster_weighting);

    AdherenceStats {
        taken,
        remaining: scheduled_today.saturating_sub(taken),
        adherence: percent(window_taken, window_scheduled),
        scheduled_today,
    }
}

/// Whether an entry dated `date` falls inside the window ending at `now`.
///
/// `Rolling` compares the date's UTC midnight against `now - 7 days`
/// without aligning to day boundaries, so the oldest day drops out as
/// soon as `now` passes its time of day. `CalendarAligned` keeps the
/// seven calendar days ending today.
pub fn in_window(date: NaiveDate, now: DateTime<Utc>, window: AdherenceWindow) -> bool {
    match window {
        AdherenceWindow::Rolling => {
            let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
            midnight >= now - Duration::days(WINDOW_DAYS)
        }
        AdherenceWindow::CalendarAligned => {
            let today = now.date_naive();
            date <= today && date > today - Duration::days(WINDOW_DAYS)
        }
    }
}

pub fn taken_in_window(
    log: &[IntakeLogEntry],
    now: DateTime<Utc>,
    window: AdherenceWindow,
) -> usize {
    log.iter()
        .filter(|l| l.is_taken() && in_window(l.date, now, window))
        .count()
}

/// Slots scheduled on `day` under `roster`.
pub fn slots_on(medications: &[Medication], day: NaiveDate, roster: RosterWeighting) -> usize {
    match roster {
        RosterWeighting::CurrentRoster => daily_slot_total(medications),
        RosterWeighting::ActiveOnDay => active_slot_total(medications, day),
    }
}

/// Slots scheduled across the seven days ending `today`.
pub fn window_slot_total(
    medications: &[Medication],
    today: NaiveDate,
    roster: RosterWeighting,
) -> usize {
    match roster {
        RosterWeighting::CurrentRoster => daily_slot_total(medications) * WINDOW_DAYS as usize,
        RosterWeighting::ActiveOnDay => window_days(today)
            .map(|day| active_slot_total(medications, day))
            .sum(),
    }
}

/// The seven calendar days ending `today`, oldest first.
pub fn window_days(today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..WINDOW_DAYS).rev().map(move |offset| today - Duration::days(offset))
}

/// `part / whole` as a rounded percentage clamped to 100; 0 when `whole` is 0.
pub fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let pct = (part as f64 / whole as f64) * 100.0;
    pct.round().min(100.0) as u32
}
