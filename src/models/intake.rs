use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::IntakeStatus;
use super::medication::MedicationId;

/// Creation-time identifier for a log entry (milliseconds since the Unix epoch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

/// One taken/skipped action for one scheduled dose on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeLogEntry {
    pub id: EntryId,
    pub medication_id: MedicationId,
    /// Reminder slot the entry applies to (`HH:MM`).
    pub time: String,
    pub date: NaiveDate,
    pub status: IntakeStatus,
    /// When the action was recorded.
    pub timestamp: DateTime<Utc>,
}

impl IntakeLogEntry {
    pub fn matches_slot(&self, medication_id: MedicationId, time: &str, date: NaiveDate) -> bool {
        self.medication_id == medication_id && self.time == time && self.date == date
    }

    pub fn is_taken(&self) -> bool {
        self.status == IntakeStatus::Taken
    }
}
