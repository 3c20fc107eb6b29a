use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::DoseForm;

/// Creation-time identifier: milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicationId(pub i64);

impl std::fmt::Display for MedicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered medication with its daily reminder slots.
///
/// Never mutated after creation; removal goes through
/// `TrackerState::delete_medication`, which also drops its log entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: MedicationId,
    pub name: String,
    /// Strength and unit concatenated for display, e.g. `"100mg"`.
    pub dosage: String,
    /// Reminder times as `HH:MM`, in the order they were entered.
    pub times: Vec<String>,
    pub instructions: String,
    pub start_date: NaiveDate,
    /// `None` while the medication is ongoing.
    pub end_date: Option<NaiveDate>,
    pub form: DoseForm,
    pub created_at: DateTime<Utc>,
}

impl Medication {
    /// Number of scheduled doses per day.
    pub fn daily_slots(&self) -> usize {
        self.times.len()
    }

    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }

    /// Whether the start/end range covers `day` (both ends inclusive).
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.start_date <= day && self.end_date.map_or(true, |end| day <= end)
    }

    pub fn has_time(&self, time: &str) -> bool {
        self.times.iter().any(|t| t == time)
    }
}

/// Medication line for the dashboard list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationSummary {
    pub id: MedicationId,
    pub name: String,
    pub dosage: String,
    pub daily_slots: usize,
    /// e.g. `"100mg - 2x daily"`.
    pub description: String,
    pub ongoing: bool,
}

impl From<&Medication> for MedicationSummary {
    fn from(med: &Medication) -> Self {
        Self {
            id: med.id,
            name: med.name.clone(),
            dosage: med.dosage.clone(),
            daily_slots: med.daily_slots(),
            description: format!("{} - {}x daily", med.dosage, med.daily_slots()),
            ongoing: med.is_ongoing(),
        }
    }
}

/// Sum of reminder slots per day across `medications`.
pub fn daily_slot_total(medications: &[Medication]) -> usize {
    medications.iter().map(Medication::daily_slots).sum()
}

/// Sum of reminder slots on `day`, counting only medications active that day.
pub fn active_slot_total(medications: &[Medication], day: NaiveDate) -> usize {
    medications
        .iter()
        .filter(|m| m.is_active_on(day))
        .map(Medication::daily_slots)
        .sum()
}
