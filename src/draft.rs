//! Add-medication form state.
//!
//! The draft is a working copy of a medication that does not exist yet.
//! It carries the UI-only `ongoing` flag, which collapses into a `None`
//! end date when the draft is built into a `Medication`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DosageUnit, DoseForm, Medication, MedicationId};
use crate::tracker::TrackerError;

/// Reminder slot a fresh draft starts with.
pub const DEFAULT_FIRST_TIME: &str = "08:00";

/// Reminder slot appended by "add another time".
pub const DEFAULT_ADDED_TIME: &str = "12:00";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationDraft {
    pub name: String,
    /// Dosage strength as typed; stored as free text.
    pub strength: String,
    pub unit: DosageUnit,
    pub times: Vec<String>,
    pub instructions: String,
    pub start_date: NaiveDate,
    /// Ignored while `ongoing` is set.
    pub end_date: Option<NaiveDate>,
    pub form: DoseForm,
    pub ongoing: bool,
}

/// Partial update for the scalar draft fields. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DraftPatch {
    pub name: Option<String>,
    pub strength: Option<String>,
    pub unit: Option<DosageUnit>,
    pub instructions: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub form: Option<DoseForm>,
    pub ongoing: Option<bool>,
}

impl MedicationDraft {
    /// Empty form: one `08:00` slot, starting `today`, ongoing.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            strength: String::new(),
            unit: DosageUnit::default(),
            times: vec![DEFAULT_FIRST_TIME.to_string()],
            instructions: String::new(),
            start_date: today,
            end_date: None,
            form: DoseForm::default(),
            ongoing: true,
        }
    }

    /// First required field that is still empty, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("name")
        } else if self.strength.trim().is_empty() {
            Some("strength")
        } else {
            None
        }
    }

    pub fn can_save(&self) -> bool {
        self.missing_field().is_none()
    }

    /// Strength and unit concatenated, e.g. `"100mg"`.
    pub fn display_dosage(&self) -> String {
        format!("{}{}", self.strength, self.unit)
    }

    pub fn apply_patch(&mut self, patch: DraftPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(strength) = patch.strength {
            self.strength = strength;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(instructions) = patch.instructions {
            self.instructions = instructions;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = Some(end_date);
        }
        if let Some(form) = patch.form {
            self.form = form;
        }
        if let Some(ongoing) = patch.ongoing {
            self.ongoing = ongoing;
        }
    }

    pub fn add_time(&mut self) {
        self.times.push(DEFAULT_ADDED_TIME.to_string());
    }

    pub fn set_time(&mut self, index: usize, time: String) -> Result<(), TrackerError> {
        let len = self.times.len();
        let slot = self
            .times
            .get_mut(index)
            .ok_or(TrackerError::TimeIndexOutOfRange { index, len })?;
        *slot = time;
        Ok(())
    }

    /// Remove the slot at `index`. The last remaining slot cannot be removed.
    pub fn remove_time(&mut self, index: usize) -> Result<(), TrackerError> {
        let len = self.times.len();
        if index >= len {
            return Err(TrackerError::TimeIndexOutOfRange { index, len });
        }
        if len == 1 {
            return Err(TrackerError::LastReminderTime);
        }
        self.times.remove(index);
        Ok(())
    }

    /// Build the medication this draft describes.
    pub fn build(
        &self,
        id: MedicationId,
        created_at: DateTime<Utc>,
    ) -> Result<Medication, TrackerError> {
        if let Some(field) = self.missing_field() {
            return Err(TrackerError::MissingField(field));
        }

        Ok(Medication {
            id,
            name: self.name.clone(),
            dosage: self.display_dosage(),
            times: self.times.clone(),
            instructions: self.instructions.clone(),
            start_date: self.start_date,
            end_date: if self.ongoing { None } else { self.end_date },
            form: self.form,
            created_at,
        })
    }
}
