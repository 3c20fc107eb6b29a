//! Tracker state and its transitions.
//!
//! `TrackerState` holds everything the application knows: medications,
//! the intake log, the add-medication draft and the current view. Every
//! transition borrows the current state and returns a new one, so a
//! refused action leaves the previous state untouched.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::TrackerConfig;
use crate::draft::{DraftPatch, MedicationDraft};
use crate::models::{
    DuplicateLogPolicy, EntryId, IntakeLogEntry, IntakeStatus, Medication, MedicationId, View,
};

// ═══════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Medication not found: {0}")]
    UnknownMedication(MedicationId),

    #[error("{time} is not a reminder time of medication {medication_id}")]
    SlotNotScheduled {
        medication_id: MedicationId,
        time: String,
    },

    #[error("Dose at {time} on {date} is already logged for medication {medication_id}")]
    AlreadyLogged {
        medication_id: MedicationId,
        time: String,
        date: chrono::NaiveDate,
    },

    #[error("Reminder time index {index} out of range ({len} times)")]
    TimeIndexOutOfRange { index: usize, len: usize },

    #[error("A medication needs at least one reminder time")]
    LastReminderTime,

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}

// ═══════════════════════════════════════════
// Actions
// ═══════════════════════════════════════════

/// A user-initiated state transition.
#[derive(Debug, Clone)]
pub enum Action {
    SetView(View),
    UpdateDraft(DraftPatch),
    AddDraftTime,
    SetDraftTime { index: usize, time: String },
    RemoveDraftTime { index: usize },
    /// Leave the form without clearing it.
    CancelDraft,
    /// Create a medication from the draft, clear it, return to the dashboard.
    SaveDraft,
    DeleteMedication(MedicationId),
    MarkTaken { medication_id: MedicationId, time: String },
    MarkSkipped { medication_id: MedicationId, time: String },
}

impl Action {
    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetView(_) => "set_view",
            Self::UpdateDraft(_) => "update_draft",
            Self::AddDraftTime => "add_draft_time",
            Self::SetDraftTime { .. } => "set_draft_time",
            Self::RemoveDraftTime { .. } => "remove_draft_time",
            Self::CancelDraft => "cancel_draft",
            Self::SaveDraft => "save_draft",
            Self::DeleteMedication(_) => "delete_medication",
            Self::MarkTaken { .. } => "mark_taken",
            Self::MarkSkipped { .. } => "mark_skipped",
        }
    }
}

// ═══════════════════════════════════════════
// State
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct TrackerState {
    medications: Vec<Medication>,
    intake_log: Vec<IntakeLogEntry>,
    draft: MedicationDraft,
    view: View,
    /// Last identifier handed out; keeps creation-time ids unique.
    #[serde(skip)]
    last_id: i64,
}

impl TrackerState {
    /// Empty tracker on the dashboard, with a fresh draft dated `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            medications: Vec::new(),
            intake_log: Vec::new(),
            draft: MedicationDraft::new(now.date_naive()),
            view: View::Dashboard,
            last_id: 0,
        }
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn intake_log(&self) -> &[IntakeLogEntry] {
        &self.intake_log
    }

    pub fn draft(&self) -> &MedicationDraft {
        &self.draft
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn medication(&self, id: MedicationId) -> Option<&Medication> {
        self.medications.iter().find(|m| m.id == id)
    }

    /// Apply `action` at instant `now`, returning the next state.
    pub fn apply(
        &self,
        action: Action,
        now: DateTime<Utc>,
        config: &TrackerConfig,
    ) -> Result<Self, TrackerError> {
        match action {
            Action::SetView(view) => Ok(self.with_view(view)),
            Action::UpdateDraft(patch) => {
                let mut next = self.clone();
                next.draft.apply_patch(patch);
                Ok(next)
            }
            Action::AddDraftTime => {
                let mut next = self.clone();
                next.draft.add_time();
                Ok(next)
            }
            Action::SetDraftTime { index, time } => {
                let mut next = self.clone();
                next.draft.set_time(index, time)?;
                Ok(next)
            }
            Action::RemoveDraftTime { index } => {
                let mut next = self.clone();
                next.draft.remove_time(index)?;
                Ok(next)
            }
            Action::CancelDraft => Ok(self.with_view(View::Dashboard)),
            Action::SaveDraft => self.save_draft(now),
            Action::DeleteMedication(id) => self.delete_medication(id),
            Action::MarkTaken {
                medication_id,
                time,
            } => self.log_intake(
                medication_id,
                &time,
                IntakeStatus::Taken,
                now,
                config.duplicate_policy,
            ),
            Action::MarkSkipped {
                medication_id,
                time,
            } => self.log_intake(
                medication_id,
                &time,
                IntakeStatus::Skipped,
                now,
                config.duplicate_policy,
            ),
        }
    }

    pub fn with_view(&self, view: View) -> Self {
        let mut next = self.clone();
        next.view = view;
        next
    }

    /// Append a medication built from `draft`. The stored draft is untouched.
    pub fn add_medication(
        &self,
        draft: &MedicationDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, TrackerError> {
        let mut next = self.clone();
        let id = MedicationId(next.next_id(now));
        let medication = draft.build(id, now)?;
        next.medications.push(medication);
        Ok(next)
    }

    /// Create a medication from the stored draft, reset the form and
    /// return to the dashboard.
    pub fn save_draft(&self, now: DateTime<Utc>) -> Result<Self, TrackerError> {
        let mut next = self.add_medication(&self.draft, now)?;
        next.draft = MedicationDraft::new(now.date_naive());
        next.view = View::Dashboard;
        Ok(next)
    }

    /// Remove a medication and every log entry that references it.
    pub fn delete_medication(&self, id: MedicationId) -> Result<Self, TrackerError> {
        if self.medication(id).is_none() {
            return Err(TrackerError::UnknownMedication(id));
        }
        let mut next = self.clone();
        next.medications.retain(|m| m.id != id);
        next.intake_log.retain(|l| l.medication_id != id);
        Ok(next)
    }

    /// Record `status` for the (medication, time) slot on `now`'s date.
    pub fn log_intake(
        &self,
        medication_id: MedicationId,
        time: &str,
        status: IntakeStatus,
        now: DateTime<Utc>,
        policy: DuplicateLogPolicy,
    ) -> Result<Self, TrackerError> {
        let medication = self
            .medication(medication_id)
            .ok_or(TrackerError::UnknownMedication(medication_id))?;
        if !medication.has_time(time) {
            return Err(TrackerError::SlotNotScheduled {
                medication_id,
                time: time.to_string(),
            });
        }

        let date = now.date_naive();
        let already_logged = self
            .intake_log
            .iter()
            .any(|l| l.matches_slot(medication_id, time, date));

        let mut next = self.clone();
        match policy {
            DuplicateLogPolicy::Append => {}
            DuplicateLogPolicy::Reject if already_logged => {
                return Err(TrackerError::AlreadyLogged {
                    medication_id,
                    time: time.to_string(),
                    date,
                });
            }
            DuplicateLogPolicy::Reject => {}
            DuplicateLogPolicy::Replace => {
                next.intake_log
                    .retain(|l| !l.matches_slot(medication_id, time, date));
            }
        }

        let id = EntryId(next.next_id(now));
        next.intake_log.push(IntakeLogEntry {
            id,
            medication_id,
            time: time.to_string(),
            date,
            status,
            timestamp: now,
        });
        Ok(next)
    }

    fn next_id(&mut self, now: DateTime<Utc>) -> i64 {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }
}
