//! Shared types for the API layer.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::core_state::CoreState;
use crate::draft::MedicationDraft;
use crate::models::{MedicationId, View};

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

// ═══════════════════════════════════════════════════════════
// Request / response bodies
// ═══════════════════════════════════════════════════════════

/// Body of `POST /api/intake/taken` and `POST /api/intake/skipped`.
#[derive(Debug, Deserialize)]
pub struct IntakeRequest {
    pub medication_id: MedicationId,
    pub time: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ViewBody {
    pub view: View,
}

/// Body of `PUT /api/draft/times/:index`.
#[derive(Debug, Deserialize)]
pub struct TimeRequest {
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub draft: MedicationDraft,
    pub can_save: bool,
}

impl From<&MedicationDraft> for DraftResponse {
    fn from(draft: &MedicationDraft) -> Self {
        Self {
            draft: draft.clone(),
            can_save: draft.can_save(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: MedicationId,
    pub removed_entries: usize,
}

/// Parse a path segment, mapping failures to a 400.
pub fn parse_path<T>(raw: &str, what: &str) -> Result<T, ApiError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ApiError::BadRequest(format!("Invalid {what}: {e}")))
}
