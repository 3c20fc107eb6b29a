//! Medication endpoints.
//!
//! - `GET /api/medications`: registered medications, in creation order
//! - `DELETE /api/medications/:id`: remove a medication and its log entries

use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{parse_path, ApiContext, DeleteResponse};
use crate::models::{Medication, MedicationId};
use crate::tracker::Action;

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Medication>>, ApiError> {
    let medications = ctx.core.read_tracker()?.medications().to_vec();
    Ok(Json(medications))
}

pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(medication_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = MedicationId(parse_path(&medication_id, "medication ID")?);

    let before = ctx.core.read_tracker()?.intake_log().len();
    let next = ctx.core.dispatch(Action::DeleteMedication(id))?;
    let removed_entries = before.saturating_sub(next.intake_log().len());

    tracing::info!(%id, removed_entries, "Medication deleted");

    Ok(Json(DeleteResponse {
        deleted: id,
        removed_entries,
    }))
}
