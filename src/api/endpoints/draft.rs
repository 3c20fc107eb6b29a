//! Add-medication form endpoints.
//!
//! The draft lives in tracker state so the form survives navigation:
//! - `GET /api/draft`: current draft and whether it can be saved
//! - `PUT /api/draft`: patch scalar fields
//! - `DELETE /api/draft`: cancel, returning to the dashboard with the draft kept
//! - `POST /api/draft/times`: append a reminder time
//! - `PUT /api/draft/times/:index`: change a reminder time
//! - `DELETE /api/draft/times/:index`: remove a reminder time
//! - `POST /api/draft/save`: create the medication

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{parse_path, ApiContext, DraftResponse, TimeRequest, ViewBody};
use crate::draft::DraftPatch;
use crate::models::Medication;
use crate::tracker::Action;

pub async fn get(State(ctx): State<ApiContext>) -> Result<Json<DraftResponse>, ApiError> {
    let tracker = ctx.core.read_tracker()?;
    Ok(Json(DraftResponse::from(tracker.draft())))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Json(patch): Json<DraftPatch>,
) -> Result<Json<DraftResponse>, ApiError> {
    let next = ctx.core.dispatch(Action::UpdateDraft(patch))?;
    Ok(Json(DraftResponse::from(next.draft())))
}

pub async fn cancel(State(ctx): State<ApiContext>) -> Result<Json<ViewBody>, ApiError> {
    let next = ctx.core.dispatch(Action::CancelDraft)?;
    Ok(Json(ViewBody { view: next.view() }))
}

pub async fn add_time(State(ctx): State<ApiContext>) -> Result<Json<DraftResponse>, ApiError> {
    let next = ctx.core.dispatch(Action::AddDraftTime)?;
    Ok(Json(DraftResponse::from(next.draft())))
}

pub async fn set_time(
    State(ctx): State<ApiContext>,
    Path(index): Path<String>,
    Json(req): Json<TimeRequest>,
) -> Result<Json<DraftResponse>, ApiError> {
    let index = parse_path(&index, "time index")?;
    let next = ctx.core.dispatch(Action::SetDraftTime {
        index,
        time: req.time,
    })?;
    Ok(Json(DraftResponse::from(next.draft())))
}

pub async fn remove_time(
    State(ctx): State<ApiContext>,
    Path(index): Path<String>,
) -> Result<Json<DraftResponse>, ApiError> {
    let index = parse_path(&index, "time index")?;
    let next = ctx.core.dispatch(Action::RemoveDraftTime { index })?;
    Ok(Json(DraftResponse::from(next.draft())))
}

/// Save the draft. Responds with the created medication.
pub async fn save(
    State(ctx): State<ApiContext>,
) -> Result<(StatusCode, Json<Medication>), ApiError> {
    let next = ctx.core.dispatch(Action::SaveDraft)?;
    let medication = next
        .medications()
        .last()
        .cloned()
        .ok_or_else(|| ApiError::Internal("no medication after save".into()))?;

    tracing::info!(id = %medication.id, name = %medication.name, "Medication created");

    Ok((StatusCode::CREATED, Json(medication)))
}
