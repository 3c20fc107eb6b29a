//! Intake log endpoints.
//!
//! - `GET /api/intake`: the full log, oldest first
//! - `POST /api/intake/taken`: mark today's slot taken
//! - `POST /api/intake/skipped`: mark today's slot skipped

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, IntakeRequest};
use crate::models::IntakeLogEntry;
use crate::tracker::Action;

pub async fn log(State(ctx): State<ApiContext>) -> Result<Json<Vec<IntakeLogEntry>>, ApiError> {
    let entries = ctx.core.read_tracker()?.intake_log().to_vec();
    Ok(Json(entries))
}

pub async fn taken(
    State(ctx): State<ApiContext>,
    Json(req): Json<IntakeRequest>,
) -> Result<(StatusCode, Json<IntakeLogEntry>), ApiError> {
    record(
        &ctx,
        Action::MarkTaken {
            medication_id: req.medication_id,
            time: req.time,
        },
    )
}

pub async fn skipped(
    State(ctx): State<ApiContext>,
    Json(req): Json<IntakeRequest>,
) -> Result<(StatusCode, Json<IntakeLogEntry>), ApiError> {
    record(
        &ctx,
        Action::MarkSkipped {
            medication_id: req.medication_id,
            time: req.time,
        },
    )
}

/// Apply an intake action and return the entry it appended.
fn record(ctx: &ApiContext, action: Action) -> Result<(StatusCode, Json<IntakeLogEntry>), ApiError> {
    let next = ctx.core.dispatch(action)?;
    let entry = next
        .intake_log()
        .last()
        .cloned()
        .ok_or_else(|| ApiError::Internal("intake log empty after append".into()))?;
    Ok((StatusCode::CREATED, Json(entry)))
}
