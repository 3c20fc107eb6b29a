//! Dashboard endpoints.
//!
//! - `GET /api/dashboard`: full dashboard view model
//! - `GET /api/schedule`: today's dose schedule
//! - `GET /api/stats`: today's counts and weekly adherence

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::home::DashboardData;
use crate::schedule::ScheduleRow;
use crate::stats::AdherenceStats;

pub async fn dashboard(State(ctx): State<ApiContext>) -> Result<Json<DashboardData>, ApiError> {
    Ok(Json(ctx.core.dashboard()?))
}

pub async fn schedule(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<ScheduleRow>>, ApiError> {
    Ok(Json(ctx.core.schedule()?))
}

pub async fn stats(State(ctx): State<ApiContext>) -> Result<Json<AdherenceStats>, ApiError> {
    Ok(Json(ctx.core.stats()?))
}
