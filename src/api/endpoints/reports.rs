//! Reports endpoints.
//!
//! - `GET /api/reports`: adherence summary, trend and recent activity
//! - `GET /api/trend`: seven-day trend only

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::reports::ReportsData;
use crate::trend::TrendPoint;

pub async fn summary(State(ctx): State<ApiContext>) -> Result<Json<ReportsData>, ApiError> {
    Ok(Json(ctx.core.reports()?))
}

pub async fn trend(State(ctx): State<ApiContext>) -> Result<Json<Vec<TrendPoint>>, ApiError> {
    Ok(Json(ctx.core.trend()?))
}
