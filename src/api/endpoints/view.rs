//! View mode endpoints: `GET /api/view` and `PUT /api/view`.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ViewBody};
use crate::tracker::Action;

pub async fn get(State(ctx): State<ApiContext>) -> Result<Json<ViewBody>, ApiError> {
    let view = ctx.core.read_tracker()?.view();
    Ok(Json(ViewBody { view }))
}

/// Direct assignment; any view may follow any other.
pub async fn set(
    State(ctx): State<ApiContext>,
    Json(body): Json<ViewBody>,
) -> Result<Json<ViewBody>, ApiError> {
    let next = ctx.core.dispatch(Action::SetView(body.view))?;
    Ok(Json(ViewBody { view: next.view() }))
}
