//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core_state::CoreError;
use crate::tracker::TrackerError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::MissingField(field) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MISSING_FIELD",
                format!("{field} is required"),
            ),
            ApiError::Conflict(detail) => (StatusCode::CONFLICT, "ALREADY_LOGGED", detail.clone()),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::MissingField(field) => ApiError::MissingField(field),
            TrackerError::UnknownMedication(_) => ApiError::NotFound(err.to_string()),
            TrackerError::AlreadyLogged { .. } => ApiError::Conflict(err.to_string()),
            TrackerError::SlotNotScheduled { .. }
            | TrackerError::TimeIndexOutOfRange { .. }
            | TrackerError::LastReminderTime
            | TrackerError::InvalidEnum { .. } => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LockPoisoned => ApiError::Internal("lock poisoned".into()),
            CoreError::Tracker(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MedicationId;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn not_found_returns_404() {
        let response = ApiError::NotFound("Medication not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn missing_field_returns_422() {
        let response = ApiError::MissingField("name").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "MISSING_FIELD");
        assert_eq!(json["error"]["message"], "name is required");
    }

    #[tokio::test]
    async fn internal_hides_detail() {
        let response = ApiError::Internal("something broke".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn already_logged_maps_to_conflict() {
        let err: ApiError = TrackerError::AlreadyLogged {
            medication_id: MedicationId(1),
            time: "08:00".into(),
            date: chrono::NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn tracker_errors_map_to_status_families() {
        assert!(matches!(
            ApiError::from(TrackerError::UnknownMedication(MedicationId(3))),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(TrackerError::LastReminderTime),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(CoreError::LockPoisoned),
            ApiError::Internal(_)
        ));
        assert!(matches!(
            ApiError::from(CoreError::Tracker(TrackerError::MissingField("strength"))),
            ApiError::MissingField("strength")
        ));
    }
}
