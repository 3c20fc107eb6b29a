//! Tracker API router.
//!
//! Returns a composable `Router` with every route nested under `/api/`.
//! Layers (outermost → innermost): CORS → request log → handler.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the tracker API router over `core`.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn tracker_api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);

    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/view",
            get(endpoints::view::get).put(endpoints::view::set),
        )
        .route("/dashboard", get(endpoints::home::dashboard))
        .route("/schedule", get(endpoints::home::schedule))
        .route("/stats", get(endpoints::home::stats))
        .route("/reports", get(endpoints::reports::summary))
        .route("/trend", get(endpoints::reports::trend))
        .route("/medications", get(endpoints::medications::list))
        .route(
            "/medications/:id",
            axum::routing::delete(endpoints::medications::delete),
        )
        .route("/intake", get(endpoints::intake::log))
        .route("/intake/taken", post(endpoints::intake::taken))
        .route("/intake/skipped", post(endpoints::intake::skipped))
        .route(
            "/draft",
            get(endpoints::draft::get)
                .put(endpoints::draft::update)
                .delete(endpoints::draft::cancel),
        )
        .route("/draft/times", post(endpoints::draft::add_time))
        .route(
            "/draft/times/:index",
            put(endpoints::draft::set_time).delete(endpoints::draft::remove_time),
        )
        .route("/draft/save", post(endpoints::draft::save))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use chrono::{DateTime, TimeZone, Utc};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::TrackerConfig;
    use crate::core_state::FixedClock;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap()
    }

    fn test_core_state() -> Arc<CoreState> {
        Arc::new(CoreState::with_clock(
            TrackerConfig::default(),
            Arc::new(FixedClock(fixed_now())),
        ))
    }

    fn make_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(core: &Arc<CoreState>, method: &str, uri: &str, body: Option<Value>) -> Response {
        tracker_api_router(core.clone())
            .oneshot(make_request(method, uri, body))
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Fill and save the draft; returns the created medication id.
    async fn create_medication(core: &Arc<CoreState>, name: &str, times: &[&str]) -> i64 {
        let response = send(
            core,
            "PUT",
            "/api/draft",
            Some(json!({ "name": name, "strength": "100" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        for _ in 1..times.len() {
            send(core, "POST", "/api/draft/times", None).await;
        }
        for (index, time) in times.iter().enumerate() {
            let response = send(
                core,
                "PUT",
                &format!("/api/draft/times/{index}"),
                Some(json!({ "time": time })),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = send(core, "POST", "/api/draft/save", None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let core = test_core_state();
        let response = send(&core, "GET", "/api/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["app"], "MediTrack");
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let core = test_core_state();
        let response = send(&core, "GET", "/api/nope", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_dashboard() {
        let core = test_core_state();
        let json = body_json(send(&core, "GET", "/api/dashboard", None).await).await;
        assert_eq!(json["has_medications"], false);
        assert_eq!(json["schedule"], json!([]));
        assert_eq!(json["stats"]["adherence"], 0);
        assert_eq!(json["today"], "2026-05-04");
    }

    #[tokio::test]
    async fn aspirin_scenario() {
        let core = test_core_state();
        let id = create_medication(&core, "Aspirin", &["08:00"]).await;

        let schedule = body_json(send(&core, "GET", "/api/schedule", None).await).await;
        assert_eq!(schedule.as_array().unwrap().len(), 1);
        assert_eq!(schedule[0]["time"], "08:00");
        assert_eq!(schedule[0]["status"], "pending");
        assert_eq!(schedule[0]["medication"]["dosage"], "100mg");

        let response = send(
            &core,
            "POST",
            "/api/intake/taken",
            Some(json!({ "medication_id": id, "time": "08:00" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let entry = body_json(response).await;
        assert_eq!(entry["status"], "taken");
        assert_eq!(entry["date"], "2026-05-04");

        let schedule = body_json(send(&core, "GET", "/api/schedule", None).await).await;
        assert_eq!(schedule[0]["status"], "taken");

        let stats = body_json(send(&core, "GET", "/api/stats", None).await).await;
        assert_eq!(stats["taken"], 1);
        assert_eq!(stats["remaining"], 0);
    }

    #[tokio::test]
    async fn second_log_for_slot_conflicts() {
        let core = test_core_state();
        let id = create_medication(&core, "Aspirin", &["08:00"]).await;
        let body = json!({ "medication_id": id, "time": "08:00" });

        let first = send(&core, "POST", "/api/intake/skipped", Some(body.clone())).await;
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = send(&core, "POST", "/api/intake/taken", Some(body)).await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let json = body_json(second).await;
        assert_eq!(json["error"]["code"], "ALREADY_LOGGED");
    }

    #[tokio::test]
    async fn intake_for_unknown_medication_is_404() {
        let core = test_core_state();
        let response = send(
            &core,
            "POST",
            "/api/intake/taken",
            Some(json!({ "medication_id": 99, "time": "08:00" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn save_without_name_is_422() {
        let core = test_core_state();
        let response = send(&core, "POST", "/api/draft/save", None).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "MISSING_FIELD");
    }

    #[tokio::test]
    async fn save_resets_draft_and_returns_to_dashboard() {
        let core = test_core_state();
        send(&core, "PUT", "/api/view", Some(json!({ "view": "add" }))).await;
        let view = body_json(send(&core, "GET", "/api/view", None).await).await;
        assert_eq!(view["view"], "add");

        create_medication(&core, "Aspirin", &["08:00", "20:00"]).await;

        let view = body_json(send(&core, "GET", "/api/view", None).await).await;
        assert_eq!(view["view"], "dashboard");
        let draft = body_json(send(&core, "GET", "/api/draft", None).await).await;
        assert_eq!(draft["draft"]["name"], "");
        assert_eq!(draft["draft"]["times"], json!(["08:00"]));
        assert_eq!(draft["can_save"], false);
    }

    #[tokio::test]
    async fn draft_keeps_last_reminder_time() {
        let core = test_core_state();
        let response = send(&core, "DELETE", "/api/draft/times/0", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&core, "DELETE", "/api/draft/times/abc", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let added = body_json(send(&core, "POST", "/api/draft/times", None).await).await;
        assert_eq!(added["draft"]["times"], json!(["08:00", "12:00"]));
    }

    #[tokio::test]
    async fn cancel_keeps_draft() {
        let core = test_core_state();
        send(&core, "PUT", "/api/view", Some(json!({ "view": "add" }))).await;
        send(&core, "PUT", "/api/draft", Some(json!({ "name": "Ibuprofen" }))).await;

        let response = send(&core, "DELETE", "/api/draft", None).await;
        assert_eq!(body_json(response).await["view"], "dashboard");

        let draft = body_json(send(&core, "GET", "/api/draft", None).await).await;
        assert_eq!(draft["draft"]["name"], "Ibuprofen");
    }

    #[tokio::test]
    async fn delete_cascades_log_entries() {
        let core = test_core_state();
        let aspirin = create_medication(&core, "Aspirin", &["08:00", "14:00", "20:00"]).await;
        let vitamin = create_medication(&core, "Vitamin D", &["09:00"]).await;

        for time in ["08:00", "14:00", "20:00"] {
            send(
                &core,
                "POST",
                "/api/intake/taken",
                Some(json!({ "medication_id": aspirin, "time": time })),
            )
            .await;
        }
        send(
            &core,
            "POST",
            "/api/intake/skipped",
            Some(json!({ "medication_id": vitamin, "time": "09:00" })),
        )
        .await;

        let response = send(&core, "DELETE", &format!("/api/medications/{aspirin}"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["removed_entries"], 3);

        let log = body_json(send(&core, "GET", "/api/intake", None).await).await;
        let log = log.as_array().unwrap();
        assert_eq!(log.len(), 1);
        assert!(log.iter().all(|e| e["medication_id"] != aspirin));

        let schedule = body_json(send(&core, "GET", "/api/schedule", None).await).await;
        assert_eq!(schedule.as_array().unwrap().len(), 1);

        let missing = send(&core, "DELETE", &format!("/api/medications/{aspirin}"), None).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn reports_summary() {
        let core = test_core_state();
        let id = create_medication(&core, "Aspirin", &["08:00"]).await;
        send(
            &core,
            "POST",
            "/api/intake/taken",
            Some(json!({ "medication_id": id, "time": "08:00" })),
        )
        .await;

        let json = body_json(send(&core, "GET", "/api/reports", None).await).await;
        assert_eq!(json["total_taken"], 1);
        assert_eq!(json["active_medications"], 1);
        assert_eq!(json["adherence"], 14);
        assert_eq!(json["trend"].as_array().unwrap().len(), 7);
        assert_eq!(json["trend"][6]["day"], "Mon");
        assert_eq!(json["trend"][6]["percentage"], 100);
        assert_eq!(json["recent_activity"][0]["medication_name"], "Aspirin");

        let trend = body_json(send(&core, "GET", "/api/trend", None).await).await;
        assert_eq!(trend, json["trend"]);
    }

    #[tokio::test]
    async fn list_medications() {
        let core = test_core_state();
        create_medication(&core, "Aspirin", &["08:00"]).await;
        create_medication(&core, "Vitamin D", &["09:00"]).await;
        let json = body_json(send(&core, "GET", "/api/medications", None).await).await;
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Aspirin", "Vitamin D"]);
        assert_eq!(json[0]["end_date"], Value::Null);
    }
}
