pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::faces::handlers as faces;
use crate::layout::handlers as layout;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Face detection
        .route("/api/v1/faces/detect", post(faces::handle_detect))
        // Layout engine
        .route("/api/v1/layout/spread", post(layout::handle_layout_spread))
        .route("/api/v1/layout/adjust", post(layout::handle_adjust))
        .route("/api/v1/photobooks/layout", post(layout::handle_layout_book))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::faces::detector::DetectorTuning;
    use crate::faces::loader::HttpImageSource;
    use crate::faces::DetectorContext;
    use crate::layout::sizing::TieredSizing;

    fn test_state() -> AppState {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            models_dir: "/nonexistent/models".to_string(),
            detection_concurrency: 2,
            detection_min_face_size: 20,
            detection_score_threshold: 2.0,
            fetch_timeout_secs: 2,
            layout_avoid_overlap: false,
            layout_min_gap: 10.0,
        };
        let source = HttpImageSource::new(Duration::from_secs(2)).unwrap();
        // never initialized: every photo is treated as faceless
        let detector = DetectorContext::new(
            config.models_dir.clone(),
            DetectorTuning::default(),
            config.detection_concurrency,
            Arc::new(source),
        );
        AppState {
            layout_options: config.layout_options(),
            config,
            detector: Arc::new(detector),
            sizing: Arc::new(TieredSizing::default()),
        }
    }

    async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(b) => request.body(Body::from(b.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn spread() -> Value {
        json!({
            "width": 600.0,
            "height": 300.0,
            "safeMargin": 15.0,
            "spinePosition": 300.0,
            "spineWidth": 10.0
        })
    }

    // ── health ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_health_reports_model_state() {
        let (status, body) = send("GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["modelsReady"], false);
    }

    // ── faces ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_detect_degrades_to_no_faces() {
        let (status, body) = send(
            "POST",
            "/api/v1/faces/detect",
            Some(json!({ "photos": [{ "id": "a", "url": "/nonexistent/a.jpg" }] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["photos"][0]["photoId"], "a");
        assert_eq!(body["photos"][0]["width"], 800);
        assert_eq!(body["summary"]["totalFaces"], 0);
        assert_eq!(body["summary"]["modelsAvailable"], false);
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_layout_spread_is_reproducible_with_seed() {
        let request = json!({
            "photos": [
                { "photoId": "a", "url": "a.jpg", "width": 1200, "height": 800,
                  "faces": [{ "x": 0.4, "y": 0.3, "width": 0.2, "height": 0.3 }] },
                { "photoId": "b", "url": "b.jpg", "width": 1000, "height": 1000, "faces": [] }
            ],
            "spread": spread(),
            "seed": 42
        });
        let (status, first) = send("POST", "/api/v1/layout/spread", Some(request.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let (_, second) = send("POST", "/api/v1/layout/spread", Some(request)).await;
        assert_eq!(first, second);

        let placed = first["photos"].as_array().unwrap().len();
        let dropped = first["dropped"].as_array().unwrap().len();
        assert_eq!(placed + dropped, 2);
    }

    #[tokio::test]
    async fn test_layout_spread_rejects_bad_geometry() {
        let mut bad = spread();
        bad["width"] = json!(0.0);
        let (status, body) = send(
            "POST",
            "/api/v1/layout/spread",
            Some(json!({ "photos": [], "spread": bad })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_adjust_moves_face_off_the_spine() {
        let (status, body) = send(
            "POST",
            "/api/v1/layout/adjust",
            Some(json!({
                "photo": {
                    "id": "placed-0", "photoId": "a", "url": "a.jpg",
                    "x": 200.0, "y": 20.0, "width": 200.0, "height": 150.0,
                    "rotation": 0.0, "scale": 1.0,
                    "faces": [{ "x": 0.4, "y": 0.2, "width": 0.2, "height": 0.3 }]
                },
                "spread": spread()
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resolved"], true);
        assert_ne!(body["photo"]["x"], json!(200.0));
    }

    #[tokio::test]
    async fn test_book_layout_validates_input() {
        let (status, _) = send(
            "POST",
            "/api/v1/photobooks/layout",
            Some(json!({ "format": "99x99", "spreadsCount": 2, "photos": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            "POST",
            "/api/v1/photobooks/layout",
            Some(json!({ "format": "30x30", "spreadsCount": 0, "photos": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_book_layout_returns_every_spread() {
        let photos: Vec<Value> = (0..5)
            .map(|i| json!({ "id": format!("p{i}"), "url": format!("/nonexistent/p{i}.jpg") }))
            .collect();
        let (status, body) = send(
            "POST",
            "/api/v1/photobooks/layout",
            Some(json!({
                "format": "30x30",
                "spreadsCount": 3,
                "photos": photos,
                "seed": 7,
                "resolveConflicts": true
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let spreads = body["spreads"].as_array().unwrap();
        assert_eq!(spreads.len(), 3);
        assert_eq!(spreads[2]["id"], "spread-2");
        assert_eq!(body["summary"]["photosWithFaces"], 0);
    }
}
