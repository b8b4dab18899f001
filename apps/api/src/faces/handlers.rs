use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::faces::models::{DetectionSummary, PhotoInput, PhotoWithFaces};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    pub photos: Vec<PhotoInput>,
}

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub photos: Vec<PhotoWithFaces>,
    pub summary: DetectionSummary,
}

/// POST /api/v1/faces/detect
/// Per-photo failures come back as photos without faces, never as an error.
pub async fn handle_detect(
    State(state): State<AppState>,
    Json(req): Json<DetectRequest>,
) -> Result<Json<DetectResponse>, AppError> {
    let photos = state.detector.detect_faces_for_all(&req.photos).await;
    let summary = DetectionSummary::from_photos(&photos, state.detector.is_ready());
    Ok(Json(DetectResponse { photos, summary }))
}
