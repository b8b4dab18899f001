use anyhow::anyhow;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::faces::{DetectionSummary, PhotoInput, PhotoWithFaces};
use crate::layout::adjuster::{has_spine_conflict, resolve_spine_conflict};
use crate::layout::book::{layout_book, BookPlan};
use crate::layout::formats::BookFormat;
use crate::layout::generator::{layout_spread_with, LayoutOptions};
use crate::layout::models::{PlacedPhoto, SpreadConfig, SpreadLayout};
use crate::layout::placement::OverlapPolicy;
use crate::layout::random::SeededRandom;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSpreadRequest {
    pub photos: Vec<PhotoWithFaces>,
    pub spread: SpreadConfig,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub avoid_overlap: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    pub photo: PlacedPhoto,
    pub spread: SpreadConfig,
}

#[derive(Debug, Serialize)]
pub struct AdjustResponse {
    pub photo: PlacedPhoto,
    /// False when the photo still has a face on the spine after adjusting.
    pub resolved: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookLayoutRequest {
    pub format: String,
    pub spreads_count: usize,
    pub photos: Vec<PhotoInput>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub avoid_overlap: Option<bool>,
    #[serde(default)]
    pub resolve_conflicts: bool,
}

#[derive(Debug, Serialize)]
pub struct BookLayoutResponse {
    pub spreads: Vec<SpreadLayout>,
    pub summary: DetectionSummary,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/layout/spread
/// Lays out already-detected photos on one spread.
pub async fn handle_layout_spread(
    State(state): State<AppState>,
    Json(req): Json<LayoutSpreadRequest>,
) -> Result<Json<SpreadLayout>, AppError> {
    req.spread.validate().map_err(AppError::Validation)?;

    let options = request_options(
        state.layout_options,
        req.avoid_overlap,
        state.config.layout_min_gap,
    );
    let sizing = state.sizing.clone();
    let LayoutSpreadRequest {
        photos,
        spread,
        seed,
        ..
    } = req;

    let outcome = tokio::task::spawn_blocking(move || {
        let mut rng = SeededRandom::from_optional_seed(seed);
        layout_spread_with(&photos, &spread, &options, sizing.as_ref(), &mut rng)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("Layout task failed: {e}")))?;

    Ok(Json(SpreadLayout {
        id: "spread-0".to_string(),
        photos: outcome.placed,
        dropped: outcome.dropped,
        grid_coverage: outcome.grid_coverage,
    }))
}

/// POST /api/v1/layout/adjust
/// Runs the post-hoc adjuster on one placed photo.
pub async fn handle_adjust(Json(req): Json<AdjustRequest>) -> Result<Json<AdjustResponse>, AppError> {
    req.spread.validate().map_err(AppError::Validation)?;

    let photo = resolve_spine_conflict(&req.photo, &req.spread);
    let resolved = !has_spine_conflict(&photo, &req.spread);
    Ok(Json(AdjustResponse { photo, resolved }))
}

/// POST /api/v1/photobooks/layout
/// Detects faces for the whole photo list, then lays out every spread of the book.
pub async fn handle_layout_book(
    State(state): State<AppState>,
    Json(req): Json<BookLayoutRequest>,
) -> Result<Json<BookLayoutResponse>, AppError> {
    let format: BookFormat = req.format.parse().map_err(AppError::Validation)?;
    if req.spreads_count == 0 {
        return Err(AppError::Validation(
            "spreadsCount must be at least 1".to_string(),
        ));
    }

    let run_id = Uuid::new_v4();
    info!(
        %run_id,
        format = %format,
        spreads = req.spreads_count,
        photos = req.photos.len(),
        "Photobook layout requested"
    );

    let photos = state.detector.detect_faces_for_all(&req.photos).await;
    let summary = DetectionSummary::from_photos(&photos, state.detector.is_ready());

    let options = request_options(
        state.layout_options,
        req.avoid_overlap,
        state.config.layout_min_gap,
    );
    let sizing = state.sizing.clone();
    let spreads_count = req.spreads_count;
    let resolve_conflicts = req.resolve_conflicts;
    let seed = req.seed;

    let spreads = tokio::task::spawn_blocking(move || {
        let plan = BookPlan {
            spread: format.spread_config(),
            spreads_count,
            options,
            sizing: sizing.as_ref(),
            resolve_conflicts,
        };
        let mut rng = SeededRandom::from_optional_seed(seed);
        layout_book(&photos, &plan, &mut rng)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("Layout task failed for run {run_id}: {e}")))?;

    Ok(Json(BookLayoutResponse { spreads, summary }))
}

/// Applies a request's `avoidOverlap` flag on top of the configured defaults.
fn request_options(
    defaults: LayoutOptions,
    avoid_overlap: Option<bool>,
    min_gap: f64,
) -> LayoutOptions {
    let overlap = match avoid_overlap {
        Some(true) => OverlapPolicy::Forbid { min_gap },
        Some(false) => OverlapPolicy::Allow,
        None => defaults.overlap,
    };
    LayoutOptions { overlap, ..defaults }
}
