//! Layout Generator: places every photo of one spread.
//!
//! # Algorithm
//! 1. Face-bearing photos go first: they carry the spine constraint and get the
//!    emptiest canvas.
//! 2. The sizing policy picks a target box per photo; the photo is cover-fitted into it.
//! 3. The placement search looks for a spine-safe position for that exact size.
//! 4. A photo without a position is dropped. There is no retry at another size and
//!    no backtracking, so `placed.len() <= photos.len()`.
//!
//! Layout is pure CPU work over already-detected photos; callers in async
//! context run it inside `tokio::task::spawn_blocking`.

use tracing::{debug, warn};

use crate::faces::PhotoWithFaces;
use crate::layout::fit::{fit_size, FitMode};
use crate::layout::grid::{SlotGrid, DEFAULT_CELL_SIZE};
use crate::layout::models::{PlacedPhoto, Rect, SpreadConfig};
use crate::layout::placement::{find_placement_among, OverlapPolicy};
use crate::layout::random::RandomSource;
use crate::layout::sizing::{SizingPolicy, TieredSizing};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Tunables for a layout run that are not part of the spread geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub overlap: OverlapPolicy,
    /// Edge length of the occupancy grid cells.
    pub cell_size: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            overlap: OverlapPolicy::Allow,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// Everything a layout run produced for one spread.
#[derive(Debug, Clone, Default)]
pub struct SpreadOutcome {
    pub placed: Vec<PlacedPhoto>,
    /// Photo ids that could not be sized or positioned, in processing order.
    pub dropped: Vec<String>,
    pub grid_coverage: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry points
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `photos` on one spread with the default options and tiered sizing.
pub fn layout_spread(
    photos: &[PhotoWithFaces],
    spread: &SpreadConfig,
    rng: &mut dyn RandomSource,
) -> Vec<PlacedPhoto> {
    layout_spread_with(
        photos,
        spread,
        &LayoutOptions::default(),
        &TieredSizing::default(),
        rng,
    )
    .placed
}

/// Lays out `photos` on one spread, reporting drops and grid coverage as well.
pub fn layout_spread_with(
    photos: &[PhotoWithFaces],
    spread: &SpreadConfig,
    options: &LayoutOptions,
    sizing: &dyn SizingPolicy,
    rng: &mut dyn RandomSource,
) -> SpreadOutcome {
    let mut outcome = SpreadOutcome::default();
    if photos.is_empty() {
        return outcome;
    }

    let area = spread.safe_area();
    if area.is_empty() {
        debug!(
            photos = photos.len(),
            width = spread.width,
            height = spread.height,
            "Spread has no safe area; nothing can be placed"
        );
        outcome.dropped = photos.iter().map(|p| p.photo_id.clone()).collect();
        return outcome;
    }

    let mut grid = SlotGrid::new(spread, options.cell_size);
    let mut placed_rects: Vec<Rect> = Vec::with_capacity(photos.len());

    for (index, photo) in faces_first(photos).into_iter().enumerate() {
        let target = sizing.size_for(index, photo, &area, rng);

        let Some(size) = fit_size(
            photo.width as f64,
            photo.height as f64,
            target.width,
            target.height,
            FitMode::Cover,
        ) else {
            warn!(
                photo_id = %photo.photo_id,
                width = photo.width,
                height = photo.height,
                "Photo has unusable dimensions; dropping from spread"
            );
            outcome.dropped.push(photo.photo_id.clone());
            continue;
        };

        let position = find_placement_among(
            size.width,
            size.height,
            spread,
            photo,
            &placed_rects,
            options.overlap,
            rng,
        );

        let Some(point) = position else {
            debug!(
                photo_id = %photo.photo_id,
                width = size.width,
                height = size.height,
                faces = photo.faces.len(),
                "No valid position found; dropping from spread"
            );
            outcome.dropped.push(photo.photo_id.clone());
            continue;
        };

        let placed = PlacedPhoto {
            id: format!("placed-{index}"),
            photo_id: photo.photo_id.clone(),
            url: photo.url.clone(),
            x: point.x,
            y: point.y,
            width: size.width,
            height: size.height,
            rotation: 0.0,
            scale: 1.0,
            faces: photo.faces.clone(),
        };
        grid.occupy(&placed.rect());
        placed_rects.push(placed.rect());
        outcome.placed.push(placed);
    }

    outcome.grid_coverage = grid.coverage();
    outcome
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

/// Stable partition: photos with faces first, each group in input order.
fn faces_first(photos: &[PhotoWithFaces]) -> Vec<&PhotoWithFaces> {
    let (with_faces, without_faces): (Vec<_>, Vec<_>) =
        photos.iter().partition(|p| p.has_faces());
    with_faces.into_iter().chain(without_faces).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
