//! Placement Search: bounded rejection sampling for a spine-safe position.
//!
//! Each attempt draws a uniformly random top-left corner such that the
//! rectangle lands inside the safe area, then checks every face of the photo
//! against the spine band. The first candidate that passes wins; exhaustion is
//! reported as `None` and the caller decides what happens to the photo.

use serde::{Deserialize, Serialize};

use crate::faces::PhotoWithFaces;
use crate::layout::models::{Rect, SpreadConfig};
use crate::layout::random::RandomSource;
use crate::layout::spine::any_face_overlaps_spine;

/// Candidate positions drawn per photo before giving up.
pub const MAX_ATTEMPTS: usize = 100;

/// Minimum clearance between photos when overlap is forbidden.
pub const DEFAULT_MIN_GAP: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Whether photos of the same spread may overlap each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum OverlapPolicy {
    /// Free collage placement; only the spine constraint applies.
    #[default]
    Allow,
    /// Reject candidates closer than `min_gap` to an already placed photo.
    #[serde(rename_all = "camelCase")]
    Forbid { min_gap: f64 },
}

/// Finds a position for a `required_w × required_h` placement of `photo`
/// whose faces all stay clear of the spine.
pub fn find_placement(
    required_w: f64,
    required_h: f64,
    spread: &SpreadConfig,
    photo: &PhotoWithFaces,
    rng: &mut dyn RandomSource,
) -> Option<Point> {
    find_placement_among(
        required_w,
        required_h,
        spread,
        photo,
        &[],
        OverlapPolicy::Allow,
        rng,
    )
}

/// Like [`find_placement`], additionally honoring `policy` against the
/// rectangles already placed on the spread.
pub fn find_placement_among(
    required_w: f64,
    required_h: f64,
    spread: &SpreadConfig,
    photo: &PhotoWithFaces,
    placed: &[Rect],
    policy: OverlapPolicy,
    rng: &mut dyn RandomSource,
) -> Option<Point> {
    let area = spread.safe_area();

    for _ in 0..MAX_ATTEMPTS {
        let x = area.left + rng.next() * (area.width() - required_w);
        let y = area.top + rng.next() * (area.height() - required_h);
        let candidate = Rect::new(x, y, required_w, required_h);

        if !area.contains(&candidate) {
            continue;
        }

        if let OverlapPolicy::Forbid { min_gap } = policy {
            if placed.iter().any(|p| candidate.overlaps(p, min_gap)) {
                continue;
            }
        }

        if !any_face_overlaps_spine(&candidate, &photo.faces, spread) {
            return Some(Point { x, y });
        }
    }

    None
}
