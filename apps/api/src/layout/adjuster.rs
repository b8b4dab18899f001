//! Post-hoc Adjuster: nudges an already placed photo off the spine.
//!
//! Best effort: the photo moves in fixed steps away from the spine, on the side
//! its faces lean toward, until no face overlaps the band, a safe-margin edge is
//! hit, or the iteration budget runs out. A photo can come back still intruding.

use tracing::debug;

use crate::layout::models::{PlacedPhoto, SpreadConfig};
use crate::layout::spine::any_face_overlaps_spine;

pub const MAX_ADJUST_ITERATIONS: usize = 20;
/// Horizontal distance moved per iteration, in canvas units.
pub const ADJUST_STEP: f64 = 20.0;

/// True if any face of the placed photo overlaps the spine band at its current position.
pub fn has_spine_conflict(photo: &PlacedPhoto, spread: &SpreadConfig) -> bool {
    any_face_overlaps_spine(&photo.rect(), &photo.faces, spread)
}

/// Returns a copy of `photo` shifted horizontally to reduce spine intrusion.
///
/// Faceless photos come back unchanged.
pub fn resolve_spine_conflict(photo: &PlacedPhoto, spread: &SpreadConfig) -> PlacedPhoto {
    let mut adjusted = photo.clone();
    if adjusted.faces.is_empty() {
        return adjusted;
    }

    let min_x = spread.safe_margin;
    let max_x = spread.width - spread.safe_margin - adjusted.width;

    for _ in 0..MAX_ADJUST_ITERATIONS {
        if !has_spine_conflict(&adjusted, spread) {
            break;
        }

        if faces_center_x(&adjusted) < spread.spine_position {
            adjusted.x -= ADJUST_STEP;
        } else {
            adjusted.x += ADJUST_STEP;
        }

        if adjusted.x < min_x {
            adjusted.x = min_x;
            break;
        }
        if adjusted.x > max_x {
            adjusted.x = max_x;
            break;
        }
    }

    adjusted
}

/// Adjusts every photo of a spread in place. Returns how many still intrude on the spine.
pub fn resolve_spread_conflicts(photos: &mut [PlacedPhoto], spread: &SpreadConfig) -> usize {
    let mut unresolved = 0;
    for photo in photos.iter_mut() {
        if !has_spine_conflict(photo, spread) {
            continue;
        }
        *photo = resolve_spine_conflict(photo, spread);
        if has_spine_conflict(photo, spread) {
            debug!(
                placed_id = %photo.id,
                x = photo.x,
                "Spine conflict left unresolved after adjustment"
            );
            unresolved += 1;
        }
    }
    unresolved
}

/// Mean absolute center x of the photo's faces, each face weighted equally.
fn faces_center_x(photo: &PlacedPhoto) -> f64 {
    let sum: f64 = photo
        .faces
        .iter()
        .map(|f| f.center_x() * photo.width)
        .sum();
    photo.x + sum / photo.faces.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faces::FaceBox;

    fn spread() -> SpreadConfig {
        SpreadConfig {
            width: 2000.0,
            height: 1000.0,
            safe_margin: 50.0,
            spine_position: 1000.0,
            spine_width: 40.0,
        }
    }

    fn face(x: f64, width: f64) -> FaceBox {
        FaceBox {
            x,
            y: 0.2,
            width,
            height: 0.3,
        }
    }

    fn placed(x: f64, width: f64, faces: Vec<FaceBox>) -> PlacedPhoto {
        PlacedPhoto {
            id: "placed-0".to_string(),
            photo_id: "p".to_string(),
            url: "u".to_string(),
            x,
            y: 100.0,
            width,
            height: 300.0,
            rotation: 0.0,
            scale: 1.0,
            faces,
        }
    }

    #[test]
    fn test_face_centered_on_spine_is_pushed_clear() {
        // photo 800..1200, face 980..1020 centered on the spine; band is 950..1050
        let photo = placed(800.0, 400.0, vec![face(0.45, 0.1)]);
        assert!(has_spine_conflict(&photo, &spread()));

        let adjusted = resolve_spine_conflict(&photo, &spread());
        // centroid is not left of the spine → moves right until face left edge > 1050
        assert_eq!(adjusted.x, 880.0);
        assert!(!has_spine_conflict(&adjusted, &spread()));
        assert_eq!(adjusted.y, photo.y);
    }

    #[test]
    fn test_face_left_of_spine_moves_left() {
        // face 940..980, centroid 960 < 1000
        let photo = placed(700.0, 400.0, vec![face(0.6, 0.1)]);
        let adjusted = resolve_spine_conflict(&photo, &spread());
        assert!(adjusted.x < photo.x);
        assert!(!has_spine_conflict(&adjusted, &spread()));
    }

    #[test]
    fn test_stops_at_safe_margin_boundary() {
        // 1800-wide photo can only move between x = 50 and x = 150
        let photo = placed(100.0, 1800.0, vec![face(0.49, 0.02)]);
        let adjusted = resolve_spine_conflict(&photo, &spread());
        assert_eq!(adjusted.x, 150.0);
        assert!(has_spine_conflict(&adjusted, &spread()));
    }

    #[test]
    fn test_terminates_with_resolution_or_at_boundary() {
        let spread = spread();
        for width in [200.0, 400.0, 900.0, 1400.0, 1900.0] {
            for face_x in [0.0, 0.25, 0.45, 0.7, 0.9] {
                let x = (spread.spine_position - width * (face_x + 0.05)).clamp(
                    spread.safe_margin,
                    spread.width - spread.safe_margin - width,
                );
                let photo = placed(x, width, vec![face(face_x, 0.1)]);
                let adjusted = resolve_spine_conflict(&photo, &spread);
                let at_boundary = adjusted.x == spread.safe_margin
                    || adjusted.x == spread.width - spread.safe_margin - width;
                let moved = (adjusted.x - photo.x).abs();
                assert!(
                    !has_spine_conflict(&adjusted, &spread) || at_boundary || moved >= 400.0,
                    "width {width} face {face_x}: {adjusted:?}"
                );
                assert!(moved <= ADJUST_STEP * MAX_ADJUST_ITERATIONS as f64);
            }
        }
    }

    #[test]
    fn test_faceless_photo_is_untouched() {
        let photo = placed(900.0, 400.0, vec![]);
        assert_eq!(resolve_spine_conflict(&photo, &spread()), photo);
    }

    #[test]
    fn test_resolve_spread_conflicts_counts_leftovers() {
        let mut photos = vec![
            placed(800.0, 400.0, vec![face(0.45, 0.1)]),
            placed(100.0, 1800.0, vec![face(0.49, 0.02)]),
            placed(60.0, 300.0, vec![face(0.1, 0.1)]),
        ];
        let unresolved = resolve_spread_conflicts(&mut photos, &spread());
        assert_eq!(unresolved, 1);
        assert_eq!(photos[0].x, 880.0);
        assert_eq!(photos[2].x, 60.0);
    }
}
