//! Spine Safety: pure predicates deciding whether content intrudes on the binding band.
//!
//! The protected band is the physical spine widened by `SPINE_SAFE_ZONE` on each side.
//! Only horizontal extent matters: the spine runs the full height of the spread.

use crate::faces::FaceBox;
use crate::layout::models::{Rect, SpreadConfig};

/// Padding added to each side of the physical spine.
pub const SPINE_SAFE_ZONE: f64 = 30.0;

/// The protected horizontal band `(left, right)` around the spine centerline.
pub fn spine_band(spine_center: f64, spine_width: f64) -> (f64, f64) {
    let half = spine_width / 2.0 + SPINE_SAFE_ZONE;
    (spine_center - half, spine_center + half)
}

/// True if `x` lies strictly inside the protected band.
pub fn is_in_spine_zone(x: f64, spine_center: f64, spine_width: f64) -> bool {
    let half_zone = (spine_width + SPINE_SAFE_ZONE * 2.0) / 2.0;
    (x - spine_center).abs() < half_zone
}

/// True if `face`, placed inside `photo`, horizontally touches or crosses the band.
pub fn face_overlaps_spine(
    photo: &Rect,
    face: &FaceBox,
    spine_center: f64,
    spine_width: f64,
) -> bool {
    let face_left = photo.x + face.x * photo.width;
    let face_right = face_left + face.width * photo.width;
    let (spine_left, spine_right) = spine_band(spine_center, spine_width);

    !(face_right < spine_left || face_left > spine_right)
}

/// True if any of `faces` overlaps the spread's spine band when the photo sits at `photo`.
pub fn any_face_overlaps_spine(photo: &Rect, faces: &[FaceBox], spread: &SpreadConfig) -> bool {
    faces
        .iter()
        .any(|face| face_overlaps_spine(photo, face, spread.spine_position, spread.spine_width))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: f64 = 1000.0;
    const WIDTH: f64 = 40.0;

    fn face(x: f64, width: f64) -> FaceBox {
        FaceBox {
            x,
            y: 0.3,
            width,
            height: 0.2,
        }
    }

    #[test]
    fn test_spine_zone_edges() {
        // half zone = (40 + 60) / 2 = 50
        assert!(is_in_spine_zone(CENTER, CENTER, WIDTH));
        assert!(is_in_spine_zone(CENTER + 49.9, CENTER, WIDTH));
        assert!(!is_in_spine_zone(CENTER + 50.0, CENTER, WIDTH));
        assert!(!is_in_spine_zone(CENTER - 50.0, CENTER, WIDTH));
    }

    #[test]
    fn test_spine_zone_is_symmetric() {
        for d in [0.0, 10.0, 25.5, 49.99, 50.0, 50.01, 120.0, 999.0] {
            assert_eq!(
                is_in_spine_zone(CENTER + d, CENTER, WIDTH),
                is_in_spine_zone(CENTER - d, CENTER, WIDTH),
                "asymmetric at d = {d}"
            );
        }
    }

    #[test]
    fn test_face_straddling_centerline_overlaps() {
        // photo spans 800..1200, face spans 960..1040
        let photo = Rect::new(800.0, 100.0, 400.0, 300.0);
        assert!(face_overlaps_spine(&photo, &face(0.4, 0.2), CENTER, WIDTH));
    }

    #[test]
    fn test_face_far_from_spine_is_clear() {
        // band is 950..1050; face spans 100..180
        let photo = Rect::new(100.0, 100.0, 400.0, 300.0);
        assert!(!face_overlaps_spine(&photo, &face(0.0, 0.2), CENTER, WIDTH));

        // face spans 1060..1100, just right of the band
        let right = Rect::new(1000.0, 100.0, 200.0, 300.0);
        assert!(!face_overlaps_spine(&right, &face(0.3, 0.2), CENTER, WIDTH));
    }

    #[test]
    fn test_face_touching_band_edge_counts_as_overlap() {
        // face spans 900..950, band starts at 950
        let photo = Rect::new(900.0, 0.0, 100.0, 100.0);
        assert!(face_overlaps_spine(&photo, &face(0.0, 0.5), CENTER, WIDTH));
    }

    #[test]
    fn test_vertical_position_is_irrelevant() {
        let high = Rect::new(800.0, 0.0, 400.0, 300.0);
        let low = Rect::new(800.0, 700.0, 400.0, 300.0);
        let f = face(0.45, 0.1);
        assert_eq!(
            face_overlaps_spine(&high, &f, CENTER, WIDTH),
            face_overlaps_spine(&low, &f, CENTER, WIDTH)
        );
    }

    #[test]
    fn test_any_face_overlaps_spine() {
        let spread = SpreadConfig {
            width: 2000.0,
            height: 1000.0,
            safe_margin: 50.0,
            spine_position: CENTER,
            spine_width: WIDTH,
        };
        let photo = Rect::new(800.0, 100.0, 400.0, 300.0);
        assert!(!any_face_overlaps_spine(&photo, &[], &spread));
        assert!(!any_face_overlaps_spine(&photo, &[face(0.0, 0.1)], &spread));
        assert!(any_face_overlaps_spine(
            &photo,
            &[face(0.0, 0.1), face(0.45, 0.1)],
            &spread
        ));
    }
}
