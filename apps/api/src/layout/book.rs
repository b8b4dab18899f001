//! Book Planner: distributes a photo list across the spreads of a photobook.
//!
//! Photos are chunked in order, `ceil(n / spreads)` per spread, so trailing
//! spreads may be short or empty. Each spread is laid out independently.

use tracing::info;

use crate::faces::PhotoWithFaces;
use crate::layout::adjuster::resolve_spread_conflicts;
use crate::layout::generator::{layout_spread_with, LayoutOptions};
use crate::layout::models::{SpreadConfig, SpreadLayout};
use crate::layout::random::RandomSource;
use crate::layout::sizing::SizingPolicy;

/// Per-book settings shared by every spread.
pub struct BookPlan<'a> {
    pub spread: SpreadConfig,
    pub spreads_count: usize,
    pub options: LayoutOptions,
    pub sizing: &'a dyn SizingPolicy,
    /// Run the post-hoc adjuster over every placed photo.
    pub resolve_conflicts: bool,
}

/// Splits `photos` into `spreads_count` consecutive chunks of at most `ceil(n / spreads_count)`.
///
/// Always returns exactly `spreads_count` chunks (possibly empty).
pub fn chunk_photos(photos: &[PhotoWithFaces], spreads_count: usize) -> Vec<&[PhotoWithFaces]> {
    if spreads_count == 0 {
        return Vec::new();
    }
    let per_spread = photos.len().div_ceil(spreads_count);

    (0..spreads_count)
        .map(|i| {
            let start = (i * per_spread).min(photos.len());
            let end = (start + per_spread).min(photos.len());
            &photos[start..end]
        })
        .collect()
}

/// Lays out every spread of the book.
pub fn layout_book(
    photos: &[PhotoWithFaces],
    plan: &BookPlan<'_>,
    rng: &mut dyn RandomSource,
) -> Vec<SpreadLayout> {
    let spreads: Vec<SpreadLayout> = chunk_photos(photos, plan.spreads_count)
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let mut outcome =
                layout_spread_with(chunk, &plan.spread, &plan.options, plan.sizing, rng);
            if plan.resolve_conflicts {
                resolve_spread_conflicts(&mut outcome.placed, &plan.spread);
            }
            SpreadLayout {
                id: format!("spread-{i}"),
                photos: outcome.placed,
                dropped: outcome.dropped,
                grid_coverage: outcome.grid_coverage,
            }
        })
        .collect();

    let placed: usize = spreads.iter().map(|s| s.photos.len()).sum();
    info!(
        spreads = spreads.len(),
        photos = photos.len(),
        placed,
        "Photobook layout complete"
    );

    spreads
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faces::FaceBox;
    use crate::layout::formats::BookFormat;
    use crate::layout::random::SeededRandom;
    use crate::layout::sizing::TieredSizing;
    use crate::layout::spine::any_face_overlaps_spine;

    fn photos(n: usize) -> Vec<PhotoWithFaces> {
        (0..n)
            .map(|i| PhotoWithFaces {
                photo_id: format!("p{i}"),
                url: format!("https://cdn.example.com/p{i}.jpg"),
                width: 1200,
                height: 800,
                faces: if i % 2 == 0 {
                    vec![FaceBox {
                        x: 0.4,
                        y: 0.3,
                        width: 0.2,
                        height: 0.3,
                    }]
                } else {
                    vec![]
                },
            })
            .collect()
    }

    #[test]
    fn test_chunking_uses_ceil_division() {
        let all = photos(7);
        let chunks = chunk_photos(&all, 3);
        let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        assert_eq!(chunks[2][0].photo_id, "p6");
    }

    #[test]
    fn test_chunking_leaves_trailing_spreads_empty() {
        let all = photos(4);
        let sizes: Vec<usize> = chunk_photos(&all, 3).iter().map(|c| c.len()).collect();
        // ceil(4 / 3) = 2 → 2, 2, 0
        assert_eq!(sizes, vec![2, 2, 0]);
        assert!(chunk_photos(&all, 0).is_empty());
        assert_eq!(chunk_photos(&[], 2).len(), 2);
    }

    #[test]
    fn test_layout_book_covers_every_spread() {
        let sizing = TieredSizing::default();
        let plan = BookPlan {
            spread: BookFormat::Square30.spread_config(),
            spreads_count: 4,
            options: LayoutOptions::default(),
            sizing: &sizing,
            resolve_conflicts: true,
        };
        let all = photos(10);
        let spreads = layout_book(&all, &plan, &mut SeededRandom::new(77));

        assert_eq!(spreads.len(), 4);
        assert_eq!(spreads[0].id, "spread-0");
        assert_eq!(spreads[3].id, "spread-3");

        let accounted: usize = spreads
            .iter()
            .map(|s| s.photos.len() + s.dropped.len())
            .sum();
        assert_eq!(accounted, 10);

        for spread in &spreads {
            for p in &spread.photos {
                assert!(!any_face_overlaps_spine(&p.rect(), &p.faces, &plan.spread));
            }
        }
    }
}
