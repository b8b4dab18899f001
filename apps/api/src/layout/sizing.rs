//! Sizing Policy: decides the target placement box for each photo of a spread.
//!
//! The generator asks the policy once per photo, in processing order, and then
//! cover-fits the photo into the returned box. Swapping the policy changes the
//! visual style of a spread without touching the placement search.

use crate::faces::PhotoWithFaces;
use crate::layout::models::SafeArea;
use crate::layout::random::RandomSource;

/// Target box handed to the size fitter, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSize {
    pub width: f64,
    pub height: f64,
}

/// Fractional range of the safe area, e.g. `0.40..0.60` of the safe width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn sample(&self, rng: &mut dyn RandomSource) -> f64 {
        rng.next_in(self.min, self.max)
    }
}

pub trait SizingPolicy: Send + Sync {
    /// Target size for the photo processed at position `index` of the spread.
    fn size_for(
        &self,
        index: usize,
        photo: &PhotoWithFaces,
        area: &SafeArea,
        rng: &mut dyn RandomSource,
    ) -> TargetSize;
}

// ────────────────────────────────────────────────────────────────────────────
// TieredSizing: default large/small mix
// ────────────────────────────────────────────────────────────────────────────

/// Large/small tiers: the leading photos and a random share of the rest are large.
///
/// - large: 40–60% of safe width, 50–70% of safe height
/// - small: 25–40% of safe width, 30–45% of safe height
#[derive(Debug, Clone)]
pub struct TieredSizing {
    /// How many photos at the head of the spread are always large.
    pub leading_large: usize,
    /// Chance that any later photo is large.
    pub large_probability: f64,
    pub large_width: Band,
    pub large_height: Band,
    pub small_width: Band,
    pub small_height: Band,
}

impl Default for TieredSizing {
    fn default() -> Self {
        Self {
            leading_large: 2,
            large_probability: 0.3,
            large_width: Band::new(0.40, 0.60),
            large_height: Band::new(0.50, 0.70),
            small_width: Band::new(0.25, 0.40),
            small_height: Band::new(0.30, 0.45),
        }
    }
}

impl TieredSizing {
    /// The coin is only flipped for photos past the leading ones.
    pub fn is_large(&self, index: usize, rng: &mut dyn RandomSource) -> bool {
        index < self.leading_large || rng.next() < self.large_probability
    }
}

impl SizingPolicy for TieredSizing {
    fn size_for(
        &self,
        index: usize,
        _photo: &PhotoWithFaces,
        area: &SafeArea,
        rng: &mut dyn RandomSource,
    ) -> TargetSize {
        let (width_band, height_band) = if self.is_large(index, rng) {
            (self.large_width, self.large_height)
        } else {
            (self.small_width, self.small_height)
        };

        TargetSize {
            width: area.width() * width_band.sample(rng),
            height: area.height() * height_band.sample(rng),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OrientationSizing: deterministic large/medium/small by orientation
// ────────────────────────────────────────────────────────────────────────────

/// Fixed tiers by position, with separate proportions for portrait and landscape photos.
///
/// Positions 0–1 are large, 2–3 medium, the rest small. Uses no randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationSizing;

impl OrientationSizing {
    /// `(width, height)` fractions of the safe area for a tier/orientation pair.
    fn fractions(index: usize, portrait: bool) -> (f64, f64) {
        match (index, portrait) {
            (0..=1, true) => (0.35, 0.60),
            (0..=1, false) => (0.50, 0.45),
            (2..=3, true) => (0.28, 0.45),
            (2..=3, false) => (0.38, 0.35),
            (_, true) => (0.22, 0.35),
            (_, false) => (0.30, 0.28),
        }
    }
}

impl SizingPolicy for OrientationSizing {
    fn size_for(
        &self,
        index: usize,
        photo: &PhotoWithFaces,
        area: &SafeArea,
        _rng: &mut dyn RandomSource,
    ) -> TargetSize {
        let portrait = photo.aspect() < 1.0;
        let (w, h) = Self::fractions(index, portrait);
        TargetSize {
            width: area.width() * w,
            height: area.height() * h,
        }
    }
}
